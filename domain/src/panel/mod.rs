//! Composer panel message protocol.
//!
//! ```text
//!  surface ──{"type":"send","goal":..}──────────────▶ controller
//!  surface ◀──{"type":"response","status":..,...}─── controller
//!  surface ◀──{"type":"error","message":..}───────── controller
//! ```
//!
//! Inbound parsing is deliberately lenient: anything that is not a
//! well-formed `send` with a non-empty goal is dropped without error.

use crate::backend::api::AgentResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kinds of interactive panels the session can host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelKind {
    Composer,
}

impl PanelKind {
    /// Host-level view type identifier.
    pub fn view_type(&self) -> &'static str {
        match self {
            PanelKind::Composer => "openfluxComposer",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            PanelKind::Composer => "OpenFlux Composer",
        }
    }
}

/// Message from the surface to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelInbound {
    Send { goal: String },
}

impl PanelInbound {
    /// Parse a raw surface message. Returns `None` for any unsupported shape.
    pub fn parse(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        if object.get("type")?.as_str()? != "send" {
            return None;
        }
        let goal = object.get("goal")?.as_str()?.trim();
        if goal.is_empty() {
            return None;
        }
        Some(PanelInbound::Send {
            goal: goal.to_string(),
        })
    }

    /// Wire form, as a surface would post it.
    pub fn to_value(&self) -> Value {
        match self {
            PanelInbound::Send { goal } => serde_json::json!({ "type": "send", "goal": goal }),
        }
    }
}

/// Message from the controller to the surface.
///
/// Both variants end the surface's pending "thinking" state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PanelOutbound {
    /// The backend result merged into the envelope.
    Response(AgentResult),
    Error { message: String },
}

impl PanelOutbound {
    pub fn error(message: impl Into<String>) -> Self {
        PanelOutbound::Error {
            message: message.into(),
        }
    }

    /// Text recorded as the assistant turn for this reply.
    pub fn summary(&self) -> &str {
        match self {
            PanelOutbound::Response(result) => &result.message,
            PanelOutbound::Error { message } => message,
        }
    }
}
