//! Interactive panel ports.
//!
//! A panel is a script-capable surface hosted by the environment. The
//! controller posts [`PanelOutbound`] messages to it and receives raw
//! inbound messages plus a dismissal event over a channel.

use super::host::HostError;
use openflux_domain::{PanelKind, PanelOutbound};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Events delivered from a surface to its controller.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelEvent {
    /// A raw message posted by the surface's own logic.
    Message(Value),
    /// The user closed the panel.
    Disposed,
}

/// The rendered half of a panel.
pub trait PanelSurface: Send + Sync {
    fn post(&self, message: &PanelOutbound);

    /// Bring an existing panel to the front.
    fn reveal(&self);
}

/// A freshly created panel: its surface and the stream of its events.
pub struct PanelBinding {
    pub surface: Arc<dyn PanelSurface>,
    pub events: mpsc::UnboundedReceiver<PanelEvent>,
}

/// Creates panels in the host.
pub trait PanelHost: Send + Sync {
    fn create_panel(&self, kind: PanelKind) -> Result<PanelBinding, HostError>;
}
