//! Activity state definitions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What the session is currently doing.
///
/// Transitions:
///
/// ```text
///   idle ──begin(indexing)──▶ indexing ──finish──▶ idle
///   idle ──begin(agent)─────▶ agent ─────finish──▶ idle
///   any  ──probe failed─────▶ offline
///   offline ──probe ok──────▶ idle
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityState {
    #[default]
    Idle,
    Indexing,
    Agent,
    Offline,
}

impl ActivityState {
    /// Whether a long-running operation currently owns the indicator.
    pub fn is_busy(&self) -> bool {
        matches!(self, ActivityState::Indexing | ActivityState::Agent)
    }

    /// State after a connectivity probe completes.
    ///
    /// A failed probe always yields `Offline`. A successful probe only
    /// changes `Offline` back to `Idle`; busy states are left alone.
    pub fn after_probe(self, healthy: bool) -> ActivityState {
        match (self, healthy) {
            (_, false) => ActivityState::Offline,
            (ActivityState::Offline, true) => ActivityState::Idle,
            (state, true) => state,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityState::Idle => "idle",
            ActivityState::Indexing => "indexing",
            ActivityState::Agent => "agent",
            ActivityState::Offline => "offline",
        }
    }
}

impl fmt::Display for ActivityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A long-running, user-triggered backend operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Indexing,
    Agent,
}

impl OperationKind {
    /// The busy state shown while this operation runs.
    pub fn busy_state(&self) -> ActivityState {
        match self {
            OperationKind::Indexing => ActivityState::Indexing,
            OperationKind::Agent => ActivityState::Agent,
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Indexing => write!(f, "indexing"),
            OperationKind::Agent => write!(f, "agent"),
        }
    }
}
