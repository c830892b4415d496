//! Status indicator projection.
//!
//! The host shows one indicator (a status bar item in an editor, a status
//! line in the terminal shell). Its label, tooltip and click action are a
//! pure function of the [`ActivityState`] and the backend endpoint.

use super::state::ActivityState;
use crate::backend::endpoint::BackendEndpoint;
use std::fmt;
use std::str::FromStr;

/// Commands the host can bind to the indicator or expose to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostCommand {
    IndexCodebase,
    SearchCodebase,
    StartAgent,
    OpenComposer,
    ShowBackendInstructions,
    ShowBackendStatus,
}

impl HostCommand {
    pub const ALL: [HostCommand; 6] = [
        HostCommand::IndexCodebase,
        HostCommand::SearchCodebase,
        HostCommand::StartAgent,
        HostCommand::OpenComposer,
        HostCommand::ShowBackendInstructions,
        HostCommand::ShowBackendStatus,
    ];

    /// Stable command identifier as registered with the host.
    pub fn id(&self) -> &'static str {
        match self {
            HostCommand::IndexCodebase => "openflux.indexCodebase",
            HostCommand::SearchCodebase => "openflux.searchCodebase",
            HostCommand::StartAgent => "openflux.startAgent",
            HostCommand::OpenComposer => "openflux.openComposer",
            HostCommand::ShowBackendInstructions => "openflux.showBackendInstructions",
            HostCommand::ShowBackendStatus => "openflux.showBackendStatus",
        }
    }

    /// Human-readable title for command listings.
    pub fn title(&self) -> &'static str {
        match self {
            HostCommand::IndexCodebase => "OpenFlux: Index Codebase",
            HostCommand::SearchCodebase => "OpenFlux: Search Codebase",
            HostCommand::StartAgent => "OpenFlux: Start Agent",
            HostCommand::OpenComposer => "OpenFlux: Open Composer",
            HostCommand::ShowBackendInstructions => "OpenFlux: Show backend instructions",
            HostCommand::ShowBackendStatus => "OpenFlux: Show backend status",
        }
    }
}

impl fmt::Display for HostCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for HostCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HostCommand::ALL
            .into_iter()
            .find(|cmd| cmd.id() == s)
            .ok_or_else(|| format!("unknown command: {}", s))
    }
}

/// Label, tooltip and bound action for the status indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusView {
    pub text: String,
    pub tooltip: String,
    pub command: HostCommand,
}

impl StatusView {
    /// Project a state onto the indicator.
    pub fn for_state(state: ActivityState, endpoint: &BackendEndpoint) -> Self {
        match state {
            ActivityState::Offline => Self {
                text: "$(warning) OpenFlux (backend offline)".to_string(),
                tooltip: "Backend not running. Run: ./scripts/start_server.sh, or use command: \
                          OpenFlux: Show backend instructions"
                    .to_string(),
                command: HostCommand::ShowBackendInstructions,
            },
            ActivityState::Indexing => Self {
                text: "$(sync~spin) OpenFlux (indexing)".to_string(),
                tooltip: "Indexing codebase (in progress)".to_string(),
                command: HostCommand::IndexCodebase,
            },
            ActivityState::Agent => Self {
                text: "$(run) OpenFlux (agent)".to_string(),
                tooltip: "Agent running".to_string(),
                command: HostCommand::StartAgent,
            },
            ActivityState::Idle => Self {
                text: "$(check) OpenFlux".to_string(),
                tooltip: format!("OpenFlux AI Tools, backend at {} (Ready)", endpoint),
                command: HostCommand::SearchCodebase,
            },
        }
    }
}
