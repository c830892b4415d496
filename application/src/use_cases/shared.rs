//! Shared outcome types and user-facing messages for use cases.

/// Shown when an operation needs a workspace and none is open.
pub const NO_WORKSPACE: &str = "No workspace folder open";

/// Shown when the pre-operation health probe fails.
pub const BACKEND_NOT_RUNNING: &str =
    "OpenFlux API server is not running. Please start it with: ./scripts/start_server.sh";

/// Why an operation stopped before reaching the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbortReason {
    NoWorkspace,
    /// The user dismissed or left a prompt empty.
    Cancelled,
    BackendUnavailable,
    InvalidInput(String),
}

/// Result of one provider invocation, as seen by the caller.
///
/// User feedback has already been delivered through the host by the time
/// this is returned; the outcome exists for callers and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationOutcome {
    /// The backend call returned a response.
    Completed,
    /// The backend call failed; carries the message shown to the user.
    Failed(String),
    /// A precondition stopped the operation; nothing was sent.
    Aborted(AbortReason),
}

impl OperationOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, OperationOutcome::Completed)
    }
}
