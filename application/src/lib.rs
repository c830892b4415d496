//! Application layer for openflux
//!
//! This crate contains the session orchestration use cases (activity
//! tracking, indexing and agent providers, the composer panel controller,
//! session bootstrap) and the ports they talk to. It depends only on the
//! domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::SessionConfig;
pub use ports::{
    backend_client::{BackendClient, BackendConnector, BackendError, SharedBackend},
    host::{
        DocumentPort, HostError, HostServices, NotificationLevel, NotifierPort, PromptPort,
        PromptRequest, TranscriptLog, WorkspacePort,
    },
    panel::{PanelBinding, PanelEvent, PanelHost, PanelSurface},
    progress::{NoProgress, ProgressHandle, ProgressPort},
    status_indicator::StatusIndicatorPort,
};
pub use use_cases::activity_tracker::{ActivityScope, ActivityTracker, OperationHooks};
pub use use_cases::composer::{ComposerController, NO_WORKSPACE_PANEL_MESSAGE};
pub use use_cases::index_codebase::IndexingProvider;
pub use use_cases::panel_registry::{OpenPanel, PanelRegistry};
pub use use_cases::run_agent::AgentProvider;
pub use use_cases::session::{BACKEND_INSTRUCTIONS, SessionBootstrap, SessionError};
pub use use_cases::shared::{AbortReason, BACKEND_NOT_RUNNING, NO_WORKSPACE, OperationOutcome};
