//! Session bootstrap
//!
//! Composition of one orchestration session: the activity tracker, the two
//! operation providers and the panel registry, all sharing one backend
//! client. Host commands are routed through [`SessionBootstrap::dispatch`].

use crate::config::SessionConfig;
use crate::ports::backend_client::{BackendConnector, BackendError, SharedBackend};
use crate::ports::host::{HostError, HostServices};
use crate::ports::panel::PanelHost;
use crate::ports::status_indicator::StatusIndicatorPort;
use crate::use_cases::activity_tracker::ActivityTracker;
use crate::use_cases::index_codebase::IndexingProvider;
use crate::use_cases::panel_registry::{OpenPanel, PanelRegistry};
use crate::use_cases::run_agent::AgentProvider;
use crate::use_cases::shared::OperationOutcome;
use openflux_domain::{ActivityState, BackendEndpoint, DomainError, HostCommand, OperationKind};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Shown by the "show backend instructions" command.
pub const BACKEND_INSTRUCTIONS: &str = "OpenFlux backend: from the repo root run ./scripts/start_server.sh (or install as service, see docs/BACKEND.md).";

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    InvalidEndpoint(#[from] DomainError),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Host(#[from] HostError),
}

pub struct SessionBootstrap {
    config: SessionConfig,
    backend: SharedBackend,
    connector: Arc<dyn BackendConnector>,
    host: HostServices,
    tracker: Arc<ActivityTracker>,
    indexing: IndexingProvider,
    agent: AgentProvider,
    panels: Arc<PanelRegistry>,
}

impl SessionBootstrap {
    pub fn new(
        config: SessionConfig,
        connector: Arc<dyn BackendConnector>,
        host: HostServices,
        indicator: Arc<dyn StatusIndicatorPort>,
        panel_host: Arc<dyn PanelHost>,
    ) -> Result<Self, SessionError> {
        let client = connector.connect(&config.endpoint, config.request_timeout)?;
        let backend = SharedBackend::new(client);
        let tracker = ActivityTracker::new(backend.clone(), indicator);

        let indexing = IndexingProvider::new(
            backend.clone(),
            host.clone(),
            tracker.hooks(OperationKind::Indexing),
        )
        .with_use_ollama(config.use_ollama)
        .with_top_k(config.search_top_k);

        let agent = AgentProvider::new(
            backend.clone(),
            host.clone(),
            tracker.hooks(OperationKind::Agent),
        )
        .with_max_iterations(config.max_iterations);

        let panels = PanelRegistry::new(
            backend.clone(),
            panel_host,
            Arc::clone(&host.workspace),
            tracker.hooks(OperationKind::Agent),
        )
        .with_max_iterations(config.max_iterations);

        Ok(Self {
            config,
            backend,
            connector,
            host,
            tracker,
            indexing,
            agent,
            panels: Arc::new(panels),
        })
    }

    /// Render the initial indicator and probe the backend once.
    pub async fn start(&self) -> ActivityState {
        info!("Session started against {}", self.backend.endpoint());
        self.tracker.refresh();
        let state = self.tracker.probe().await;
        if state == ActivityState::Offline {
            warn!("Backend at {} is not reachable", self.backend.endpoint());
        }
        state
    }

    pub async fn dispatch(&self, command: HostCommand) -> OperationOutcome {
        info!("Command: {}", command.id());
        match command {
            HostCommand::IndexCodebase => self.indexing.index_workspace().await,
            HostCommand::SearchCodebase => self.indexing.search_codebase().await,
            HostCommand::StartAgent => self.agent.start_agent().await,
            HostCommand::OpenComposer => match self.panels.open_composer() {
                Ok(OpenPanel::Created | OpenPanel::Revealed) => OperationOutcome::Completed,
                Err(e) => {
                    let message = format!("Failed to open composer: {}", e);
                    self.host.notifier.error(&message);
                    OperationOutcome::Failed(message)
                }
            },
            HostCommand::ShowBackendInstructions => {
                self.host.notifier.info(BACKEND_INSTRUCTIONS);
                OperationOutcome::Completed
            }
            HostCommand::ShowBackendStatus => self.show_backend_status().await,
        }
    }

    /// Point the session at a new backend URL.
    ///
    /// Operations already in flight finish against the old client.
    pub async fn on_endpoint_changed(&self, url: &str) -> Result<ActivityState, SessionError> {
        let endpoint = BackendEndpoint::parse(url)?;
        if endpoint == self.backend.endpoint() {
            return Ok(self.tracker.state());
        }
        let client = self
            .connector
            .connect(&endpoint, self.config.request_timeout)?;
        self.backend.replace(client);
        info!("Backend endpoint changed to {}", endpoint);

        self.tracker.refresh();
        Ok(self.tracker.probe().await)
    }

    pub fn state(&self) -> ActivityState {
        self.tracker.state()
    }

    pub fn endpoint(&self) -> BackendEndpoint {
        self.backend.endpoint()
    }

    pub fn tracker(&self) -> &Arc<ActivityTracker> {
        &self.tracker
    }

    pub fn panels(&self) -> &Arc<PanelRegistry> {
        &self.panels
    }

    /// Close panels and wait for the last background probe.
    pub async fn shutdown(&self) {
        self.panels.close_all();
        self.tracker.settle().await;
        info!("Session closed");
    }

    async fn show_backend_status(&self) -> OperationOutcome {
        match self.backend.current().status().await {
            Ok(status) => {
                let pretty = serde_json::to_string_pretty(&status).unwrap_or_default();
                self.host.transcript.append_line("Backend status:");
                for line in pretty.lines() {
                    self.host.transcript.append_line(line);
                }
                self.host.transcript.reveal();
                OperationOutcome::Completed
            }
            Err(e) => {
                let message = format!("Failed to fetch backend status: {}", e.user_message());
                self.host.notifier.error(&message);
                OperationOutcome::Failed(message)
            }
        }
    }
}
