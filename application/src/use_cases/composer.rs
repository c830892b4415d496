//! Composer panel controller.
//!
//! Handles the inbound half of the composer protocol for one live panel.
//! Every well-formed `send` gets exactly one reply (`response` or `error`),
//! which is what lets the surface clear its "thinking" state.

use crate::ports::backend_client::SharedBackend;
use crate::ports::host::WorkspacePort;
use crate::ports::panel::PanelSurface;
use crate::use_cases::activity_tracker::{ActivityScope, OperationHooks};
use openflux_domain::util::preview;
use openflux_domain::{
    AgentRequest, DEFAULT_MAX_ITERATIONS, Goal, PanelInbound, PanelOutbound, Transcript,
};
use serde_json::Value;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, warn};

/// Reply posted when a goal arrives and no workspace is open.
pub const NO_WORKSPACE_PANEL_MESSAGE: &str = "No workspace folder open. Open a folder first.";

/// Controller for one composer panel instance.
pub struct ComposerController {
    backend: SharedBackend,
    workspace: Arc<dyn WorkspacePort>,
    hooks: Arc<dyn OperationHooks>,
    surface: Arc<dyn PanelSurface>,
    transcript: Arc<Mutex<Transcript>>,
    max_iterations: u32,
}

impl ComposerController {
    pub fn new(
        backend: SharedBackend,
        workspace: Arc<dyn WorkspacePort>,
        hooks: Arc<dyn OperationHooks>,
        surface: Arc<dyn PanelSurface>,
    ) -> Self {
        Self {
            backend,
            workspace,
            hooks,
            surface,
            transcript: Arc::new(Mutex::new(Transcript::new())),
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// The conversation of this panel instance.
    pub fn transcript(&self) -> Arc<Mutex<Transcript>> {
        Arc::clone(&self.transcript)
    }

    /// Handle one raw inbound message.
    ///
    /// Returns `false` when the message was not a well-formed `send` and
    /// was dropped.
    pub async fn handle_message(&self, message: &Value) -> bool {
        let Some(PanelInbound::Send { goal }) = PanelInbound::parse(message) else {
            debug!("Composer: ignoring message {}", message);
            return false;
        };

        self.record(|t| t.push_user(goal.as_str()));

        let Some(workspace) = self.workspace.current_workspace() else {
            self.reply(PanelOutbound::error(NO_WORKSPACE_PANEL_MESSAGE));
            return true;
        };

        let goal = match Goal::new(goal, workspace)
            .and_then(|goal| goal.with_max_iterations(self.max_iterations))
        {
            Ok(goal) => goal,
            Err(e) => {
                self.reply(PanelOutbound::error(e.to_string()));
                return true;
            }
        };

        debug!("Composer: running goal {}", preview(goal.text(), 80));
        let _scope = ActivityScope::enter(self.hooks.as_ref());
        let client = self.backend.current();
        let reply = match client.execute_agent_task(&AgentRequest::from(&goal)).await {
            Ok(result) => PanelOutbound::Response(result),
            Err(e) => {
                warn!("Composer: agent request failed: {}", e);
                PanelOutbound::error(e.user_message())
            }
        };
        self.reply(reply);
        true
    }

    fn reply(&self, message: PanelOutbound) {
        self.record(|t| t.push_assistant(message.summary()));
        self.surface.post(&message);
    }

    fn record(&self, update: impl FnOnce(&mut Transcript)) {
        update(&mut self.transcript.lock().unwrap_or_else(PoisonError::into_inner));
    }
}
