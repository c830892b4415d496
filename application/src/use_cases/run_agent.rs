//! Agent provider
//!
//! Asks the user for a goal and hands it to the backend agent:
//! 1. Workspace check - the goal runs against the open workspace
//! 2. Goal prompt - an empty or dismissed prompt aborts silently
//! 3. Health probe - an unreachable backend aborts before any state change
//! 4. Execution - the session shows `agent` until the call settles
//! 5. Report - a notification, then the full run appended to the transcript log

use crate::ports::backend_client::SharedBackend;
use crate::ports::host::{HostServices, PromptRequest};
use crate::use_cases::activity_tracker::{ActivityScope, OperationHooks};
use crate::use_cases::shared::{AbortReason, BACKEND_NOT_RUNNING, NO_WORKSPACE, OperationOutcome};
use openflux_domain::util::preview;
use openflux_domain::{
    AgentRequest, AgentResult, DEFAULT_MAX_ITERATIONS, Goal, format_agent_transcript,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Runs one agent task per invocation.
pub struct AgentProvider {
    backend: SharedBackend,
    host: HostServices,
    hooks: Arc<dyn OperationHooks>,
    max_iterations: u32,
}

impl AgentProvider {
    pub fn new(backend: SharedBackend, host: HostServices, hooks: Arc<dyn OperationHooks>) -> Self {
        Self {
            backend,
            host,
            hooks,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub async fn start_agent(&self) -> OperationOutcome {
        let Some(workspace) = self.host.workspace.current_workspace() else {
            self.host.notifier.error(NO_WORKSPACE);
            return OperationOutcome::Aborted(AbortReason::NoWorkspace);
        };

        let request = PromptRequest::new(
            "What would you like the agent to do?",
            "e.g., Refactor the login logic, Add error handling to API routes",
        );
        let Some(text) = self.host.prompt.prompt(&request).await else {
            return OperationOutcome::Aborted(AbortReason::Cancelled);
        };
        if text.trim().is_empty() {
            return OperationOutcome::Aborted(AbortReason::Cancelled);
        }

        let goal = match Goal::new(text, workspace)
            .and_then(|goal| goal.with_max_iterations(self.max_iterations))
        {
            Ok(goal) => goal,
            Err(e) => {
                self.host.notifier.error(&e.to_string());
                return OperationOutcome::Aborted(AbortReason::InvalidInput(e.to_string()));
            }
        };

        let client = self.backend.current();
        if !client.health_check().await {
            self.host.notifier.error(BACKEND_NOT_RUNNING);
            return OperationOutcome::Aborted(AbortReason::BackendUnavailable);
        }

        let _scope = ActivityScope::enter(self.hooks.as_ref());
        let mut progress = self.host.progress.begin("Agent executing task");
        progress.report(None, Some("Planning..."));

        info!(
            "Starting agent (max {} iterations): {}",
            goal.max_iterations(),
            preview(goal.text(), 80)
        );
        match client.execute_agent_task(&AgentRequest::from(&goal)).await {
            Ok(result) => {
                progress.report(Some(100), Some("Done"));
                self.report(&goal, &result);
                OperationOutcome::Completed
            }
            Err(e) => {
                warn!("Agent execution failed: {}", e);
                let message = format!("Agent execution failed: {}", e.user_message());
                self.host.notifier.error(&message);
                OperationOutcome::Failed(message)
            }
        }
    }

    fn report(&self, goal: &Goal, result: &AgentResult) {
        if result.is_success() {
            let message = match result.iterations {
                Some(n) => format!("Agent completed successfully in {} iteration(s)!", n),
                None => "Agent completed successfully!".to_string(),
            };
            self.host.notifier.info(&message);
        } else {
            self.host.notifier.warn(&format!(
                "Agent task {}: {}",
                result.status, result.message
            ));
        }

        for line in format_agent_transcript(goal.text(), result) {
            self.host.transcript.append_line(&line);
        }
        self.host.transcript.reveal();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::backend_client::BackendError;
    use crate::ports::host::NotificationLevel;
    use crate::use_cases::test_support::{MockBackend, RecordingHooks, TestHost};
    use openflux_domain::AgentPlan;

    fn provider(
        backend: &Arc<MockBackend>,
        host: &TestHost,
        hooks: &Arc<RecordingHooks>,
    ) -> AgentProvider {
        AgentProvider::new(backend.shared(), host.services.clone(), hooks.clone())
    }

    #[tokio::test]
    async fn test_no_workspace_is_one_error_and_nothing_else() {
        let backend = MockBackend::healthy();
        let host = TestHost::new(None, vec![Some("Add tests")]);
        let hooks = Arc::new(RecordingHooks::default());

        let outcome = provider(&backend, &host, &hooks).start_agent().await;

        assert_eq!(outcome, OperationOutcome::Aborted(AbortReason::NoWorkspace));
        assert_eq!(
            host.notifier.messages(),
            vec![(NotificationLevel::Error, "No workspace folder open".to_string())]
        );
        assert!(backend.calls().is_empty());
        assert!(hooks.events().is_empty());
        assert!(host.prompt.asked().is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_or_blank_goal_aborts_silently() {
        for answer in [None, Some("   ")] {
            let backend = MockBackend::healthy();
            let host = TestHost::new(Some("/ws"), vec![answer]);
            let hooks = Arc::new(RecordingHooks::default());

            let outcome = provider(&backend, &host, &hooks).start_agent().await;

            assert_eq!(outcome, OperationOutcome::Aborted(AbortReason::Cancelled));
            assert!(host.notifier.messages().is_empty());
            assert!(backend.calls().is_empty());
            assert!(hooks.events().is_empty());
        }
    }

    #[tokio::test]
    async fn test_backend_offline_aborts_before_start() {
        let backend = MockBackend::offline();
        let host = TestHost::new(Some("/ws"), vec![Some("Add tests")]);
        let hooks = Arc::new(RecordingHooks::default());

        let outcome = provider(&backend, &host, &hooks).start_agent().await;

        assert_eq!(
            outcome,
            OperationOutcome::Aborted(AbortReason::BackendUnavailable)
        );
        assert_eq!(host.notifier.of_level(NotificationLevel::Error), vec![BACKEND_NOT_RUNNING]);
        assert_eq!(backend.count("agent"), 0);
        assert!(hooks.events().is_empty());
    }

    #[tokio::test]
    async fn test_success_reports_iterations_and_transcript() {
        let backend = MockBackend::healthy();
        backend.set_agent_result(Ok(AgentResult {
            status: "success".to_string(),
            message: "Added error handling".to_string(),
            iterations: Some(2),
            plan: Some(AgentPlan {
                steps: Some(vec![serde_json::json!("edit api.ts")]),
                test_command: Some("npm test".to_string()),
                ..Default::default()
            }),
        }));
        let host = TestHost::new(Some("/ws"), vec![Some("  Add error handling ")]);
        let hooks = Arc::new(RecordingHooks::default());

        let outcome = provider(&backend, &host, &hooks)
            .with_max_iterations(7)
            .start_agent()
            .await;

        assert_eq!(outcome, OperationOutcome::Completed);
        assert_eq!(
            host.notifier.of_level(NotificationLevel::Info),
            vec!["Agent completed successfully in 2 iteration(s)!"]
        );

        let request = backend.last_agent_request().unwrap();
        assert_eq!(request.goal, "Add error handling");
        assert_eq!(request.workspace_path, "/ws");
        assert_eq!(request.max_iterations, 7);

        let lines = host.transcript.lines();
        assert_eq!(lines[0], "Goal: Add error handling");
        assert_eq!(lines[1], "Status: success");
        assert_eq!(lines[2], "Message: Added error handling");
        assert_eq!(lines[4], "Plan:");
        assert!(lines[5].contains("npm test"));
        assert_eq!(host.transcript.reveals(), 1);
        assert_eq!(hooks.events(), vec!["start", "end"]);
    }

    #[tokio::test]
    async fn test_non_success_status_is_a_warning() {
        let backend = MockBackend::healthy();
        backend.set_agent_result(Ok(AgentResult {
            status: "max_iterations".to_string(),
            message: "Tests still failing".to_string(),
            iterations: Some(5),
            plan: None,
        }));
        let host = TestHost::new(Some("/ws"), vec![Some("Fix tests")]);
        let hooks = Arc::new(RecordingHooks::default());

        provider(&backend, &host, &hooks).start_agent().await;

        assert_eq!(
            host.notifier.of_level(NotificationLevel::Warning),
            vec!["Agent task max_iterations: Tests still failing"]
        );
        assert_eq!(host.transcript.lines().len(), 3);
    }

    #[tokio::test]
    async fn test_failure_reports_and_ends_operation() {
        let backend = MockBackend::healthy();
        backend.set_agent_result(Err(BackendError::Http {
            status: 500,
            detail: Some("Agent crashed".to_string()),
        }));
        let host = TestHost::new(Some("/ws"), vec![Some("Fix tests")]);
        let hooks = Arc::new(RecordingHooks::default());

        let outcome = provider(&backend, &host, &hooks).start_agent().await;

        assert_eq!(
            outcome,
            OperationOutcome::Failed("Agent execution failed: Agent crashed".to_string())
        );
        assert_eq!(hooks.events(), vec!["start", "end"]);
        assert!(host.transcript.lines().is_empty());
        assert_eq!(host.progress.events().last().unwrap(), "end");
    }

    #[tokio::test]
    async fn test_out_of_range_iterations_rejected() {
        let backend = MockBackend::healthy();
        let host = TestHost::new(Some("/ws"), vec![Some("Fix tests")]);
        let hooks = Arc::new(RecordingHooks::default());

        let outcome = provider(&backend, &host, &hooks)
            .with_max_iterations(0)
            .start_agent()
            .await;

        assert!(matches!(
            outcome,
            OperationOutcome::Aborted(AbortReason::InvalidInput(_))
        ));
        assert!(backend.calls().is_empty());
    }
}
