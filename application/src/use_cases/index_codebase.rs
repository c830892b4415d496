//! Indexing and search provider.
//!
//! Indexing marks the session busy for the duration of the backend call.
//! Search only probes connectivity and shows progress; it has no activity
//! state of its own.

use crate::ports::backend_client::SharedBackend;
use crate::ports::host::{HostServices, PromptRequest};
use crate::use_cases::activity_tracker::{ActivityScope, OperationHooks};
use crate::use_cases::shared::{AbortReason, BACKEND_NOT_RUNNING, NO_WORKSPACE, OperationOutcome};
use openflux_domain::{IndexRequest, SearchRequest, format_search_results};
use std::sync::Arc;
use tracing::{info, warn};

/// Runs `index` and `search` against the current backend.
pub struct IndexingProvider {
    backend: SharedBackend,
    host: HostServices,
    hooks: Arc<dyn OperationHooks>,
    use_ollama: bool,
    top_k: usize,
}

impl IndexingProvider {
    pub fn new(backend: SharedBackend, host: HostServices, hooks: Arc<dyn OperationHooks>) -> Self {
        Self {
            backend,
            host,
            hooks,
            use_ollama: true,
            top_k: SearchRequest::DEFAULT_TOP_K,
        }
    }

    pub fn with_use_ollama(mut self, use_ollama: bool) -> Self {
        self.use_ollama = use_ollama;
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Index the current workspace.
    pub async fn index_workspace(&self) -> OperationOutcome {
        let Some(workspace) = self.host.workspace.current_workspace() else {
            self.host.notifier.error(NO_WORKSPACE);
            return OperationOutcome::Aborted(AbortReason::NoWorkspace);
        };

        let client = self.backend.current();
        if !client.health_check().await {
            self.host.notifier.error(BACKEND_NOT_RUNNING);
            return OperationOutcome::Aborted(AbortReason::BackendUnavailable);
        }

        let _scope = ActivityScope::enter(self.hooks.as_ref());
        let mut progress = self.host.progress.begin("Indexing codebase");
        progress.report(None, Some("Starting index..."));

        let request =
            IndexRequest::new(workspace.to_string_lossy()).with_use_ollama(self.use_ollama);
        info!("Indexing {}", request.workspace_path);

        match client.index_codebase(&request).await {
            Ok(response) => {
                progress.report(Some(100), Some("Indexing started"));
                self.host
                    .notifier
                    .info(&format!("Indexing started: {}", response.message));
                OperationOutcome::Completed
            }
            Err(e) => {
                warn!("Indexing failed: {}", e);
                let message = format!("Failed to index codebase: {}", e.user_message());
                self.host.notifier.error(&message);
                OperationOutcome::Failed(message)
            }
        }
    }

    /// Ask for a query, search the index and open the results as a document.
    pub async fn search_codebase(&self) -> OperationOutcome {
        let request = PromptRequest::new("Search codebase", "Enter your search query...");
        let query = match self.host.prompt.prompt(&request).await {
            Some(query) if !query.trim().is_empty() => query.trim().to_string(),
            _ => return OperationOutcome::Aborted(AbortReason::Cancelled),
        };

        let client = self.backend.current();
        if !client.health_check().await {
            self.host.notifier.error(BACKEND_NOT_RUNNING);
            return OperationOutcome::Aborted(AbortReason::BackendUnavailable);
        }

        let mut progress = self.host.progress.begin("Searching codebase");
        progress.report(None, Some(&format!("Searching for \"{}\"...", query)));

        let request = SearchRequest::new(query).with_top_k(self.top_k);
        let response = match client.search_codebase(&request).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Search failed: {}", e);
                let message = format!("Search failed: {}", e.user_message());
                self.host.notifier.error(&message);
                return OperationOutcome::Failed(message);
            }
        };
        info!("Search returned {} results", response.count);

        let document = format_search_results(&response);
        if let Err(e) = self.host.documents.open_markdown(&document).await {
            let message = format!("Search failed: {}", e);
            self.host.notifier.error(&message);
            return OperationOutcome::Failed(message);
        }
        OperationOutcome::Completed
    }
}
