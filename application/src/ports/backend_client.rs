//! Backend client port
//!
//! Typed proxy over the agent backend's REST API. Every call is a single
//! request with no retry; the only cancellation mechanism is the adapter's
//! request timeout.
//!
//! `health_check` never fails: any transport or decoding problem reads as
//! "unhealthy". The task operations propagate a [`BackendError`] so the
//! caller can show a useful diagnostic.

use async_trait::async_trait;
use openflux_domain::{
    AgentRequest, AgentResult, BackendEndpoint, IndexRequest, IndexResponse, SearchRequest,
    SearchResponse,
};
use serde_json::Value;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use thiserror::Error;

/// Errors from backend task operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("Request failed with status code {status}")]
    Http { status: u16, detail: Option<String> },

    #[error("Invalid response from backend: {0}")]
    Decode(String),

    #[error("Could not create backend client: {0}")]
    Client(String),
}

impl BackendError {
    /// The backend's own error detail, when it sent one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            BackendError::Http {
                detail: Some(detail),
                ..
            } => Some(detail),
            _ => None,
        }
    }

    /// Message shown to the user: the backend detail if present,
    /// otherwise the error's display text.
    pub fn user_message(&self) -> String {
        self.detail()
            .map(str::to_string)
            .unwrap_or_else(|| self.to_string())
    }
}

/// Port for the agent backend.
#[async_trait]
pub trait BackendClient: Send + Sync {
    /// Endpoint this client talks to.
    fn endpoint(&self) -> &BackendEndpoint;

    /// `GET /`: true only when the call succeeds and reports `status == "ok"`.
    async fn health_check(&self) -> bool;

    /// `POST /api/index`
    async fn index_codebase(&self, request: &IndexRequest) -> Result<IndexResponse, BackendError>;

    /// `POST /api/search`
    async fn search_codebase(
        &self,
        request: &SearchRequest,
    ) -> Result<SearchResponse, BackendError>;

    /// `POST /api/agent/execute`
    async fn execute_agent_task(&self, request: &AgentRequest)
    -> Result<AgentResult, BackendError>;

    /// `GET /api/status`: opaque backend status document.
    async fn status(&self) -> Result<Value, BackendError>;
}

/// Builds clients for an endpoint. Used when the configured endpoint changes.
pub trait BackendConnector: Send + Sync {
    fn connect(
        &self,
        endpoint: &BackendEndpoint,
        timeout: Duration,
    ) -> Result<Arc<dyn BackendClient>, BackendError>;
}

/// The session's current backend client.
///
/// Cloned into every provider; replacing the client (endpoint change)
/// affects all holders on their next call. Calls already in flight keep
/// the client they started with.
#[derive(Clone)]
pub struct SharedBackend {
    inner: Arc<RwLock<Arc<dyn BackendClient>>>,
}

impl SharedBackend {
    pub fn new(client: Arc<dyn BackendClient>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(client)),
        }
    }

    pub fn current(&self) -> Arc<dyn BackendClient> {
        Arc::clone(&self.inner.read().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn replace(&self, client: Arc<dyn BackendClient>) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = client;
    }

    pub fn endpoint(&self) -> BackendEndpoint {
        self.current().endpoint().clone()
    }
}
