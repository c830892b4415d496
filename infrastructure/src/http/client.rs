//! reqwest implementation of the backend client port.

use async_trait::async_trait;
use openflux_application::ports::backend_client::{BackendClient, BackendConnector, BackendError};
use openflux_domain::{
    AgentRequest, AgentResult, BackendEndpoint, HealthResponse, IndexRequest, IndexResponse,
    SearchRequest, SearchResponse,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// HTTP client for the agent backend.
///
/// One `reqwest::Client` per endpoint; every request carries the same
/// timeout and is issued exactly once.
pub struct HttpBackendClient {
    endpoint: BackendEndpoint,
    http: reqwest::Client,
    timeout: Duration,
}

impl HttpBackendClient {
    pub fn new(endpoint: BackendEndpoint, timeout: Duration) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Client(e.to_string()))?;
        Ok(Self {
            endpoint,
            http,
            timeout,
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, BackendError> {
        let url = self.endpoint.join(path);
        debug!("GET {}", url);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        self.decode(response).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, BackendError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint.join(path);
        debug!("POST {}", url);
        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        self.decode(response).await
    }

    async fn decode<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, BackendError> {
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            let detail = extract_detail(&body);
            debug!("Backend returned {} (detail: {:?})", status, detail);
            return Err(BackendError::Http {
                status: status.as_u16(),
                detail,
            });
        }

        serde_json::from_slice(&body).map_err(|e| BackendError::Decode(e.to_string()))
    }

    fn transport_error(&self, error: reqwest::Error) -> BackendError {
        if error.is_timeout() {
            BackendError::Timeout(self.timeout)
        } else {
            BackendError::Transport(error.to_string())
        }
    }
}

/// The backend's structured error detail, if the body carries one.
///
/// A string `detail` is used as is; any other non-null value (validation
/// error lists) is rendered as compact JSON.
fn extract_detail(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    match value.get("detail")? {
        Value::Null => None,
        Value::String(detail) => Some(detail.clone()),
        other => Some(other.to_string()),
    }
}

#[async_trait]
impl BackendClient for HttpBackendClient {
    fn endpoint(&self) -> &BackendEndpoint {
        &self.endpoint
    }

    async fn health_check(&self) -> bool {
        match self.get::<HealthResponse>("/").await {
            Ok(health) => health.is_ok(),
            Err(e) => {
                debug!("Health check against {} failed: {}", self.endpoint, e);
                false
            }
        }
    }

    async fn index_codebase(&self, request: &IndexRequest) -> Result<IndexResponse, BackendError> {
        self.post("/api/index", request).await
    }

    async fn search_codebase(
        &self,
        request: &SearchRequest,
    ) -> Result<SearchResponse, BackendError> {
        self.post("/api/search", request).await
    }

    async fn execute_agent_task(
        &self,
        request: &AgentRequest,
    ) -> Result<AgentResult, BackendError> {
        self.post("/api/agent/execute", request).await
    }

    async fn status(&self) -> Result<Value, BackendError> {
        self.get("/api/status").await
    }
}

/// Builds [`HttpBackendClient`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpBackendConnector;

impl BackendConnector for HttpBackendConnector {
    fn connect(
        &self,
        endpoint: &BackendEndpoint,
        timeout: Duration,
    ) -> Result<Arc<dyn BackendClient>, BackendError> {
        Ok(Arc::new(HttpBackendClient::new(endpoint.clone(), timeout)?))
    }
}
