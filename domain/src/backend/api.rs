//! Request and response bodies of the backend REST API.
//!
//! Response types are lenient: missing fields fall back to defaults and
//! unknown fields are ignored, so a newer backend never breaks the client.

use crate::core::goal::Goal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of `GET /`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthResponse {
    pub status: String,
    pub service: Option<String>,
}

impl HealthResponse {
    /// Only an explicit `"ok"` counts as healthy.
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// Body of `POST /api/index`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRequest {
    pub workspace_path: String,
    pub use_ollama: bool,
}

impl IndexRequest {
    pub fn new(workspace_path: impl Into<String>) -> Self {
        Self {
            workspace_path: workspace_path.into(),
            use_ollama: true,
        }
    }

    pub fn with_use_ollama(mut self, use_ollama: bool) -> Self {
        self.use_ollama = use_ollama;
        self
    }
}

/// Response of `POST /api/index`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexResponse {
    pub status: Option<String>,
    pub message: String,
    pub workspace: Option<String>,
}

/// Body of `POST /api/search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub top_k: usize,
}

impl SearchRequest {
    pub const DEFAULT_TOP_K: usize = 10;

    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            top_k: Self::DEFAULT_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }
}

/// One matching code chunk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchHit {
    pub file_path: String,
    pub start_line: u64,
    pub end_line: u64,
    pub node_type: String,
    pub language: String,
    pub content: String,
}

/// Response of `POST /api/search`. Hits keep the backend's ranking order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResponse {
    pub query: String,
    pub count: usize,
    pub results: Vec<SearchHit>,
}

/// Body of `POST /api/agent/execute`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentRequest {
    pub goal: String,
    pub workspace_path: String,
    pub max_iterations: u32,
}

impl From<&Goal> for AgentRequest {
    fn from(goal: &Goal) -> Self {
        Self {
            goal: goal.text().to_string(),
            workspace_path: goal.workspace_path().to_string_lossy().into_owned(),
            max_iterations: goal.max_iterations(),
        }
    }
}

/// Plan attached to an agent result.
///
/// Only `steps` and `test_command` are surfaced by name; every other field
/// is carried through untouched so the full plan can be shown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentPlan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_command: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response of `POST /api/agent/execute`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentResult {
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iterations: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<AgentPlan>,
}

impl AgentResult {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}
