//! Mock ports shared by the use case tests.

use crate::ports::backend_client::{BackendClient, BackendConnector, BackendError, SharedBackend};
use crate::ports::host::{
    DocumentPort, HostError, HostServices, NotificationLevel, NotifierPort, PromptPort,
    PromptRequest, TranscriptLog, WorkspacePort,
};
use crate::ports::panel::{PanelBinding, PanelEvent, PanelHost, PanelSurface};
use crate::ports::progress::{ProgressHandle, ProgressPort};
use crate::ports::status_indicator::StatusIndicatorPort;
use crate::use_cases::activity_tracker::OperationHooks;
use async_trait::async_trait;
use openflux_domain::{
    AgentRequest, AgentResult, BackendEndpoint, IndexRequest, IndexResponse, PanelKind,
    PanelOutbound, SearchRequest, SearchResponse, StatusView,
};
use serde_json::Value;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

// ==================== Backend ====================

pub(crate) struct MockBackend {
    endpoint: BackendEndpoint,
    healthy: AtomicBool,
    calls: Mutex<Vec<String>>,
    index_result: Mutex<Result<IndexResponse, BackendError>>,
    search_result: Mutex<Result<SearchResponse, BackendError>>,
    agent_result: Mutex<Result<AgentResult, BackendError>>,
    status_result: Mutex<Result<Value, BackendError>>,
    last_agent_request: Mutex<Option<AgentRequest>>,
    last_index_request: Mutex<Option<IndexRequest>>,
    last_search_request: Mutex<Option<SearchRequest>>,
}

impl MockBackend {
    fn with_health(healthy: bool) -> Arc<Self> {
        Arc::new(Self {
            endpoint: BackendEndpoint::default(),
            healthy: AtomicBool::new(healthy),
            calls: Mutex::new(Vec::new()),
            index_result: Mutex::new(Ok(IndexResponse {
                status: Some("started".to_string()),
                message: "Indexing started in background".to_string(),
                workspace: None,
            })),
            search_result: Mutex::new(Ok(SearchResponse::default())),
            agent_result: Mutex::new(Ok(AgentResult {
                status: "success".to_string(),
                message: "done".to_string(),
                iterations: Some(1),
                plan: None,
            })),
            status_result: Mutex::new(Ok(serde_json::json!({"indexed": true}))),
            last_agent_request: Mutex::new(None),
            last_index_request: Mutex::new(None),
            last_search_request: Mutex::new(None),
        })
    }

    pub(crate) fn healthy() -> Arc<Self> {
        Self::with_health(true)
    }

    pub(crate) fn offline() -> Arc<Self> {
        Self::with_health(false)
    }

    pub(crate) fn at(endpoint: &str, healthy: bool) -> Arc<Self> {
        let mut backend = Self::with_health(healthy);
        if let Some(inner) = Arc::get_mut(&mut backend) {
            inner.endpoint = BackendEndpoint::parse(endpoint).unwrap();
        }
        backend
    }

    pub(crate) fn shared(self: &Arc<Self>) -> SharedBackend {
        SharedBackend::new(self.clone())
    }

    pub(crate) fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::SeqCst);
    }

    pub(crate) fn set_index_result(&self, result: Result<IndexResponse, BackendError>) {
        *self.index_result.lock().unwrap() = result;
    }

    pub(crate) fn set_search_result(&self, result: Result<SearchResponse, BackendError>) {
        *self.search_result.lock().unwrap() = result;
    }

    pub(crate) fn set_agent_result(&self, result: Result<AgentResult, BackendError>) {
        *self.agent_result.lock().unwrap() = result;
    }

    pub(crate) fn set_status_result(&self, result: Result<Value, BackendError>) {
        *self.status_result.lock().unwrap() = result;
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn count(&self, name: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == name).count()
    }

    pub(crate) fn last_agent_request(&self) -> Option<AgentRequest> {
        self.last_agent_request.lock().unwrap().clone()
    }

    pub(crate) fn last_index_request(&self) -> Option<IndexRequest> {
        self.last_index_request.lock().unwrap().clone()
    }

    pub(crate) fn last_search_request(&self) -> Option<SearchRequest> {
        self.last_search_request.lock().unwrap().clone()
    }

    fn record(&self, name: &str) {
        self.calls.lock().unwrap().push(name.to_string());
    }
}

#[async_trait]
impl BackendClient for MockBackend {
    fn endpoint(&self) -> &BackendEndpoint {
        &self.endpoint
    }

    async fn health_check(&self) -> bool {
        self.record("health");
        self.healthy.load(Ordering::SeqCst)
    }

    async fn index_codebase(&self, request: &IndexRequest) -> Result<IndexResponse, BackendError> {
        self.record("index");
        *self.last_index_request.lock().unwrap() = Some(request.clone());
        self.index_result.lock().unwrap().clone()
    }

    async fn search_codebase(
        &self,
        request: &SearchRequest,
    ) -> Result<SearchResponse, BackendError> {
        self.record("search");
        *self.last_search_request.lock().unwrap() = Some(request.clone());
        self.search_result.lock().unwrap().clone()
    }

    async fn execute_agent_task(
        &self,
        request: &AgentRequest,
    ) -> Result<AgentResult, BackendError> {
        self.record("agent");
        *self.last_agent_request.lock().unwrap() = Some(request.clone());
        self.agent_result.lock().unwrap().clone()
    }

    async fn status(&self) -> Result<Value, BackendError> {
        self.record("status");
        self.status_result.lock().unwrap().clone()
    }
}

/// Connector that hands out pre-built mock backends keyed by endpoint.
#[derive(Default)]
pub(crate) struct MockConnector {
    backends: Mutex<Vec<Arc<MockBackend>>>,
    connects: AtomicUsize,
}

impl MockConnector {
    pub(crate) fn with(backends: Vec<Arc<MockBackend>>) -> Arc<Self> {
        Arc::new(Self {
            backends: Mutex::new(backends),
            connects: AtomicUsize::new(0),
        })
    }

    pub(crate) fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }
}

impl BackendConnector for MockConnector {
    fn connect(
        &self,
        endpoint: &BackendEndpoint,
        _timeout: Duration,
    ) -> Result<Arc<dyn BackendClient>, BackendError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        self.backends
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.endpoint() == endpoint)
            .map(|b| b.clone() as Arc<dyn BackendClient>)
            .ok_or_else(|| BackendError::Client(format!("no mock for {}", endpoint)))
    }
}

// ==================== Host ====================

pub(crate) struct FixedWorkspace(pub Option<PathBuf>);

impl WorkspacePort for FixedWorkspace {
    fn current_workspace(&self) -> Option<PathBuf> {
        self.0.clone()
    }
}

#[derive(Default)]
pub(crate) struct ScriptedPrompt {
    answers: Mutex<VecDeque<Option<String>>>,
    asked: Mutex<Vec<PromptRequest>>,
}

impl ScriptedPrompt {
    pub(crate) fn answering(answers: Vec<Option<&str>>) -> Arc<Self> {
        Arc::new(Self {
            answers: Mutex::new(
                answers
                    .into_iter()
                    .map(|a| a.map(str::to_string))
                    .collect(),
            ),
            asked: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn asked(&self) -> Vec<PromptRequest> {
        self.asked.lock().unwrap().clone()
    }
}

#[async_trait]
impl PromptPort for ScriptedPrompt {
    async fn prompt(&self, request: &PromptRequest) -> Option<String> {
        self.asked.lock().unwrap().push(request.clone());
        self.answers.lock().unwrap().pop_front().flatten()
    }
}

#[derive(Default)]
pub(crate) struct RecordingNotifier {
    messages: Mutex<Vec<(NotificationLevel, String)>>,
}

impl RecordingNotifier {
    pub(crate) fn messages(&self) -> Vec<(NotificationLevel, String)> {
        self.messages.lock().unwrap().clone()
    }

    pub(crate) fn of_level(&self, level: NotificationLevel) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }
}

impl NotifierPort for RecordingNotifier {
    fn notify(&self, level: NotificationLevel, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push((level, message.to_string()));
    }
}

#[derive(Default)]
pub(crate) struct RecordingDocuments {
    opened: Mutex<Vec<String>>,
    fail: AtomicBool,
}

impl RecordingDocuments {
    pub(crate) fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }

    pub(crate) fn fail_next(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl DocumentPort for RecordingDocuments {
    async fn open_markdown(&self, content: &str) -> Result<(), HostError> {
        if self.fail.swap(false, Ordering::SeqCst) {
            return Err(HostError::Unavailable("no editor".to_string()));
        }
        self.opened.lock().unwrap().push(content.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct RecordingTranscript {
    lines: Mutex<Vec<String>>,
    reveals: AtomicUsize,
}

impl RecordingTranscript {
    pub(crate) fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    pub(crate) fn reveals(&self) -> usize {
        self.reveals.load(Ordering::SeqCst)
    }
}

impl TranscriptLog for RecordingTranscript {
    fn append_line(&self, line: &str) {
        self.lines.lock().unwrap().push(line.to_string());
    }

    fn reveal(&self) {
        self.reveals.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub(crate) struct RecordingProgress {
    events: Arc<Mutex<Vec<String>>>,
}

impl RecordingProgress {
    pub(crate) fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

struct RecordingProgressHandle {
    events: Arc<Mutex<Vec<String>>>,
}

impl ProgressHandle for RecordingProgressHandle {
    fn report(&mut self, increment: Option<u32>, message: Option<&str>) {
        self.events.lock().unwrap().push(format!(
            "report {} {}",
            increment.unwrap_or_default(),
            message.unwrap_or("")
        ));
    }
}

impl Drop for RecordingProgressHandle {
    fn drop(&mut self) {
        self.events.lock().unwrap().push("end".to_string());
    }
}

impl ProgressPort for RecordingProgress {
    fn begin(&self, title: &str) -> Box<dyn ProgressHandle> {
        self.events.lock().unwrap().push(format!("begin {}", title));
        Box::new(RecordingProgressHandle {
            events: self.events.clone(),
        })
    }
}

#[derive(Default)]
pub(crate) struct RecordingIndicator {
    views: Mutex<Vec<StatusView>>,
}

impl RecordingIndicator {
    pub(crate) fn views(&self) -> Vec<StatusView> {
        self.views.lock().unwrap().clone()
    }

    pub(crate) fn last(&self) -> Option<StatusView> {
        self.views.lock().unwrap().last().cloned()
    }
}

impl StatusIndicatorPort for RecordingIndicator {
    fn show(&self, view: &StatusView) {
        self.views.lock().unwrap().push(view.clone());
    }
}

#[derive(Default)]
pub(crate) struct RecordingHooks {
    events: Mutex<Vec<&'static str>>,
}

impl RecordingHooks {
    pub(crate) fn events(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().clone()
    }
}

impl OperationHooks for RecordingHooks {
    fn on_start(&self) {
        self.events.lock().unwrap().push("start");
    }

    fn on_end(&self) {
        self.events.lock().unwrap().push("end");
    }
}

/// All recording host adapters, plus the bundle built from them.
pub(crate) struct TestHost {
    pub prompt: Arc<ScriptedPrompt>,
    pub notifier: Arc<RecordingNotifier>,
    pub documents: Arc<RecordingDocuments>,
    pub transcript: Arc<RecordingTranscript>,
    pub progress: Arc<RecordingProgress>,
    pub services: HostServices,
}

impl TestHost {
    pub(crate) fn new(workspace: Option<&str>, answers: Vec<Option<&str>>) -> Self {
        let prompt = ScriptedPrompt::answering(answers);
        let notifier = Arc::new(RecordingNotifier::default());
        let documents = Arc::new(RecordingDocuments::default());
        let transcript = Arc::new(RecordingTranscript::default());
        let progress = Arc::new(RecordingProgress::default());
        let services = HostServices {
            workspace: Arc::new(FixedWorkspace(workspace.map(PathBuf::from))),
            prompt: prompt.clone(),
            notifier: notifier.clone(),
            documents: documents.clone(),
            transcript: transcript.clone(),
            progress: progress.clone(),
        };
        Self {
            prompt,
            notifier,
            documents,
            transcript,
            progress,
            services,
        }
    }
}

// ==================== Panels ====================

#[derive(Default)]
pub(crate) struct RecordingSurface {
    posted: Mutex<Vec<PanelOutbound>>,
    reveals: AtomicUsize,
}

impl RecordingSurface {
    pub(crate) fn posted(&self) -> Vec<PanelOutbound> {
        self.posted.lock().unwrap().clone()
    }

    pub(crate) fn reveals(&self) -> usize {
        self.reveals.load(Ordering::SeqCst)
    }
}

impl PanelSurface for RecordingSurface {
    fn post(&self, message: &PanelOutbound) {
        self.posted.lock().unwrap().push(message.clone());
    }

    fn reveal(&self) {
        self.reveals.fetch_add(1, Ordering::SeqCst);
    }
}

/// Panel host that keeps the sending half of every panel it creates so
/// tests can play the surface.
#[derive(Default)]
pub(crate) struct MockPanelHost {
    created: Mutex<Vec<(Arc<RecordingSurface>, mpsc::UnboundedSender<PanelEvent>)>>,
}

impl MockPanelHost {
    pub(crate) fn created(&self) -> usize {
        self.created.lock().unwrap().len()
    }

    pub(crate) fn surface(&self, index: usize) -> Arc<RecordingSurface> {
        self.created.lock().unwrap()[index].0.clone()
    }

    pub(crate) fn send(&self, index: usize, event: PanelEvent) {
        let _ = self.created.lock().unwrap()[index].1.send(event);
    }
}

impl PanelHost for MockPanelHost {
    fn create_panel(&self, _kind: PanelKind) -> Result<PanelBinding, HostError> {
        let surface = Arc::new(RecordingSurface::default());
        let (tx, rx) = mpsc::unbounded_channel();
        self.created.lock().unwrap().push((surface.clone(), tx));
        Ok(PanelBinding {
            surface,
            events: rx,
        })
    }
}
