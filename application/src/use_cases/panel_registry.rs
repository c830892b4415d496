//! Registry of live interactive panels.
//!
//! At most one panel per [`PanelKind`] is live. Opening a kind that is
//! already open reveals it; dismissing a panel frees its slot so the next
//! open creates a fresh instance with an empty transcript.

use crate::ports::backend_client::SharedBackend;
use crate::ports::host::{HostError, WorkspacePort};
use crate::ports::panel::{PanelEvent, PanelHost, PanelSurface};
use crate::use_cases::activity_tracker::OperationHooks;
use crate::use_cases::composer::ComposerController;
use openflux_domain::{DEFAULT_MAX_ITERATIONS, PanelKind, Transcript};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, Weak};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// What `open_composer` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenPanel {
    Created,
    Revealed,
}

struct LivePanel {
    generation: u64,
    surface: Arc<dyn PanelSurface>,
    transcript: Arc<Mutex<Transcript>>,
    listener: Option<JoinHandle<()>>,
}

pub struct PanelRegistry {
    backend: SharedBackend,
    host: Arc<dyn PanelHost>,
    workspace: Arc<dyn WorkspacePort>,
    hooks: Arc<dyn OperationHooks>,
    max_iterations: u32,
    slots: Mutex<HashMap<PanelKind, LivePanel>>,
    generation: Mutex<u64>,
}

impl PanelRegistry {
    pub fn new(
        backend: SharedBackend,
        host: Arc<dyn PanelHost>,
        workspace: Arc<dyn WorkspacePort>,
        hooks: Arc<dyn OperationHooks>,
    ) -> Self {
        Self {
            backend,
            host,
            workspace,
            hooks,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            slots: Mutex::new(HashMap::new()),
            generation: Mutex::new(0),
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Open the composer, or reveal it if it is already open.
    ///
    /// Must be called from within a tokio runtime: the new panel's message
    /// listener runs as a spawned task.
    pub fn open_composer(self: &Arc<Self>) -> Result<OpenPanel, HostError> {
        let kind = PanelKind::Composer;
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(live) = slots.get(&kind) {
            debug!("Panel {} already open, revealing", kind.view_type());
            live.surface.reveal();
            return Ok(OpenPanel::Revealed);
        }

        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|_| HostError::Unavailable("no async runtime for panel".to_string()))?;

        let binding = self.host.create_panel(kind)?;
        let controller = ComposerController::new(
            self.backend.clone(),
            Arc::clone(&self.workspace),
            Arc::clone(&self.hooks),
            Arc::clone(&binding.surface),
        )
        .with_max_iterations(self.max_iterations);

        let generation = self.next_generation();
        let transcript = controller.transcript();
        let listener = runtime.spawn(listen(
            Arc::downgrade(self),
            kind,
            generation,
            controller,
            binding.events,
        ));

        info!("Opened panel {}", kind.title());
        slots.insert(
            kind,
            LivePanel {
                generation,
                surface: binding.surface,
                transcript,
                listener: Some(listener),
            },
        );
        Ok(OpenPanel::Created)
    }

    pub fn is_open(&self, kind: PanelKind) -> bool {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&kind)
    }

    /// Snapshot of the live panel's conversation.
    pub fn transcript(&self, kind: PanelKind) -> Option<Transcript> {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        let live = slots.get(&kind)?;
        let transcript = live
            .transcript
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        Some(transcript)
    }

    /// Wait until the live panel of `kind` is dismissed.
    pub async fn join(&self, kind: PanelKind) {
        let listener = self
            .slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get_mut(&kind)
            .and_then(|live| live.listener.take());
        if let Some(listener) = listener {
            let _ = listener.await;
        }
    }

    /// Drop every live panel and stop its listener.
    pub fn close_all(&self) {
        let drained: Vec<LivePanel> = self
            .slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain()
            .map(|(_, live)| live)
            .collect();
        for live in drained {
            if let Some(listener) = live.listener {
                listener.abort();
            }
        }
    }

    fn next_generation(&self) -> u64 {
        let mut generation = self.generation.lock().unwrap_or_else(PoisonError::into_inner);
        *generation += 1;
        *generation
    }

    fn release(&self, kind: PanelKind, generation: u64) {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        if slots.get(&kind).is_some_and(|live| live.generation == generation) {
            slots.remove(&kind);
            info!("Closed panel {}", kind.title());
        }
    }
}

/// Drain one panel's events in order until it is dismissed.
async fn listen(
    registry: Weak<PanelRegistry>,
    kind: PanelKind,
    generation: u64,
    controller: ComposerController,
    mut events: mpsc::UnboundedReceiver<PanelEvent>,
) {
    while let Some(event) = events.recv().await {
        match event {
            PanelEvent::Message(message) => {
                controller.handle_message(&message).await;
            }
            PanelEvent::Disposed => break,
        }
    }
    if let Some(registry) = registry.upgrade() {
        registry.release(kind, generation);
    }
}
