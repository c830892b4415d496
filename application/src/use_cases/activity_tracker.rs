//! The session's single activity state machine.
//!
//! [`ActivityTracker`] owns the one [`ActivityState`] value of the session
//! and is the only code that mutates it. Every transition re-renders the
//! status indicator through [`StatusIndicatorPort`].
//!
//! Providers never see the tracker. They receive an [`OperationHooks`]
//! pair and wrap their backend call in an [`ActivityScope`], which fires
//! `on_start` on entry and `on_end` when dropped, on every exit path.
//!
//! # Overlapping operations
//!
//! The state is a single last-write-wins value. If indexing starts while
//! an agent run is in flight, the indicator shows `indexing`, and whichever
//! operation ends first sets it back to `idle` while the other is still
//! running. Operations are not queued or serialized.

use crate::ports::backend_client::SharedBackend;
use crate::ports::status_indicator::StatusIndicatorPort;
use openflux_domain::{ActivityState, OperationKind, StatusView};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::task::JoinHandle;
use tracing::debug;

/// Start/end notifications for one kind of operation.
pub trait OperationHooks: Send + Sync {
    fn on_start(&self);
    fn on_end(&self);
}

/// Guard marking an operation as running.
///
/// `on_end` runs exactly once, when the guard is dropped, whether the
/// operation returned normally, returned early, or panicked.
pub struct ActivityScope<'a> {
    hooks: &'a dyn OperationHooks,
}

impl<'a> ActivityScope<'a> {
    pub fn enter(hooks: &'a dyn OperationHooks) -> Self {
        hooks.on_start();
        Self { hooks }
    }
}

impl Drop for ActivityScope<'_> {
    fn drop(&mut self) {
        self.hooks.on_end();
    }
}

/// The session's activity state machine.
pub struct ActivityTracker {
    state: Mutex<ActivityState>,
    backend: SharedBackend,
    indicator: Arc<dyn StatusIndicatorPort>,
    pending_probe: Mutex<Option<JoinHandle<()>>>,
}

impl ActivityTracker {
    pub fn new(backend: SharedBackend, indicator: Arc<dyn StatusIndicatorPort>) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(ActivityState::Idle),
            backend,
            indicator,
            pending_probe: Mutex::new(None),
        })
    }

    pub fn state(&self) -> ActivityState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Mark an operation as started.
    pub fn begin(&self, kind: OperationKind) {
        debug!("Activity: {} started", kind);
        self.transition(|_| kind.busy_state());
    }

    /// Mark the current operation as finished and schedule a background
    /// connectivity probe.
    pub fn finish(self: &Arc<Self>) {
        self.transition(|_| ActivityState::Idle);
        self.schedule_probe();
    }

    /// Probe the backend now and apply the result.
    pub async fn probe(&self) -> ActivityState {
        let client = self.backend.current();
        let healthy = client.health_check().await;
        debug!("Activity: probe of {} -> healthy={}", client.endpoint(), healthy);
        self.apply_probe(healthy)
    }

    /// Apply a probe result: failure forces `offline`, success clears it.
    pub fn apply_probe(&self, healthy: bool) -> ActivityState {
        self.transition(|current| current.after_probe(healthy))
    }

    /// Re-render the indicator without changing state (e.g. after the
    /// endpoint shown in the tooltip changed).
    pub fn refresh(&self) {
        self.render(self.state());
    }

    /// Wait for the most recently scheduled background probe to finish.
    pub async fn settle(&self) {
        let pending = self
            .pending_probe
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = pending {
            let _ = handle.await;
        }
    }

    /// Hooks that drive this tracker for one kind of operation.
    pub fn hooks(self: &Arc<Self>, kind: OperationKind) -> Arc<dyn OperationHooks> {
        Arc::new(TrackerHooks {
            tracker: Arc::clone(self),
            kind,
        })
    }

    fn transition(&self, next: impl FnOnce(ActivityState) -> ActivityState) -> ActivityState {
        let new_state = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            let new_state = next(*state);
            if *state != new_state {
                debug!("Activity: {} -> {}", *state, new_state);
            }
            *state = new_state;
            new_state
        };
        self.render(new_state);
        new_state
    }

    fn render(&self, state: ActivityState) {
        let view = StatusView::for_state(state, &self.backend.endpoint());
        self.indicator.show(&view);
    }

    fn schedule_probe(self: &Arc<Self>) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            debug!("Activity: no runtime available, skipping background probe");
            return;
        };
        let tracker = Arc::clone(self);
        let handle = runtime.spawn(async move {
            tracker.probe().await;
        });
        let previous = self
            .pending_probe
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(handle);
        // An older probe may still be running; it stays detached.
        drop(previous);
    }
}

struct TrackerHooks {
    tracker: Arc<ActivityTracker>,
    kind: OperationKind,
}

impl OperationHooks for TrackerHooks {
    fn on_start(&self) {
        self.tracker.begin(self.kind);
    }

    fn on_end(&self) {
        self.tracker.finish();
    }
}
