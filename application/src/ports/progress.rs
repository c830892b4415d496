//! Progress notification port
//!
//! A progress scope is shown while a backend call is in flight. It cannot
//! cancel the call; the backend request is not cancellable once issued.

/// Opens progress scopes.
///
/// Implementations live in the presentation layer (spinners, editor
/// notifications, ...).
pub trait ProgressPort: Send + Sync {
    /// Begin a progress scope. The scope ends when the handle is dropped.
    fn begin(&self, title: &str) -> Box<dyn ProgressHandle>;
}

/// A live progress scope.
pub trait ProgressHandle: Send {
    /// Report progress. `increment` is a percentage step.
    fn report(&mut self, increment: Option<u32>, message: Option<&str>);
}

/// No-op progress for when progress reporting is not needed
pub struct NoProgress;

struct NoProgressHandle;

impl ProgressHandle for NoProgressHandle {
    fn report(&mut self, _increment: Option<u32>, _message: Option<&str>) {}
}

impl ProgressPort for NoProgress {
    fn begin(&self, _title: &str) -> Box<dyn ProgressHandle> {
        Box::new(NoProgressHandle)
    }
}
