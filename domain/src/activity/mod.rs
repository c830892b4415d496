//! Activity subdomain: what the session is doing and how the host shows it.
//!
//! - [`state::ActivityState`]: the single process-wide activity value
//! - [`state::OperationKind`]: the long-running operations that mark the state busy
//! - [`status_view::StatusView`]: label/tooltip/command derived from a state

pub mod state;
pub mod status_view;
