//! Use cases
//!
//! Application-level operations that orchestrate the backend client,
//! the activity state and the host.

pub mod activity_tracker;
pub mod composer;
pub mod index_codebase;
pub mod panel_registry;
pub mod run_agent;
pub mod session;
pub mod shared;

#[cfg(test)]
pub(crate) mod test_support;
