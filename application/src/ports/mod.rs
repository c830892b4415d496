//! Ports (interfaces) for external systems
//!
//! These traits define the boundaries between the application layer
//! and the backend transport or the hosting environment. Adapters live in
//! the infrastructure layer (HTTP) and the presentation layer (terminal host).

pub mod backend_client;
pub mod host;
pub mod panel;
pub mod progress;
pub mod status_indicator;
