//! HTTP adapter for the agent backend's REST API.

mod client;

pub use client::{HttpBackendClient, HttpBackendConnector};
