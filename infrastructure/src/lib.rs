//! Infrastructure layer for openflux
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the HTTP backend client, configuration file
//! loading and the file transcript log.

pub mod config;
pub mod http;
pub mod logging;

// Re-export commonly used types
pub use config::{
    ConfigError, ConfigLoader, ConfigValidationError, FileAgentConfig, FileBackendConfig,
    FileConfig, FileIndexingConfig, FileOutputConfig, FileSearchConfig,
};
pub use http::{HttpBackendClient, HttpBackendConnector};
pub use logging::FileTranscriptLog;
