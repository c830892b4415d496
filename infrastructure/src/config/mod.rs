//! Configuration file loading for openflux
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `OPENFLUX_*` environment variables (`OPENFLUX_BACKEND__URL`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./openflux.toml` or `./.openflux.toml`
//! 4. Global: `$XDG_CONFIG_HOME/openflux/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileAgentConfig, FileBackendConfig, FileConfig, FileIndexingConfig,
    FileOutputConfig, FileSearchConfig,
};
pub use loader::{ConfigError, ConfigLoader, ENV_PREFIX};
