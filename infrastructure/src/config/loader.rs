//! Configuration file loader with multi-source merging

use super::file_config::{ConfigValidationError, FileConfig};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::fmt::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Project-level config file names, checked in order.
const PROJECT_FILES: [&str; 2] = ["openflux.toml", ".openflux.toml"];

/// Prefix of environment overrides (`OPENFLUX_BACKEND__URL=...`).
pub const ENV_PREFIX: &str = "OPENFLUX_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Could not read configuration: {0}")]
    Parse(#[from] Box<figment::Error>),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ConfigValidationError),
}

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `OPENFLUX_*` environment variables
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./openflux.toml` or `./.openflux.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/openflux/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, ConfigError> {
        let figment = Self::file_figment(
            Self::global_config_path().as_deref(),
            Self::project_config_path().as_deref(),
            config_path,
        )?
        .merge(Env::prefixed(ENV_PREFIX).split("__"));
        Self::extract(figment)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Merge the given files over the defaults, lowest priority first.
    pub fn load_files(
        global: Option<&Path>,
        project: Option<&Path>,
        explicit: Option<&Path>,
    ) -> Result<FileConfig, ConfigError> {
        Self::extract(Self::file_figment(global, project, explicit)?)
    }

    fn file_figment(
        global: Option<&Path>,
        project: Option<&Path>,
        explicit: Option<&Path>,
    ) -> Result<Figment, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        for path in [global, project].into_iter().flatten() {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            figment = figment.merge(Toml::file(path));
        }

        Ok(figment)
    }

    fn extract(figment: Figment) -> Result<FileConfig, ConfigError> {
        let config: FileConfig = figment.extract().map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/openflux/config.toml if set,
    /// otherwise the platform config directory.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("openflux").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Describe the config file locations being used (for `--show-config`)
    pub fn describe_sources(explicit: Option<&Path>) -> String {
        let mut out = String::from("Configuration sources (in priority order):\n");

        let _ = writeln!(out, "  [ENV  ] {}* variables", ENV_PREFIX);

        if let Some(path) = explicit {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            let _ = writeln!(out, "  [{:5}] Explicit: {}", mark, path.display());
        }

        match Self::project_config_path() {
            Some(path) => {
                let _ = writeln!(out, "  [FOUND] Project: {}", path.display());
            }
            None => {
                let _ = writeln!(out, "  [     ] Project: ./openflux.toml or ./.openflux.toml");
            }
        }

        if let Some(path) = Self::global_config_path() {
            let mark = if path.exists() { "FOUND" } else { "" };
            let _ = writeln!(out, "  [{:5}] Global:  {}", mark, path.display());
        }

        out.push_str("  [     ] Default: built-in defaults\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.backend.url, "http://localhost:8000");
        assert_eq!(config.agent.max_iterations, 5);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("openflux"));
    }

    #[test]
    fn test_later_files_override_earlier() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.toml");
        let project = dir.path().join("openflux.toml");
        fs::write(
            &global,
            "[backend]\nurl = \"http://global:8000\"\ntimeout_seconds = 30\n",
        )
        .unwrap();
        fs::write(&project, "[backend]\nurl = \"http://project:8000\"\n").unwrap();

        let config = ConfigLoader::load_files(Some(&global), Some(&project), None).unwrap();

        assert_eq!(config.backend.url, "http://project:8000");
        // Keys absent from the project file keep the global value.
        assert_eq!(config.backend.timeout_seconds, 30);
    }

    #[test]
    fn test_explicit_file_wins() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("openflux.toml");
        let explicit = dir.path().join("custom.toml");
        fs::write(&project, "[search]\ntop_k = 4\n").unwrap();
        fs::write(&explicit, "[search]\ntop_k = 7\n").unwrap();

        let config = ConfigLoader::load_files(None, Some(&project), Some(&explicit)).unwrap();

        assert_eq!(config.search.top_k, 7);
    }

    #[test]
    fn test_missing_files_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        let config = ConfigLoader::load_files(Some(&missing), Some(&missing), None).unwrap();

        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        let result = ConfigLoader::load_files(None, None, Some(&missing));

        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("openflux.toml");
        fs::write(&path, "[agent]\nmax_iterations = 0\n").unwrap();

        let result = ConfigLoader::load_files(None, Some(&path), None);

        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_toml_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("openflux.toml");
        fs::write(&path, "[search]\ntop_k = \"many\"\n").unwrap();

        let result = ConfigLoader::load_files(None, Some(&path), None);

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_describe_sources_lists_explicit_path() {
        let report = ConfigLoader::describe_sources(Some(Path::new("/nowhere/openflux.toml")));
        assert!(report.contains("[MISSING] Explicit: /nowhere/openflux.toml"));
        assert!(report.contains("built-in defaults"));
    }
}
