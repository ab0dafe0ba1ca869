//! Configuration file discovery and loading.
//!
//! Settings are layered, later layers winning:
//! 1. Built-in defaults
//! 2. Config file (`--config`, or the user config directory)
//! 3. Environment variables (`PROMPTFOLD_*`)
//!
//! Command-line flags are applied on top by the CLI.

use crate::config::schema::AppConfig;
use crate::error::{PromptfoldError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Overrides the data directory.
pub const ENV_DATA_DIR: &str = "PROMPTFOLD_DATA_DIR";

/// Overrides the export directory.
pub const ENV_EXPORT_DIR: &str = "PROMPTFOLD_EXPORT_DIR";

/// Overrides the default search scope (`current` or `all`).
pub const ENV_SCOPE: &str = "PROMPTFOLD_SCOPE";

/// Where the config file comes from.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// Explicit `--config` path. Must exist.
    pub explicit: Option<PathBuf>,

    /// User config: `<config dir>/promptfold/config.yml`, if present.
    pub user_global: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover the config file, preferring an explicit path.
    pub fn discover(explicit: Option<&Path>) -> Self {
        Self {
            explicit: explicit.map(Path::to_path_buf),
            user_global: Self::find_user_global(),
        }
    }

    /// Find the user config at `<config dir>/promptfold/config.yml`.
    fn find_user_global() -> Option<PathBuf> {
        let path = dirs::config_dir()?.join("promptfold").join("config.yml");
        if path.exists() {
            Some(path)
        } else {
            None
        }
    }

    /// The file that will be loaded, if any.
    pub fn active(&self) -> Option<&PathBuf> {
        self.explicit.as_ref().or(self.user_global.as_ref())
    }
}

/// Load a config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PromptfoldError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            PromptfoldError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into AppConfig.
pub fn parse_config(content: &str, source_path: &Path) -> Result<AppConfig> {
    // An empty file is a valid, empty config.
    if content.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| PromptfoldError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Apply `PROMPTFOLD_*` overrides read through `lookup`.
///
/// An unparseable scope is ignored with a warning.
pub fn apply_env<F>(config: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(dir) = lookup(ENV_DATA_DIR).filter(|v| !v.is_empty()) {
        config.data_dir = Some(PathBuf::from(dir));
    }
    if let Some(dir) = lookup(ENV_EXPORT_DIR).filter(|v| !v.is_empty()) {
        config.export_dir = Some(PathBuf::from(dir));
    }
    if let Some(scope) = lookup(ENV_SCOPE) {
        match scope.parse() {
            Ok(scope) => config.default_scope = scope,
            Err(e) => tracing::warn!("Ignoring {}: {}", ENV_SCOPE, e),
        }
    }
}

/// Load the effective configuration: defaults, then the config file, then
/// the process environment.
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig> {
    let paths = ConfigPaths::discover(explicit);

    let mut config = match paths.active() {
        Some(path) => {
            tracing::debug!("Loading config from {}", path.display());
            load_config_file(path)?
        }
        None => AppConfig::default(),
    };

    apply_env(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::OutputMode;
    use crate::query::SearchScope;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn load_config_file_parses_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        fs::write(&path, "default_scope: all\noutput: verbose\n").unwrap();

        let config = load_config_file(&path).unwrap();

        assert_eq!(config.default_scope, SearchScope::All);
        assert_eq!(config.output, OutputMode::Verbose);
    }

    #[test]
    fn load_config_file_missing_is_not_found() {
        let temp = TempDir::new().unwrap();
        let result = load_config_file(&temp.path().join("nope.yml"));
        assert!(matches!(result, Err(PromptfoldError::ConfigNotFound { .. })));
    }

    #[test]
    fn load_config_file_invalid_yaml_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        fs::write(&path, "output: [unclosed").unwrap();

        let result = load_config_file(&path);

        assert!(matches!(result, Err(PromptfoldError::ConfigParseError { .. })));
    }

    #[test]
    fn empty_file_is_default_config() {
        let config = parse_config("\n", Path::new("config.yml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn explicit_path_wins() {
        let paths = ConfigPaths::discover(Some(Path::new("/etc/pf.yml")));
        assert_eq!(paths.active(), Some(&PathBuf::from("/etc/pf.yml")));
    }

    #[test]
    fn load_config_explicit_missing_errors() {
        let temp = TempDir::new().unwrap();
        let result = load_config(Some(&temp.path().join("missing.yml")));
        assert!(result.is_err());
    }

    #[test]
    fn env_overrides_file_values() {
        let mut config = parse_config(
            "data_dir: /from/file\ndefault_scope: current\n",
            Path::new("config.yml"),
        )
        .unwrap();

        apply_env(
            &mut config,
            env(&[
                (ENV_DATA_DIR, "/from/env"),
                (ENV_EXPORT_DIR, "/exports"),
                (ENV_SCOPE, "all"),
            ]),
        );

        assert_eq!(config.data_dir, Some(PathBuf::from("/from/env")));
        assert_eq!(config.export_dir, Some(PathBuf::from("/exports")));
        assert_eq!(config.default_scope, SearchScope::All);
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let mut config = AppConfig::default();
        apply_env(&mut config, env(&[(ENV_DATA_DIR, "")]));
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn bad_env_scope_keeps_previous() {
        let mut config = AppConfig {
            default_scope: SearchScope::All,
            ..Default::default()
        };
        apply_env(&mut config, env(&[(ENV_SCOPE, "sideways")]));
        assert_eq!(config.default_scope, SearchScope::All);
    }
}
