//! Configuration loading for promptfold.
//!
//! - Schema definitions in [`schema`]
//! - File discovery, loading and environment overrides in [`loader`]
//!
//! # Example
//!
//! ```
//! use promptfold::config::load_config_file;
//! use promptfold::query::SearchScope;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let path = temp.path().join("config.yml");
//! fs::write(&path, "default_scope: all").unwrap();
//!
//! let config = load_config_file(&path).unwrap();
//! assert_eq!(config.default_scope, SearchScope::All);
//! ```
//!
//! # Configuration File Locations
//!
//! 1. `--config <FILE>` when given
//! 2. User config (`<config dir>/promptfold/config.yml`)

pub mod loader;
pub mod schema;

pub use schema::{AppConfig, OutputMode};

pub use loader::{
    apply_env, load_config, load_config_file, parse_config, ConfigPaths, ENV_DATA_DIR,
    ENV_EXPORT_DIR, ENV_SCOPE,
};
