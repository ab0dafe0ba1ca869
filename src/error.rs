//! Error types for promptfold operations.
//!
//! This module defines [`PromptfoldError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Store mutations never fail: empty input and unknown ids are silent no-ops
//! - Use `PromptfoldError` for errors the caller must distinguish (import shape
//!   vs. unparseable import, missing ids surfaced by the CLI)
//! - Use `anyhow::Error` (via `PromptfoldError::Other`) for plumbing errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for promptfold operations.
#[derive(Debug, Error)]
pub enum PromptfoldError {
    /// Import text is not valid JSON at all.
    #[error("Failed to parse JSON file: {message}")]
    ImportParse { message: String },

    /// Import text is JSON, but neither an export document nor a legacy prompt list.
    #[error("Invalid JSON format: {message}")]
    ImportFormat { message: String },

    /// Another import is still pending.
    #[error("An import is already in progress")]
    ImportInProgress,

    /// No folder matches the given id or name.
    #[error("Folder not found: {folder}")]
    FolderNotFound { folder: String },

    /// No prompt has the given id.
    #[error("Prompt not found: {id}")]
    PromptNotFound { id: i64 },

    /// Writing to the clipboard failed.
    #[error("Failed to copy to clipboard: {message}")]
    Clipboard { message: String },

    /// A prompt needed an answer but nobody can give one.
    #[error("Cannot prompt for '{key}' in non-interactive mode (no default value)")]
    PromptUnavailable { key: String },

    /// Configuration file named explicitly but missing.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse the configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for promptfold operations.
pub type Result<T> = std::result::Result<T, PromptfoldError>;
