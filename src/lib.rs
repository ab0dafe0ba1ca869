//! Promptfold - organize reusable prompts into folders.
//!
//! Promptfold keeps text snippets ("prompts") in named folders, persists
//! them locally, searches them, and moves them between machines as JSON
//! export documents.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading and environment overrides
//! - [`error`] - Error types and result aliases
//! - [`external`] - Clipboard and file system adapters
//! - [`model`] - Prompt, Folder and export document types
//! - [`query`] - Search over a store snapshot
//! - [`storage`] - Key/value slots the store persists into
//! - [`store`] - The prompt store and its invariants
//! - [`transfer`] - Export and import codec
//! - [`ui`] - Prompts, tables and terminal output
//! - [`workspace`] - A store bound to persistent storage
//!
//! # Example
//!
//! ```
//! use promptfold::model::DEFAULT_FOLDER_ID;
//! use promptfold::query::{filter_prompts, SearchScope};
//! use promptfold::store::PromptStore;
//!
//! let mut store = PromptStore::new();
//! let work = store.create_folder("Work").folders()[1].id.clone();
//! store.add_prompt(&work, "Summarize the meeting", None);
//! let snapshot = store.add_prompt(DEFAULT_FOLDER_ID, "Draft a summary", None);
//!
//! let hits = filter_prompts(&snapshot, DEFAULT_FOLDER_ID, "summar", SearchScope::All);
//! assert_eq!(hits.len(), 2);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod external;
pub mod model;
pub mod query;
pub mod storage;
pub mod store;
pub mod transfer;
pub mod ui;
pub mod workspace;

pub use error::{PromptfoldError, Result};
