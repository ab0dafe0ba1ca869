//! Export and import of the whole folder collection.
//!
//! Exports are always the current `2.0` document shape. Imports accept that
//! shape or the legacy bare array of prompts, and are applied to the store
//! only after parsing succeeded completely.

mod export;
mod gate;
mod import;

pub use export::{export_document, export_file_name, render_export};
pub use gate::{ImportGate, ImportTicket};
pub use import::{apply_import, parse_import, ImportKind, ImportOutcome, ImportedData};
