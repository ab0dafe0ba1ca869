//! Export document rendering and default file naming.

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::model::ExportData;
use crate::store::Snapshot;

/// Build a fresh export envelope for `snapshot`.
pub fn export_document(snapshot: &Snapshot) -> ExportData {
    ExportData::new(snapshot.folder_list().clone())
}

/// Pretty-print an export document (two-space indent).
pub fn render_export(data: &ExportData) -> Result<String> {
    serde_json::to_string_pretty(data).context("Failed to serialize export")
}

/// Suggested export file name, `prompts_<YYYY-MM-DD>.json`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("prompts_{}.json", date.format("%Y-%m-%d"))
}
