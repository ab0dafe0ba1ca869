//! Export and import commands.
//!
//! `promptfold export` writes every folder to a dated JSON file;
//! `promptfold import` replaces the store with a file's contents.

use std::path::{Path, PathBuf};

use chrono::Local;

use crate::cli::args::{ExportArgs, ImportArgs};
use crate::config::AppConfig;
use crate::error::Result;
use crate::external::{DirectorySaver, FileSaver, FsReader};
use crate::storage::FileSlotStore;
use crate::store::RepairReport;
use crate::transfer::{export_file_name, ImportKind};
use crate::ui::UserInterface;
use crate::workspace::Workspace;

use super::dispatcher::{Command, CommandResult};
use super::display::{open_workspace, plural};

/// The export command implementation.
pub struct ExportCommand {
    config: AppConfig,
    args: ExportArgs,
}

impl ExportCommand {
    /// Create a new export command.
    pub fn new(config: &AppConfig, args: ExportArgs) -> Self {
        Self {
            config: config.clone(),
            args,
        }
    }
}

impl Command for ExportCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let workspace = open_workspace(&self.config);

        if self.args.output.as_deref() == Some(Path::new("-")) {
            ui.message(&workspace.export_text()?);
            return Ok(CommandResult::success());
        }

        let path = match &self.args.output {
            Some(output) => save_to_path(&workspace, output)?,
            None => {
                let saver = DirectorySaver::new(self.config.export_dir());
                workspace.export_to(&saver, Local::now().date_naive())?
            }
        };

        let snapshot = workspace.snapshot();
        ui.success(&format!(
            "Exported {} ({}) to {}",
            plural(snapshot.folder_count(), "folder", "folders"),
            plural(snapshot.total_prompt_count(), "prompt", "prompts"),
            path.display()
        ));
        Ok(CommandResult::success())
    }
}

/// Save under `output`: inside it with the dated name if it is a
/// directory, otherwise as that exact file.
fn save_to_path(workspace: &Workspace<FileSlotStore>, output: &Path) -> Result<PathBuf> {
    if output.is_dir() {
        return workspace.export_to(&DirectorySaver::new(output), Local::now().date_naive());
    }

    let dir = output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let name = match output.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => export_file_name(Local::now().date_naive()),
    };
    DirectorySaver::new(dir).save(&name, &workspace.export_text()?)
}

/// The import command implementation.
pub struct ImportCommand {
    config: AppConfig,
    args: ImportArgs,
}

impl ImportCommand {
    /// Create a new import command.
    pub fn new(config: &AppConfig, args: ImportArgs) -> Self {
        Self {
            config: config.clone(),
            args,
        }
    }
}

impl Command for ImportCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut workspace = open_workspace(&self.config);
        let outcome = workspace.import_from(&FsReader, &self.args.file)?;

        if outcome.kind == ImportKind::Legacy {
            ui.warning("Imported a legacy prompt list; everything is now in Uncategorized");
        }
        if !outcome.repair.is_clean() {
            ui.warning("Imported data needed repairs");
            if ui.output_mode().shows_details() {
                for line in describe_repair(&outcome.repair) {
                    ui.message(&format!("  {}", line));
                }
            }
        }

        let snapshot = &outcome.snapshot;
        ui.success(&format!(
            "Imported {} ({}) from {}",
            plural(snapshot.folder_count(), "folder", "folders"),
            plural(snapshot.total_prompt_count(), "prompt", "prompts"),
            self.args.file.display()
        ));
        Ok(CommandResult::success())
    }
}

fn describe_repair(report: &RepairReport) -> Vec<String> {
    let mut lines = Vec::new();
    if report.inserted_default {
        lines.push("Added a missing Uncategorized folder".to_string());
    }
    if let Some(old) = &report.promoted_default {
        lines.push(format!("Folder {} became the default folder", old));
    }
    if report.cleared_defaults > 0 {
        lines.push(format!(
            "Cleared the default flag on {}",
            plural(report.cleared_defaults, "folder", "folders")
        ));
    }
    if report.reassigned_folder_ids > 0 {
        lines.push(format!(
            "Gave fresh ids to {}",
            plural(report.reassigned_folder_ids, "folder", "folders")
        ));
    }
    if report.reassigned_prompt_ids > 0 {
        lines.push(format!(
            "Gave fresh ids to {}",
            plural(report.reassigned_prompt_ids, "prompt", "prompts")
        ));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PromptfoldError;
    use crate::model::DEFAULT_FOLDER_ID;
    use crate::ui::{MockUI, OutputMode};
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, AppConfig) {
        let temp = TempDir::new().unwrap();
        let config = AppConfig {
            data_dir: Some(temp.path().join("data")),
            export_dir: Some(temp.path().join("exports")),
            ..Default::default()
        };
        let mut workspace = open_workspace(&config);
        workspace.update(|s| s.create_folder("Work"));
        workspace.update(|s| s.add_prompt(DEFAULT_FOLDER_ID, "hello", None));
        (temp, config)
    }

    #[test]
    fn export_writes_dated_file_to_export_dir() {
        let (temp, config) = setup();
        let mut ui = MockUI::new();

        ExportCommand::new(&config, ExportArgs::default())
            .execute(&mut ui)
            .unwrap();

        let expected = temp
            .path()
            .join("exports")
            .join(export_file_name(Local::now().date_naive()));
        let text = fs::read_to_string(&expected).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["version"], "2.0");
        assert_eq!(value["folders"].as_array().unwrap().len(), 2);
        assert!(ui.has_success("Exported 2 folders (1 prompt)"));
    }

    #[test]
    fn export_to_stdout() {
        let (_temp, config) = setup();
        let mut ui = MockUI::new();

        ExportCommand::new(
            &config,
            ExportArgs {
                output: Some(PathBuf::from("-")),
            },
        )
        .execute(&mut ui)
        .unwrap();

        assert!(ui.has_message("\"version\": \"2.0\""));
        assert!(ui.successes().is_empty());
    }

    #[test]
    fn export_to_explicit_file() {
        let (temp, config) = setup();
        let target = temp.path().join("out").join("backup.json");
        let mut ui = MockUI::new();

        ExportCommand::new(
            &config,
            ExportArgs {
                output: Some(target.clone()),
            },
        )
        .execute(&mut ui)
        .unwrap();

        assert!(target.exists());
    }

    #[test]
    fn export_then_import_restores_state() {
        let (temp, config) = setup();
        let file = temp.path().join("backup.json");
        let mut ui = MockUI::new();
        ExportCommand::new(
            &config,
            ExportArgs {
                output: Some(file.clone()),
            },
        )
        .execute(&mut ui)
        .unwrap();

        let mut workspace = open_workspace(&config);
        let work = workspace.snapshot().folders()[1].id.clone();
        workspace.update(|s| s.delete_folder(&work));
        drop(workspace);

        ImportCommand::new(&config, ImportArgs { file })
            .execute(&mut ui)
            .unwrap();

        let snapshot = open_workspace(&config).snapshot();
        assert_eq!(snapshot.folder_count(), 2);
        assert_eq!(snapshot.folders()[1].name, "Work");
        assert!(ui.has_success("Imported 2 folders (1 prompt)"));
        assert!(ui.warnings().is_empty());
    }

    #[test]
    fn legacy_import_warns() {
        let (temp, config) = setup();
        let file = temp.path().join("legacy.json");
        fs::write(
            &file,
            r#"[{"id": 1, "text": "old one", "fileName": null, "timestamp": "2023-01-01T00:00:00.000Z"}]"#,
        )
        .unwrap();
        let mut ui = MockUI::new();

        ImportCommand::new(&config, ImportArgs { file })
            .execute(&mut ui)
            .unwrap();

        assert!(ui.has_warning("legacy"));
        let snapshot = open_workspace(&config).snapshot();
        assert_eq!(snapshot.folder_count(), 1);
        assert_eq!(snapshot.active_folder_id(), DEFAULT_FOLDER_ID);
    }

    #[test]
    fn repaired_import_reports_details_in_verbose_mode() {
        let (temp, config) = setup();
        let file = temp.path().join("dupes.json");
        fs::write(
            &file,
            r#"{"version": "2.0", "exportDate": "x", "folders": [
                {"id": "a", "name": "A", "prompts": [{"id": 5, "text": "one"}, {"id": 5, "text": "two"}]}
            ]}"#,
        )
        .unwrap();
        let mut ui = MockUI::with_mode(OutputMode::Verbose);

        ImportCommand::new(&config, ImportArgs { file })
            .execute(&mut ui)
            .unwrap();

        assert!(ui.has_warning("needed repairs"));
        assert!(ui.has_message("Added a missing Uncategorized folder"));
        assert!(ui.has_message("Gave fresh ids to 1 prompt"));
    }

    #[test]
    fn malformed_import_leaves_store_untouched() {
        let (temp, config) = setup();
        let file = temp.path().join("bad.json");
        fs::write(&file, "{not json").unwrap();
        let mut ui = MockUI::new();

        let err = ImportCommand::new(&config, ImportArgs { file })
            .execute(&mut ui)
            .unwrap_err();

        assert!(matches!(err, PromptfoldError::ImportParse { .. }));
        assert_eq!(open_workspace(&config).snapshot().folder_count(), 2);
    }

    #[test]
    fn wrong_shape_import_is_format_error() {
        let (temp, config) = setup();
        let file = temp.path().join("shape.json");
        fs::write(&file, r#"{"version": "1.0", "folders": []}"#).unwrap();
        let mut ui = MockUI::new();

        let err = ImportCommand::new(&config, ImportArgs { file })
            .execute(&mut ui)
            .unwrap_err();

        assert!(matches!(err, PromptfoldError::ImportFormat { .. }));
    }

    #[test]
    fn describe_clean_report_is_empty() {
        assert!(describe_repair(&RepairReport::default()).is_empty());
    }
}
