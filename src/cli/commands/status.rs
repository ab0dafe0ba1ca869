//! Status command implementation.
//!
//! The `promptfold status` command shows the active folder and counts.

use serde::Serialize;

use crate::cli::args::StatusArgs;
use crate::config::AppConfig;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::display::open_workspace;

/// Machine-readable status.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusReport {
    active_folder_id: String,
    active_folder_name: String,
    folder_count: usize,
    prompt_count: usize,
    data_dir: String,
}

/// The status command implementation.
pub struct StatusCommand {
    config: AppConfig,
    args: StatusArgs,
}

impl StatusCommand {
    /// Create a new status command.
    pub fn new(config: &AppConfig, args: StatusArgs) -> Self {
        Self {
            config: config.clone(),
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &StatusArgs {
        &self.args
    }
}

impl Command for StatusCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let workspace = open_workspace(&self.config);
        let snapshot = workspace.snapshot();
        let active = snapshot.active_folder();

        let report = StatusReport {
            active_folder_id: snapshot.active_folder_id().to_string(),
            active_folder_name: active.map(|f| f.name.clone()).unwrap_or_default(),
            folder_count: snapshot.folder_count(),
            prompt_count: snapshot.total_prompt_count(),
            data_dir: self.config.data_dir().display().to_string(),
        };

        if self.args.json {
            let output = serde_json::to_string_pretty(&report).map_err(anyhow::Error::from)?;
            ui.message(&output);
            return Ok(CommandResult::success());
        }

        ui.show_header("Promptfold - Status");
        ui.message(&format!(
            "Active folder: {} ({} in folder)",
            report.active_folder_name,
            active.map(|f| f.prompts.len()).unwrap_or(0)
        ));
        ui.message(&format!("Folders:       {}", report.folder_count));
        ui.message(&format!("Prompts:       {}", report.prompt_count));
        if ui.output_mode().shows_details() {
            ui.message(&format!("Data dir:      {}", report.data_dir));
            if !workspace.startup_repair().is_clean() {
                ui.warning("Saved data needed repairs when it was loaded");
            }
        }

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DEFAULT_FOLDER_ID;
    use crate::ui::{MockUI, OutputMode};
    use tempfile::TempDir;

    fn setup() -> (TempDir, AppConfig) {
        let temp = TempDir::new().unwrap();
        let config = AppConfig {
            data_dir: Some(temp.path().to_path_buf()),
            ..Default::default()
        };
        let mut workspace = open_workspace(&config);
        let work = workspace
            .update(|s| s.create_folder("Work"))
            .folders()[1]
            .id
            .clone();
        workspace.update(|s| s.add_prompt(&work, "one", None));
        workspace.update(|s| s.add_prompt(DEFAULT_FOLDER_ID, "two", None));
        workspace.set_active_folder(&work);
        (temp, config)
    }

    #[test]
    fn shows_active_folder_and_counts() {
        let (_temp, config) = setup();
        let mut ui = MockUI::new();

        let result = StatusCommand::new(&config, StatusArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert!(ui.has_message("Active folder: Work (1 in folder)"));
        assert!(ui.has_message("Folders:       2"));
        assert!(ui.has_message("Prompts:       2"));
        assert!(!ui.has_message("Data dir"));
    }

    #[test]
    fn verbose_shows_data_dir() {
        let (temp, config) = setup();
        let mut ui = MockUI::with_mode(OutputMode::Verbose);

        StatusCommand::new(&config, StatusArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert!(ui.has_message(&temp.path().display().to_string()));
    }

    #[test]
    fn json_output() {
        let (_temp, config) = setup();
        let mut ui = MockUI::new();

        StatusCommand::new(&config, StatusArgs { json: true })
            .execute(&mut ui)
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&ui.messages()[0]).unwrap();
        assert_eq!(value["activeFolderName"], "Work");
        assert_eq!(value["folderCount"], 2);
        assert_eq!(value["promptCount"], 2);
    }
}
