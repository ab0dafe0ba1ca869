//! Folder command implementation.
//!
//! Provides `promptfold folder list`, `create`, `rename`, `delete` and `use`.

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::config::AppConfig;
use crate::model::{normalize_text, DEFAULT_FOLDER_NAME};
use crate::storage::FileSlotStore;
use crate::ui::{Prompt, PromptResult, Table, UserInterface};
use crate::workspace::Workspace;

use super::dispatcher::{Command, CommandResult};
use super::display::{open_workspace, plural, resolve_folder};

/// Arguments for the folder command.
#[derive(Debug, Clone, Args)]
pub struct FolderArgs {
    #[command(subcommand)]
    pub command: FolderSubcommand,
}

/// Folder subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum FolderSubcommand {
    /// List folders with prompt counts.
    List {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Create a folder and make it active.
    Create {
        /// Folder name (words are joined with spaces).
        #[arg(required = true)]
        name: Vec<String>,
    },
    /// Rename a folder.
    Rename {
        /// Folder id or name.
        folder: String,
        /// New name (words are joined with spaces).
        #[arg(required = true)]
        name: Vec<String>,
    },
    /// Delete a folder, moving its prompts to Uncategorized.
    Delete {
        /// Folder id or name.
        folder: String,
        /// Don't prompt for confirmation.
        #[arg(short, long)]
        force: bool,
    },
    /// Make a folder the active one.
    Use {
        /// Folder id or name.
        folder: String,
    },
}

/// One row of `folder list --json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FolderSummary<'a> {
    id: &'a str,
    name: &'a str,
    is_default: bool,
    active: bool,
    prompt_count: usize,
}

/// The folder command implementation.
pub struct FolderCommand {
    config: AppConfig,
    args: FolderArgs,
}

impl FolderCommand {
    /// Create a new folder command.
    pub fn new(config: &AppConfig, args: FolderArgs) -> Self {
        Self {
            config: config.clone(),
            args,
        }
    }
}

impl Command for FolderCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> crate::error::Result<CommandResult> {
        let mut workspace = open_workspace(&self.config);

        let exit_code = match &self.args.command {
            FolderSubcommand::List { json } => list_folders(&workspace, *json, ui)?,
            FolderSubcommand::Create { name } => create_folder(&mut workspace, name, ui)?,
            FolderSubcommand::Rename { folder, name } => {
                rename_folder(&mut workspace, folder, name, ui)?
            }
            FolderSubcommand::Delete { folder, force } => {
                delete_folder(&mut workspace, folder, *force, ui)?
            }
            FolderSubcommand::Use { folder } => use_folder(&mut workspace, folder, ui)?,
        };

        Ok(CommandResult::from_exit_code(exit_code))
    }
}

fn list_folders(
    workspace: &Workspace<FileSlotStore>,
    json: bool,
    ui: &mut dyn UserInterface,
) -> Result<i32> {
    let snapshot = workspace.snapshot();
    let active = snapshot.active_folder_id();

    if json {
        let summaries: Vec<FolderSummary<'_>> = snapshot
            .folders()
            .iter()
            .map(|f| FolderSummary {
                id: &f.id,
                name: &f.name,
                is_default: f.is_default,
                active: f.id == active,
                prompt_count: f.prompts.len(),
            })
            .collect();
        ui.message(&serde_json::to_string_pretty(&summaries)?);
        return Ok(0);
    }

    let mut table = Table::new(vec!["", "ID", "Name", "Prompts"]);
    for folder in snapshot.folders() {
        let marker = if folder.id == active { "*" } else { "" };
        let count = folder.prompts.len().to_string();
        table.add_row(vec![marker, folder.id.as_str(), folder.name.as_str(), count.as_str()]);
    }
    ui.message(&table.render());
    Ok(0)
}

fn create_folder(
    workspace: &mut Workspace<FileSlotStore>,
    name: &[String],
    ui: &mut dyn UserInterface,
) -> Result<i32> {
    let name = name.join(" ");
    if normalize_text(&name).is_none() {
        ui.error("Folder name is empty");
        return Ok(1);
    }

    let snapshot = workspace.update(|store| store.create_folder(&name));
    let Some(folder) = snapshot.folders().last() else {
        ui.error("Folder was not created");
        return Ok(1);
    };
    workspace.set_active_folder(&folder.id);

    ui.success(&format!("Created folder {} ({})", folder.name, folder.id));
    Ok(0)
}

fn rename_folder(
    workspace: &mut Workspace<FileSlotStore>,
    query: &str,
    name: &[String],
    ui: &mut dyn UserInterface,
) -> Result<i32> {
    let name = name.join(" ");
    if normalize_text(&name).is_none() {
        ui.error("Folder name is empty");
        return Ok(1);
    }

    let snapshot = workspace.snapshot();
    let folder = resolve_folder(&snapshot, query)?;
    let after = workspace.update(|store| store.rename_folder(&folder.id, &name));

    let new_name = after
        .folder(&folder.id)
        .map(|f| f.name.as_str())
        .unwrap_or_default();
    ui.success(&format!("Renamed {} to {}", folder.name, new_name));
    Ok(0)
}

fn delete_folder(
    workspace: &mut Workspace<FileSlotStore>,
    query: &str,
    force: bool,
    ui: &mut dyn UserInterface,
) -> Result<i32> {
    let snapshot = workspace.snapshot();
    let folder = resolve_folder(&snapshot, query)?;
    if folder.is_default {
        ui.error(&format!("The {} folder cannot be deleted", DEFAULT_FOLDER_NAME));
        return Ok(1);
    }

    if !force && ui.is_interactive() {
        let prompt = Prompt::confirm(
            "confirm_delete_folder",
            format!(
                "Delete \"{}\"? Prompts will be moved to {}.",
                folder.name, DEFAULT_FOLDER_NAME
            ),
            false,
        );
        match ui.prompt(&prompt)? {
            PromptResult::Bool(true) => {}
            _ => {
                ui.message("Cancelled");
                return Ok(0);
            }
        }
    }

    let moved = folder.prompts.len();
    workspace.update(|store| store.delete_folder(&folder.id));
    if moved == 0 {
        ui.success(&format!("Deleted folder {}", folder.name));
    } else {
        ui.success(&format!(
            "Deleted folder {}, moved {} to {}",
            folder.name,
            plural(moved, "prompt", "prompts"),
            DEFAULT_FOLDER_NAME
        ));
    }
    Ok(0)
}

fn use_folder(
    workspace: &mut Workspace<FileSlotStore>,
    query: &str,
    ui: &mut dyn UserInterface,
) -> Result<i32> {
    let snapshot = workspace.snapshot();
    let folder = resolve_folder(&snapshot, query)?;
    workspace.set_active_folder(&folder.id);
    ui.success(&format!("Switched to {}", folder.name));
    Ok(0)
}
