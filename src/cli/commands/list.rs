//! List command implementation.
//!
//! The `promptfold list` command lists the active folder's prompts, or
//! searches across every folder with `--all`.

use crate::cli::args::ListArgs;
use crate::config::AppConfig;
use crate::error::Result;
use crate::query::{filter_prompts, PromptHit, SearchScope};
use crate::ui::{PromptfoldTheme, Table, UserInterface};

use super::dispatcher::{Command, CommandResult};
use super::display::{open_workspace, plural, preview};

/// The list command implementation.
pub struct ListCommand {
    config: AppConfig,
    args: ListArgs,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(config: &AppConfig, args: ListArgs) -> Self {
        Self {
            config: config.clone(),
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ListArgs {
        &self.args
    }

    /// Scope from `--all`, falling back to the configured default.
    pub fn scope(&self) -> SearchScope {
        if self.args.all {
            SearchScope::All
        } else {
            self.config.default_scope
        }
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let workspace = open_workspace(&self.config);
        let snapshot = workspace.snapshot();
        let scope = self.scope();
        let query = self.args.query.as_deref().unwrap_or("");

        let hits = filter_prompts(&snapshot, snapshot.active_folder_id(), query, scope);

        if self.args.json {
            let output = serde_json::to_string_pretty(&hits).map_err(anyhow::Error::from)?;
            ui.message(&output);
            return Ok(CommandResult::success());
        }

        let folder_name = snapshot
            .active_folder()
            .map(|f| f.name.as_str())
            .unwrap_or_default();

        if hits.is_empty() {
            let msg = match (scope, query.trim().is_empty()) {
                (SearchScope::Current, true) => format!("No prompts in {}", folder_name),
                (SearchScope::Current, false) => {
                    format!("No prompts in {} match \"{}\"", folder_name, query)
                }
                (SearchScope::All, true) => "No prompts saved yet".to_string(),
                (SearchScope::All, false) => format!("No prompts match \"{}\"", query),
            };
            ui.message(&msg);
            if query.trim().is_empty() {
                ui.show_hint("Add one with `promptfold add <TEXT>`");
            }
            return Ok(CommandResult::success());
        }

        if scope == SearchScope::Current {
            ui.show_header(folder_name);
        }
        ui.message(&render_hits(&hits, scope));

        if ui.output_mode().shows_status() {
            let theme = PromptfoldTheme::new();
            let count = plural(hits.len(), "prompt", "prompts");
            ui.message(&theme.dim.apply_to(count).to_string());
        }

        Ok(CommandResult::success())
    }
}

fn render_hits(hits: &[PromptHit<'_>], scope: SearchScope) -> String {
    let mut headers = vec!["ID", "Name", "Prompt"];
    if scope == SearchScope::All {
        headers.push("Folder");
    }

    let mut table = Table::new(headers);
    for hit in hits {
        let id = hit.prompt.id.to_string();
        let name = hit.prompt.file_name.as_deref().unwrap_or("");
        let text = preview(&hit.prompt.text);
        let mut row = vec![id.as_str(), name, text.as_str()];
        if let Some(folder) = &hit.folder {
            row.push(folder.name);
        }
        table.add_row(row);
    }
    table.render()
}
