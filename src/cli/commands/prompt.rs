//! Prompt commands.
//!
//! Provides `promptfold add`, `edit`, `rm`, `mv`, `show` and `copy`.

use anyhow::Result;

use crate::cli::args::{AddArgs, CopyArgs, EditArgs, MvArgs, RmArgs, ShowArgs};
use crate::config::AppConfig;
use crate::external::{Clipboard, SystemClipboard};
use crate::model::normalize_text;
use crate::storage::FileSlotStore;
use crate::ui::{OutputMode, Prompt, PromptResult, UserInterface};
use crate::workspace::Workspace;

use super::dispatcher::{Command, CommandResult};
use super::display::{open_workspace, require_prompt, resolve_folder};

/// The add command implementation.
pub struct AddCommand {
    config: AppConfig,
    args: AddArgs,
}

impl AddCommand {
    /// Create a new add command.
    pub fn new(config: &AppConfig, args: AddArgs) -> Self {
        Self {
            config: config.clone(),
            args,
        }
    }
}

impl Command for AddCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> crate::error::Result<CommandResult> {
        let mut workspace = open_workspace(&self.config);
        let code = add_prompt(&mut workspace, &self.args, ui)?;
        Ok(CommandResult::from_exit_code(code))
    }
}

fn add_prompt(
    workspace: &mut Workspace<FileSlotStore>,
    args: &AddArgs,
    ui: &mut dyn UserInterface,
) -> Result<i32> {
    let mut text = args.text.join(" ");
    if normalize_text(&text).is_none() && ui.is_interactive() {
        text = ui
            .prompt(&Prompt::input("prompt_text", "Prompt text"))?
            .as_string();
    }
    if normalize_text(&text).is_none() {
        ui.error("Prompt text is empty");
        return Ok(1);
    }

    let snapshot = workspace.snapshot();
    let folder_id = match &args.folder {
        Some(query) => resolve_folder(&snapshot, query)?.id.clone(),
        None => snapshot.active_folder_id().to_string(),
    };

    let after = workspace.update(|store| store.add_prompt(&folder_id, &text, args.name.as_deref()));
    let Some(folder) = after.folder(&folder_id) else {
        ui.error("Folder disappeared while adding");
        return Ok(1);
    };
    let Some(prompt) = folder.prompts.first() else {
        ui.error("Prompt was not added");
        return Ok(1);
    };

    if ui.output_mode() == OutputMode::Quiet {
        ui.message(&prompt.id.to_string());
    } else {
        ui.success(&format!("Added prompt {} to {}", prompt.id, folder.name));
    }
    Ok(0)
}

/// The edit command implementation.
pub struct EditCommand {
    config: AppConfig,
    args: EditArgs,
}

impl EditCommand {
    /// Create a new edit command.
    pub fn new(config: &AppConfig, args: EditArgs) -> Self {
        Self {
            config: config.clone(),
            args,
        }
    }
}

impl Command for EditCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> crate::error::Result<CommandResult> {
        let mut workspace = open_workspace(&self.config);
        let code = edit_prompt(&mut workspace, &self.args, ui)?;
        Ok(CommandResult::from_exit_code(code))
    }
}

fn edit_prompt(
    workspace: &mut Workspace<FileSlotStore>,
    args: &EditArgs,
    ui: &mut dyn UserInterface,
) -> Result<i32> {
    let text = args.text.join(" ");
    if normalize_text(&text).is_none() {
        ui.error("Prompt text is empty");
        return Ok(1);
    }

    let snapshot = workspace.snapshot();
    let (_, prompt) = require_prompt(&snapshot, args.id)?;
    // An omitted --name keeps the current label.
    let label = args.name.as_deref().or(prompt.file_name.as_deref());

    workspace.update(|store| store.edit_prompt(args.id, &text, label));
    ui.success(&format!("Updated prompt {}", args.id));
    Ok(0)
}

/// The rm command implementation.
pub struct RemoveCommand {
    config: AppConfig,
    args: RmArgs,
}

impl RemoveCommand {
    /// Create a new rm command.
    pub fn new(config: &AppConfig, args: RmArgs) -> Self {
        Self {
            config: config.clone(),
            args,
        }
    }
}

impl Command for RemoveCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> crate::error::Result<CommandResult> {
        let mut workspace = open_workspace(&self.config);
        let code = remove_prompt(&mut workspace, &self.args, ui)?;
        Ok(CommandResult::from_exit_code(code))
    }
}

fn remove_prompt(
    workspace: &mut Workspace<FileSlotStore>,
    args: &RmArgs,
    ui: &mut dyn UserInterface,
) -> Result<i32> {
    let snapshot = workspace.snapshot();
    let (folder, _) = require_prompt(&snapshot, args.id)?;

    if !args.force && ui.is_interactive() {
        let prompt = Prompt::confirm("confirm_delete", "Delete this prompt?", false);
        match ui.prompt(&prompt)? {
            PromptResult::Bool(true) => {}
            _ => {
                ui.message("Cancelled");
                return Ok(0);
            }
        }
    }

    workspace.update(|store| store.delete_prompt(args.id));
    ui.success(&format!("Deleted prompt {} from {}", args.id, folder.name));
    Ok(0)
}

/// The mv command implementation.
pub struct MoveCommand {
    config: AppConfig,
    args: MvArgs,
}

impl MoveCommand {
    /// Create a new mv command.
    pub fn new(config: &AppConfig, args: MvArgs) -> Self {
        Self {
            config: config.clone(),
            args,
        }
    }
}

impl Command for MoveCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> crate::error::Result<CommandResult> {
        let mut workspace = open_workspace(&self.config);
        let code = move_prompt(&mut workspace, &self.args, ui)?;
        Ok(CommandResult::from_exit_code(code))
    }
}

fn move_prompt(
    workspace: &mut Workspace<FileSlotStore>,
    args: &MvArgs,
    ui: &mut dyn UserInterface,
) -> Result<i32> {
    let snapshot = workspace.snapshot();
    require_prompt(&snapshot, args.id)?;
    let target = resolve_folder(&snapshot, &args.folder)?;

    workspace.update(|store| store.move_prompt(args.id, &target.id));
    ui.success(&format!("Moved prompt {} to {}", args.id, target.name));
    Ok(0)
}

/// The show command implementation.
pub struct ShowCommand {
    config: AppConfig,
    args: ShowArgs,
}

impl ShowCommand {
    /// Create a new show command.
    pub fn new(config: &AppConfig, args: ShowArgs) -> Self {
        Self {
            config: config.clone(),
            args,
        }
    }
}

impl Command for ShowCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> crate::error::Result<CommandResult> {
        let workspace = open_workspace(&self.config);
        let snapshot = workspace.snapshot();
        let (folder, prompt) = require_prompt(&snapshot, self.args.id)?;

        if ui.output_mode().shows_details() {
            ui.show_header(&format!("Prompt {}", prompt.id));
            ui.message(&format!("Folder:  {}", folder.name));
            if let Some(name) = &prompt.file_name {
                ui.message(&format!("Name:    {}", name));
            }
            ui.message(&format!("Created: {}", prompt.timestamp));
            ui.message("");
        }
        ui.message(&prompt.text);

        Ok(CommandResult::success())
    }
}

/// The copy command implementation.
pub struct CopyCommand {
    config: AppConfig,
    args: CopyArgs,
    clipboard: Box<dyn Clipboard>,
}

impl CopyCommand {
    /// Create a copy command that uses the system clipboard.
    pub fn new(config: &AppConfig, args: CopyArgs) -> Self {
        Self::with_clipboard(config, args, Box::new(SystemClipboard::new()))
    }

    /// Create a copy command writing to the given clipboard.
    pub fn with_clipboard(config: &AppConfig, args: CopyArgs, clipboard: Box<dyn Clipboard>) -> Self {
        Self {
            config: config.clone(),
            args,
            clipboard,
        }
    }
}

impl Command for CopyCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> crate::error::Result<CommandResult> {
        let workspace = open_workspace(&self.config);
        let snapshot = workspace.snapshot();
        let (_, prompt) = require_prompt(&snapshot, self.args.id)?;

        self.clipboard.copy(&prompt.text)?;
        ui.success(&format!("Copied prompt {} to clipboard", prompt.id));
        Ok(CommandResult::success())
    }
}
