//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use crate::cli::args::{Cli, Commands, ListArgs};
use crate::config::AppConfig;
use crate::error::Result;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output and prompts
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }

    /// Map a helper's exit code to a result.
    pub fn from_exit_code(exit_code: i32) -> Self {
        if exit_code == 0 {
            Self::success()
        } else {
            Self::failure(exit_code)
        }
    }

    /// Exit status for the process. Codes outside `0..=255` become 1 so a
    /// failure can never wrap around to success.
    pub fn process_exit_code(&self) -> u8 {
        u8::try_from(self.exit_code).unwrap_or(1)
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    config: AppConfig,
}

impl CommandDispatcher {
    /// Create a new dispatcher with the effective configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Get the effective configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = &self.config;
        match &cli.command {
            Some(Commands::Add(args)) => {
                super::prompt::AddCommand::new(config, args.clone()).execute(ui)
            }
            Some(Commands::Edit(args)) => {
                super::prompt::EditCommand::new(config, args.clone()).execute(ui)
            }
            Some(Commands::Rm(args)) => {
                super::prompt::RemoveCommand::new(config, args.clone()).execute(ui)
            }
            Some(Commands::Mv(args)) => {
                super::prompt::MoveCommand::new(config, args.clone()).execute(ui)
            }
            Some(Commands::Show(args)) => {
                super::prompt::ShowCommand::new(config, args.clone()).execute(ui)
            }
            Some(Commands::Copy(args)) => {
                super::prompt::CopyCommand::new(config, args.clone()).execute(ui)
            }
            Some(Commands::List(args)) => {
                super::list::ListCommand::new(config, args.clone()).execute(ui)
            }
            Some(Commands::Folder(args)) => {
                super::folder::FolderCommand::new(config, args.clone()).execute(ui)
            }
            Some(Commands::Export(args)) => {
                super::transfer::ExportCommand::new(config, args.clone()).execute(ui)
            }
            Some(Commands::Import(args)) => {
                super::transfer::ImportCommand::new(config, args.clone()).execute(ui)
            }
            Some(Commands::Status(args)) => {
                super::status::StatusCommand::new(config, args.clone()).execute(ui)
            }
            Some(Commands::Completions(args)) => {
                super::completions::CompletionsCommand::new(args.clone()).execute(ui)
            }
            None => {
                // Default to listing the active folder
                super::list::ListCommand::new(config, ListArgs::default()).execute(ui)
            }
        }
    }
}
