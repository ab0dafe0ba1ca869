//! Shell completions generation.
//!
//! `promptfold completions <SHELL>` prints a completion script to stdout.

use std::io::Write;

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::{Cli, CompletionsArgs};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Binary name the scripts complete.
const BIN_NAME: &str = "promptfold";

/// The completions command implementation.
pub struct CompletionsCommand {
    args: CompletionsArgs,
}

impl CompletionsCommand {
    /// Create a new completions command.
    pub fn new(args: CompletionsArgs) -> Self {
        Self { args }
    }
}

impl Command for CompletionsCommand {
    fn execute(&self, _ui: &mut dyn UserInterface) -> crate::error::Result<CommandResult> {
        write_completions(self.args.shell, &mut std::io::stdout());
        Ok(CommandResult::success())
    }
}

/// Write the completion script for `shell` into `out`.
pub fn write_completions(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, BIN_NAME, out);
}
