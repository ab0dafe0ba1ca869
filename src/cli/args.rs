//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::AppConfig;
use crate::ui::OutputMode;

use super::commands::folder::FolderArgs;

/// Promptfold - organize prompts into folders.
#[derive(Debug, Parser)]
#[command(name = "promptfold")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding saved folders (overrides config and PROMPTFOLD_DATA_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Path to config file (overrides the user config directory)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Output mode requested by flags, if any.
    pub fn output_mode(&self) -> Option<OutputMode> {
        if self.quiet {
            Some(OutputMode::Quiet)
        } else if self.verbose {
            Some(OutputMode::Verbose)
        } else {
            None
        }
    }

    /// Apply flag overrides on top of the loaded configuration.
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(dir) = &self.data_dir {
            config.data_dir = Some(dir.clone());
        }
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Add a prompt (to the active folder unless --folder is given)
    Add(AddArgs),

    /// Replace a prompt's text
    Edit(EditArgs),

    /// Delete a prompt
    Rm(RmArgs),

    /// Move a prompt to another folder
    Mv(MvArgs),

    /// Print a prompt's text
    Show(ShowArgs),

    /// Copy a prompt's text to the clipboard
    Copy(CopyArgs),

    /// List and search prompts (default if no command specified)
    List(ListArgs),

    /// Manage folders
    Folder(FolderArgs),

    /// Export every folder to a JSON file
    Export(ExportArgs),

    /// Replace everything with the contents of a JSON export
    Import(ImportArgs),

    /// Show the active folder and counts
    Status(StatusArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `add` command.
#[derive(Debug, Clone, clap::Args)]
pub struct AddArgs {
    /// Prompt text (words are joined with spaces; asked for when omitted)
    #[arg(value_name = "TEXT")]
    pub text: Vec<String>,

    /// Optional label shown next to the prompt
    #[arg(short, long, value_name = "FILE_NAME")]
    pub name: Option<String>,

    /// Target folder id or name
    #[arg(short, long, value_name = "FOLDER")]
    pub folder: Option<String>,
}

/// Arguments for the `edit` command.
#[derive(Debug, Clone, clap::Args)]
pub struct EditArgs {
    /// Prompt id
    pub id: i64,

    /// New prompt text
    #[arg(value_name = "TEXT", required = true)]
    pub text: Vec<String>,

    /// New label (an empty value clears it; omitted keeps the current one)
    #[arg(short, long, value_name = "FILE_NAME")]
    pub name: Option<String>,
}

/// Arguments for the `rm` command.
#[derive(Debug, Clone, clap::Args)]
pub struct RmArgs {
    /// Prompt id
    pub id: i64,

    /// Don't prompt for confirmation
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for the `mv` command.
#[derive(Debug, Clone, clap::Args)]
pub struct MvArgs {
    /// Prompt id
    pub id: i64,

    /// Target folder id or name
    pub folder: String,
}

/// Arguments for the `show` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ShowArgs {
    /// Prompt id
    pub id: i64,
}

/// Arguments for the `copy` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CopyArgs {
    /// Prompt id
    pub id: i64,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Case-insensitive text to match against prompt text and names
    pub query: Option<String>,

    /// Search every folder instead of the active one
    #[arg(short, long)]
    pub all: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `export` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ExportArgs {
    /// Output file or directory (`-` for stdout; default: export dir)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `import` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ImportArgs {
    /// JSON file produced by `export` (or a legacy prompt array)
    pub file: PathBuf,
}

/// Arguments for the `status` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::folder::FolderSubcommand;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_command_is_allowed() {
        let cli = Cli::try_parse_from(["promptfold"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn add_joins_words_and_takes_options() {
        let cli = Cli::try_parse_from([
            "promptfold", "add", "hello", "world", "--name", "greet.md", "--folder", "Work",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Add(args)) => {
                assert_eq!(args.text, vec!["hello", "world"]);
                assert_eq!(args.name.as_deref(), Some("greet.md"));
                assert_eq!(args.folder.as_deref(), Some("Work"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn edit_requires_text() {
        assert!(Cli::try_parse_from(["promptfold", "edit", "12"]).is_err());
    }

    #[test]
    fn rm_parses_id_and_force() {
        let cli = Cli::try_parse_from(["promptfold", "rm", "1700000000000", "-f"]).unwrap();
        match cli.command {
            Some(Commands::Rm(args)) => {
                assert_eq!(args.id, 1_700_000_000_000);
                assert!(args.force);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn non_numeric_id_is_rejected() {
        assert!(Cli::try_parse_from(["promptfold", "show", "abc"]).is_err());
    }

    #[test]
    fn list_flags() {
        let cli = Cli::try_parse_from(["promptfold", "list", "email", "--all", "--json"]).unwrap();
        match cli.command {
            Some(Commands::List(args)) => {
                assert_eq!(args.query.as_deref(), Some("email"));
                assert!(args.all);
                assert!(args.json);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn folder_subcommands_parse() {
        let cli =
            Cli::try_parse_from(["promptfold", "folder", "rename", "Work", "Day", "Job"]).unwrap();
        match cli.command {
            Some(Commands::Folder(args)) => match args.command {
                FolderSubcommand::Rename { folder, name } => {
                    assert_eq!(folder, "Work");
                    assert_eq!(name, vec!["Day", "Job"]);
                }
                other => panic!("unexpected {:?}", other),
            },
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["promptfold", "status", "--data-dir", "/tmp/pf", "-q"]).unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/pf")));
        assert_eq!(cli.output_mode(), Some(OutputMode::Quiet));
    }

    #[test]
    fn data_dir_flag_overrides_config() {
        let cli = Cli::try_parse_from(["promptfold", "--data-dir", "/flag"]).unwrap();
        let mut config = AppConfig {
            data_dir: Some(PathBuf::from("/config")),
            ..Default::default()
        };
        cli.apply_overrides(&mut config);
        assert_eq!(config.data_dir, Some(PathBuf::from("/flag")));
    }

    #[test]
    fn no_flags_means_no_output_override() {
        let cli = Cli::try_parse_from(["promptfold"]).unwrap();
        assert_eq!(cli.output_mode(), None);
    }
}
