//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. Every command opens the workspace
//! in the configured data directory, performs one store operation, and
//! reports through the [`UserInterface`](crate::ui::UserInterface).

pub mod completions;
pub mod dispatcher;
pub mod display;
pub mod folder;
pub mod list;
pub mod prompt;
pub mod status;
pub mod transfer;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
