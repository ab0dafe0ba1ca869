//! Promptfold CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use promptfold::cli::{Cli, CommandDispatcher};
use promptfold::config::load_config;
use promptfold::ui::create_ui;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN
///
/// Logs go to stderr so `show`, `list --json` and `export -o -` stay pipeable.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("promptfold=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("promptfold=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn is_ci() -> bool {
    std::env::var_os("CI").is_some()
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("Promptfold starting with args: {:?}", cli);

    // Handle --no-color
    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    let mut config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("✗ Error: {}", e);
            return ExitCode::from(1);
        }
    };
    cli.apply_overrides(&mut config);

    let output_mode = cli.output_mode().unwrap_or_else(|| config.output.into());
    let mut ui = create_ui(!is_ci(), output_mode);

    let dispatcher = CommandDispatcher::new(config);
    match dispatcher.dispatch(&cli, ui.as_mut()) {
        Ok(result) => ExitCode::from(result.process_exit_code()),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}
