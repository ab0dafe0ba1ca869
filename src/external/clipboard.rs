//! System clipboard access through platform copy tools.

use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

use crate::error::{PromptfoldError, Result};

/// Write-only access to the system clipboard.
pub trait Clipboard {
    /// Replace the clipboard contents with `text`.
    fn copy(&self, text: &str) -> Result<()>;
}

/// An external program that reads clipboard contents from stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardTool {
    pub program: String,
    pub args: Vec<String>,
}

impl ClipboardTool {
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Clipboard backed by the first platform tool that is installed.
#[derive(Debug, Clone)]
pub struct SystemClipboard {
    tools: Vec<ClipboardTool>,
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClipboard {
    /// Use the platform defaults, in order: `pbcopy`, `wl-copy`, `xclip`,
    /// `xsel`, `clip`.
    pub fn new() -> Self {
        Self::with_tools(vec![
            ClipboardTool::new("pbcopy", &[]),
            ClipboardTool::new("wl-copy", &[]),
            ClipboardTool::new("xclip", &["-selection", "clipboard"]),
            ClipboardTool::new("xsel", &["--clipboard", "--input"]),
            ClipboardTool::new("clip", &[]),
        ])
    }

    /// Use an explicit list of tools, tried in order.
    pub fn with_tools(tools: Vec<ClipboardTool>) -> Self {
        Self { tools }
    }

    pub fn tools(&self) -> &[ClipboardTool] {
        &self.tools
    }

    fn pipe_into(tool: &ClipboardTool, text: &str) -> std::io::Result<bool> {
        let mut child = Command::new(&tool.program)
            .args(&tool.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        // stdin must be closed before waiting or the tool never sees EOF.
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(text.as_bytes()),
            None => Ok(()),
        };
        if !child.wait()?.success() {
            return Ok(false);
        }
        written.map(|_| true)
    }
}

impl Clipboard for SystemClipboard {
    fn copy(&self, text: &str) -> Result<()> {
        let mut failures = Vec::new();

        for tool in &self.tools {
            match Self::pipe_into(tool, text) {
                Ok(true) => {
                    tracing::debug!("Copied {} bytes with {}", text.len(), tool.program);
                    return Ok(());
                }
                Ok(false) => failures.push(format!("{} exited with an error", tool.command_line())),
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    tracing::debug!("Clipboard tool {} not installed", tool.program);
                }
                Err(e) => failures.push(format!("{}: {}", tool.command_line(), e)),
            }
        }

        let message = if failures.is_empty() {
            "no clipboard tool found".to_string()
        } else {
            failures.join("; ")
        };
        tracing::warn!("Clipboard copy failed: {}", message);
        Err(PromptfoldError::Clipboard { message })
    }
}
