//! User interface components.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for interactive terminal usage
//! - [`NonInteractiveUI`] for pipes, scripts and CI
//! - [`MockUI`] for tests
//! - Prompts and tables
//!
//! # Example
//!
//! ```
//! use promptfold::ui::{create_ui, OutputMode};
//!
//! // Use non-interactive mode for testability
//! let mut ui = create_ui(false, OutputMode::Quiet);
//! ui.show_header("Folders");
//! ui.success("Saved");
//! ```

pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod prompts;
pub mod table;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use prompts::prompt_user;
pub use table::Table;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, PromptfoldTheme};

use crate::error::Result;

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display data to the user. Never suppressed by the output mode.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Show a prompt and get user input.
    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult>;

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Show a contextual hint.
    fn show_hint(&mut self, hint: &str);

    /// Check if running in interactive mode.
    fn is_interactive(&self) -> bool;
}

/// A prompt to show to the user.
#[derive(Debug, Clone)]
pub struct Prompt {
    /// Unique key for the prompt (used for overrides and lookup).
    pub key: String,
    /// The question to display.
    pub question: String,
    /// The type of prompt.
    pub prompt_type: PromptType,
    /// Default value if user just presses enter.
    pub default: Option<String>,
}

impl Prompt {
    /// A yes/no question.
    pub fn confirm(key: &str, question: impl Into<String>, default: bool) -> Self {
        Self {
            key: key.to_string(),
            question: question.into(),
            prompt_type: PromptType::Confirm,
            default: Some(default.to_string()),
        }
    }

    /// A free-form text question with no default.
    pub fn input(key: &str, question: impl Into<String>) -> Self {
        Self {
            key: key.to_string(),
            question: question.into(),
            prompt_type: PromptType::Input,
            default: None,
        }
    }
}

/// The type of prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptType {
    /// Yes/no confirmation.
    Confirm,
    /// Free-form text input.
    Input,
}

/// Result of a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResult {
    /// Boolean result from confirm.
    Bool(bool),
    /// String result from input.
    String(String),
}

impl PromptResult {
    /// Get as string.
    pub fn as_string(&self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::String(s) => s.clone(),
        }
    }

    /// Get as bool if this is a Bool result.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// Interpret a textual answer to a yes/no question.
pub(crate) fn parse_confirm(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "true" | "yes" | "y" | "1"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_result_as_string_bool() {
        assert_eq!(PromptResult::Bool(true).as_string(), "true");
        assert_eq!(PromptResult::Bool(false).as_string(), "false");
    }

    #[test]
    fn prompt_result_as_string_string() {
        assert_eq!(
            PromptResult::String("hello".to_string()).as_string(),
            "hello"
        );
    }

    #[test]
    fn prompt_result_as_bool() {
        assert_eq!(PromptResult::Bool(true).as_bool(), Some(true));
        assert_eq!(PromptResult::String("test".to_string()).as_bool(), None);
    }

    #[test]
    fn confirm_prompt_carries_default() {
        let prompt = Prompt::confirm("delete", "Delete?", false);
        assert_eq!(prompt.prompt_type, PromptType::Confirm);
        assert_eq!(prompt.default.as_deref(), Some("false"));
    }

    #[test]
    fn input_prompt_has_no_default() {
        let prompt = Prompt::input("text", "Prompt text");
        assert_eq!(prompt.prompt_type, PromptType::Input);
        assert!(prompt.default.is_none());
    }

    #[test]
    fn parse_confirm_accepts_common_yes() {
        for answer in ["y", "YES", "true", "1", " yes "] {
            assert!(parse_confirm(answer), "{}", answer);
        }
        for answer in ["n", "no", "false", "", "maybe"] {
            assert!(!parse_confirm(answer), "{}", answer);
        }
    }
}
