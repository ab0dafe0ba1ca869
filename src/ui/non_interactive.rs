//! Non-interactive UI for pipes, scripts and CI.

use std::collections::HashMap;

use crate::error::{PromptfoldError, Result};

use super::{parse_confirm, OutputMode, Prompt, PromptResult, PromptType, UserInterface};

/// Prefix of environment variables that answer prompts.
pub const PROMPT_ENV_PREFIX: &str = "PROMPTFOLD_PROMPT_";

/// UI implementation for non-interactive mode.
///
/// Prompts are answered from `PROMPTFOLD_PROMPT_<KEY>` environment variables,
/// then from the prompt default. Status output goes to stdout, warnings and
/// errors to stderr.
pub struct NonInteractiveUI {
    mode: OutputMode,
    env_overrides: HashMap<String, String>,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        let env_overrides: HashMap<String, String> = std::env::vars()
            .filter(|(k, _)| k.starts_with(PROMPT_ENV_PREFIX))
            .collect();

        Self {
            mode,
            env_overrides,
        }
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self {
            mode,
            env_overrides: overrides,
        }
    }

    fn answer(prompt: &Prompt, raw: &str) -> PromptResult {
        match prompt.prompt_type {
            PromptType::Confirm => PromptResult::Bool(parse_confirm(raw)),
            PromptType::Input => PromptResult::String(raw.to_string()),
        }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        println!("{}", msg);
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("⚠ {}", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        let env_key = format!("{}{}", PROMPT_ENV_PREFIX, prompt.key.to_uppercase());
        if let Some(value) = self.env_overrides.get(&env_key) {
            return Ok(Self::answer(prompt, value));
        }

        if let Some(default) = &prompt.default {
            return Ok(Self::answer(prompt, default));
        }

        Err(PromptfoldError::PromptUnavailable {
            key: prompt.key.clone(),
        })
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            println!("\n{}\n", title);
        }
    }

    fn show_hint(&mut self, hint: &str) {
        if self.mode.shows_status() {
            println!("  {}", hint);
        }
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ui_with(pairs: &[(&str, &str)]) -> NonInteractiveUI {
        let overrides = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        NonInteractiveUI::with_overrides(OutputMode::Normal, overrides)
    }

    #[test]
    fn is_never_interactive() {
        assert!(!ui_with(&[]).is_interactive());
    }

    #[test]
    fn confirm_uses_default() {
        let mut ui = ui_with(&[]);
        let result = ui.prompt(&Prompt::confirm("delete", "Delete?", true)).unwrap();
        assert_eq!(result, PromptResult::Bool(true));
    }

    #[test]
    fn env_override_wins_over_default() {
        let mut ui = ui_with(&[("PROMPTFOLD_PROMPT_DELETE", "no")]);
        let result = ui.prompt(&Prompt::confirm("delete", "Delete?", true)).unwrap();
        assert_eq!(result, PromptResult::Bool(false));
    }

    #[test]
    fn input_reads_override() {
        let mut ui = ui_with(&[("PROMPTFOLD_PROMPT_TEXT", "from env")]);
        let result = ui.prompt(&Prompt::input("text", "Prompt text")).unwrap();
        assert_eq!(result.as_string(), "from env");
    }

    #[test]
    fn input_without_default_errors() {
        let mut ui = ui_with(&[]);
        let err = ui.prompt(&Prompt::input("text", "Prompt text")).unwrap_err();
        assert!(matches!(err, PromptfoldError::PromptUnavailable { ref key } if key == "text"));
    }

    #[test]
    fn keeps_output_mode() {
        let ui = NonInteractiveUI::with_overrides(OutputMode::Quiet, HashMap::new());
        assert_eq!(ui.output_mode(), OutputMode::Quiet);
    }
}
