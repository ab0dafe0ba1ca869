//! Interactive prompts.

use console::Term;
use dialoguer::{Confirm, Input};

use crate::error::{PromptfoldError, Result};

use super::{parse_confirm, Prompt, PromptResult, PromptType};

/// Convert dialoguer errors to PromptfoldError.
fn map_dialoguer_err(e: dialoguer::Error) -> PromptfoldError {
    PromptfoldError::Io(e.into())
}

/// Prompt the user for input.
pub fn prompt_user(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    match &prompt.prompt_type {
        PromptType::Confirm => prompt_confirm(prompt, term),
        PromptType::Input => prompt_input(prompt, term),
    }
}

fn prompt_confirm(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    let default = prompt.default.as_deref().map(parse_confirm).unwrap_or(true);

    let result = Confirm::new()
        .with_prompt(&prompt.question)
        .default(default)
        .interact_on(term)
        .map_err(map_dialoguer_err)?;

    Ok(PromptResult::Bool(result))
}

fn prompt_input(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    let input = Input::<String>::new().with_prompt(&prompt.question);

    let result: String = if let Some(default) = &prompt.default {
        input
            .default(default.clone())
            .interact_on(term)
            .map_err(map_dialoguer_err)?
    } else {
        input.interact_on(term).map_err(map_dialoguer_err)?
    };

    Ok(PromptResult::String(result))
}
