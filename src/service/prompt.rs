//! Interactive and non-interactive answer sources for the confirmation step

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("Prompt failed: {0}")]
    Terminal(#[from] dialoguer::Error),
}

/// Source of answers for the descriptor prompts.
///
/// `input` returns `default` when the user submits an empty answer.
pub trait Prompter {
    fn input(&self, prompt: &str, default: &str) -> Result<String, PromptError>;

    fn confirm(&self, prompt: &str) -> Result<bool, PromptError>;
}

/// Terminal prompts via dialoguer
pub struct DialoguerPrompter {
    theme: ColorfulTheme,
}

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for DialoguerPrompter {
    fn input(&self, prompt: &str, default: &str) -> Result<String, PromptError> {
        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true);
        if !default.is_empty() {
            input = input.default(default.to_string());
        }

        let answer = input.interact_text()?;
        Ok(match answer.trim() {
            "" => default.to_string(),
            trimmed => trimmed.to_string(),
        })
    }

    fn confirm(&self, prompt: &str) -> Result<bool, PromptError> {
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(false)
            .interact()?)
    }
}

/// Accepts every default and answers yes at the gate (`--auto`).
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoPrompter;

impl Prompter for AutoPrompter {
    fn input(&self, _prompt: &str, default: &str) -> Result<String, PromptError> {
        Ok(default.to_string())
    }

    fn confirm(&self, _prompt: &str) -> Result<bool, PromptError> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_prompter_takes_defaults() {
        let prompter = AutoPrompter;
        assert_eq!(prompter.input("Port", "3000").unwrap(), "3000");
        assert_eq!(prompter.input("Description", "").unwrap(), "");
        assert!(prompter.confirm("Proceed?").unwrap());
    }
}
