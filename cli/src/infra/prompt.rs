//! `Prompter` implementations for attended and unattended runs.

use anyhow::Result;

use crate::application::ports::Prompter;

/// Asks on the controlling terminal, or declines when unattended.
pub struct ConsolePrompter {
    interactive: bool,
}

impl ConsolePrompter {
    #[must_use]
    pub fn interactive() -> Self {
        Self { interactive: true }
    }

    /// Never blocks; every question is answered "no".
    #[must_use]
    pub fn unattended() -> Self {
        Self { interactive: false }
    }
}

impl Prompter for ConsolePrompter {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        if !self.interactive {
            tracing::info!(prompt, "unattended run; declining");
            return Ok(false);
        }
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()?;
        Ok(confirmed)
    }
}
