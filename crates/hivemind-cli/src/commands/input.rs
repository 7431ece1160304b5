//! Terminal input for interactive runs.

use async_trait::async_trait;
use dialoguer::Input;

use hivemind_core::error::{HivemindError, Result};
use hivemind_core::input::{InputSource, StdinInput};

/// Uses a dialoguer prompt when a person is at the terminal and falls back to
/// plain line reading when stdin is piped.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalInput;

impl TerminalInput {
    fn prompt_blocking(prompt: &str) -> Result<String> {
        Input::<String>::new()
            .with_prompt(prompt.trim_end().trim_end_matches(':'))
            .allow_empty(true)
            .interact_text()
            .map_err(|e| HivemindError::Input(format!("terminal prompt failed: {}", e)))
    }
}

#[async_trait]
impl InputSource for TerminalInput {
    async fn read_line(&self, prompt: &str) -> Result<String> {
        if !console::user_attended() {
            return StdinInput.read_line(prompt).await;
        }

        let prompt = prompt.to_string();
        tokio::task::spawn_blocking(move || Self::prompt_blocking(&prompt))
            .await
            .map_err(|e| HivemindError::Input(format!("input worker failed: {}", e)))?
    }
}
