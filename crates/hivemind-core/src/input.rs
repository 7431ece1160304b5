//! User input sources for steps with `requires_user_input`.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::{HivemindError, Result};

#[async_trait]
pub trait InputSource: Send + Sync {
    /// Show `prompt` and return one line of input, without the line ending.
    async fn read_line(&self, prompt: &str) -> Result<String>;
}

/// Reads from the process's stdin on a blocking worker thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinInput;

impl StdinInput {
    fn read_blocking(prompt: &str) -> Result<String> {
        read_from(io::stdin().lock(), io::stdout(), prompt)
    }
}

/// Write `prompt` to `writer`, then read one line from `reader`.
/// A reader at EOF is reported as closed input.
pub(crate) fn read_from<R: BufRead, W: Write>(
    mut reader: R,
    mut writer: W,
    prompt: &str,
) -> Result<String> {
    write!(writer, "{}", prompt)
        .and_then(|_| writer.flush())
        .map_err(|e| HivemindError::Input(format!("failed to write prompt: {}", e)))?;

    let mut line = String::new();
    let read = reader
        .read_line(&mut line)
        .map_err(|e| HivemindError::Input(format!("failed to read stdin: {}", e)))?;
    if read == 0 {
        return Err(HivemindError::Input("stdin closed".to_string()));
    }
    Ok(trim_line_ending(&line).to_string())
}

#[async_trait]
impl InputSource for StdinInput {
    async fn read_line(&self, prompt: &str) -> Result<String> {
        let prompt = prompt.to_string();
        tokio::task::spawn_blocking(move || Self::read_blocking(&prompt))
            .await
            .map_err(|e| HivemindError::Input(format!("input worker failed: {}", e)))?
    }
}

/// Answers prompts from a fixed queue, in order.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    answers: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedInput {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: Mutex::new(answers.into_iter().map(Into::into).collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts seen so far.
    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }

    pub async fn remaining(&self) -> usize {
        self.answers.lock().await.len()
    }
}

#[async_trait]
impl InputSource for ScriptedInput {
    async fn read_line(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().await.push(prompt.to_string());
        let answer = self.answers.lock().await.pop_front().ok_or_else(|| {
            HivemindError::Input(format!("no scripted answer left for prompt '{}'", prompt))
        })?;
        println!("{}{}", prompt, answer);
        Ok(answer)
    }
}

pub(crate) fn trim_line_ending(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}
