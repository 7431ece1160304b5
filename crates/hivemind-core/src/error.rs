//! Core error type for HiveMind.
//!
//! Step dispatch never fails: unknown agents and unknown actions degrade to a
//! printed notice or the `Action not recognized.` sentinel. Errors are reserved
//! for loading workflow files and for collecting user input.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum HivemindError {
    #[error("Failed to read workflow file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse workflow: {0}")]
    Parse(String),

    #[error("Input error: {0}")]
    Input(String),
}

pub type Result<T> = std::result::Result<T, HivemindError>;
