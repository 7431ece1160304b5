//! CLI command implementations.
//!
//! Each function backs one subcommand and returns `Err(message)` for `main`
//! to print before exiting with status 1.

pub mod input;
pub mod workflow;

/// Pretty-print a JSON value to stdout.
pub fn print_json(value: &serde_json::Value) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
    );
}
