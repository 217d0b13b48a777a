//! User interface module - logging sink, formatting and prompts.
//!
//! Separates concerns:
//! - `logger` - The [Logger] sink the pipeline reports progress through
//! - `formatter` - Pure formatting functions
//! - This module - Interactive prompts and user input handling

use std::io::{self, Write};

use anyhow::Result;

pub mod formatter;
pub mod logger;

pub use formatter::{
    display_available_branches, display_commit_analysis, display_manual_push_instruction,
    display_notes, display_release_plan, display_status, display_success,
};
pub use logger::{ConsoleLogger, Logger, RecordingLogger};

/// Read one trimmed, lowercased line from stdin after printing `prompt`
fn read_answer(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_lowercase())
}

/// Whether an answer confirms, falling back to `default` for an empty answer
fn is_confirmed(answer: &str, default: bool) -> bool {
    match answer {
        "" => default,
        "y" | "yes" => true,
        _ => false,
    }
}

/// Confirms creating the planned release tag. Default is to confirm.
pub fn confirm_release(tag: &str) -> Result<bool> {
    let answer = read_answer(&format!("\nCreate release tag {} (Y/n): ", tag))?;
    Ok(is_confirmed(&answer, true))
}

/// Prompts user to confirm pushing the release tag to a remote once created.
///
/// Default is not to push.
pub fn confirm_push_tag(tag: &str, remote: &str) -> Result<bool> {
    let answer = read_answer(&format!(
        "\nPush tag '{}' to remote '{}' after creating it (y/N): ",
        tag, remote
    ))?;
    Ok(is_confirmed(&answer, false))
}
