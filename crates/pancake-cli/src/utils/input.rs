//! User input utilities for interactive command-line prompts.

use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};

/// Read one line from `reader`, trimmed. End of input yields an empty string.
pub fn read_line<R: BufRead>(reader: &mut R) -> io::Result<String> {
    let mut input = String::new();
    reader.read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// Prompts the user for a string input.
///
/// The prompt is printed without a trailing newline and the answer is read
/// from stdin with whitespace trimmed.
///
/// # Errors
///
/// Returns an error if reading from stdin fails.
pub fn prompt_string(prompt: &str) -> Result<String> {
    print!("{prompt}");
    io::stdout().flush().context("Failed to flush stdout")?;
    read_line(&mut io::stdin().lock()).context("Failed to read user input")
}

/// Interpret a yes/no answer. Only `y` / `yes` (any case) confirm.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Prompts the user for a yes/no confirmation.
///
/// Accepts 'y' or 'yes' (case insensitive). Anything else, including empty
/// input, is treated as 'no'.
///
/// # Errors
///
/// Returns an error if reading from stdin fails.
pub fn prompt_confirmation(prompt: &str) -> Result<bool> {
    let answer = prompt_string(&format!("{prompt} (y/N): "))?;
    Ok(is_affirmative(&answer))
}
