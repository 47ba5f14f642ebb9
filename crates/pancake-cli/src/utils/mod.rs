//! Shared CLI utilities.

pub mod input;

pub use input::{prompt_confirmation, prompt_string, read_line};
