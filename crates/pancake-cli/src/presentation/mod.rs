//! Shared CLI presentation utilities.
//!
//! Keep this module format-only: no domain transforms.

pub mod markdown;
pub mod tables;

pub use markdown::{MAX_RENDER_WIDTH, render_markdown};
pub use tables::{format_optional, print_separator, print_table, truncate_string};
