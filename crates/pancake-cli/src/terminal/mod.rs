//! Terminal I/O for the AI session.
//!
//! - [`raw_mode`]: exclusive raw-keystroke access, released on every exit path
//! - [`keys`]: menu text and keystroke-to-action resolution
//! - [`spinner`]: the "Thinking..." indicator around generation calls
//! - [`clipboard`]: copy action backed by the system clipboard

pub mod clipboard;
pub mod keys;
pub mod raw_mode;
pub mod spinner;

pub use clipboard::copy_to_clipboard;
pub use keys::{
    KeyAction, KeySource, TypedAhead, collect_typed_ahead, menu_line, resolve_action,
};
pub use raw_mode::RawMode;
pub use spinner::{ThinkingIndicator, WithThinking};
