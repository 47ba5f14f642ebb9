//! Domain types for pancake.
//!
//! Pure data and pure functions: no network, no terminal, no processes.

mod code_block;
mod process_records;
mod project;
mod transcript;

pub use code_block::{CodeBlock, Language, extract_code_block};
pub use process_records::ProcessRecords;
pub use project::Project;
pub use transcript::{ASSISTANT_INSTRUCTION, Role, Transcript, TranscriptEntry};
