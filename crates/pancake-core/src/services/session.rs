//! Conversational session loop.
//!
//! Drives turns against a [`ContentGenerator`] until the user quits:
//!
//! ```text
//! input -> push user -> generate -> push model -> show -> extract block -> action
//!                          |
//!                          +-- failure -> drop user turn -> report -> prompt again
//! ```
//!
//! Terminal interaction is delegated to a [`SessionIo`] so the loop itself
//! can be driven by scripted input in tests.

use std::io;

use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::{CodeBlock, Transcript, extract_code_block};
use crate::ports::{ContentGenerator, GenerateError};

/// What the user wants after a reply has been handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextTurn {
    /// End the session.
    Quit,
    /// Submit this text as the next user turn.
    Prompt(String),
}

/// Terminal side of the session.
pub trait SessionIo {
    /// Display a successful reply.
    fn show_reply(&mut self, reply: &str);

    /// Tell the user a generation attempt failed.
    fn report_failure(&mut self, error: &GenerateError);

    /// Read a fresh line of free text after a failure.
    fn prompt_retry(&mut self) -> io::Result<String>;

    /// Offer run/copy/quit/follow-up for the extracted block and block until
    /// one is resolved.
    fn choose_action(&mut self, block: &CodeBlock) -> io::Result<NextTurn>;
}

/// Failures that end a session early.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The terminal input device could not be opened or read.
    #[error("input device error: {0}")]
    Input(#[from] io::Error),
}

/// Counters reported when a session ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Generation requests sent.
    pub requests: usize,
    /// Requests that failed and were dropped from the transcript.
    pub failures: usize,
}

/// `exit` / `quit`, case-insensitive.
pub fn is_exit_keyword(input: &str) -> bool {
    let input = input.trim();
    input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit")
}

/// One interactive exchange with a generator.
pub struct Session<'a, G: ContentGenerator + ?Sized> {
    generator: &'a G,
    transcript: Transcript,
}

impl<'a, G: ContentGenerator + ?Sized> Session<'a, G> {
    /// Start a session seeded with the default assistant instruction.
    pub fn new(generator: &'a G) -> Self {
        Self::with_transcript(generator, Transcript::for_assistant())
    }

    pub const fn with_transcript(generator: &'a G, transcript: Transcript) -> Self {
        Self {
            generator,
            transcript,
        }
    }

    pub const fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Run until the user quits. Empty input ends the session silently.
    pub async fn run<I: SessionIo>(
        &mut self,
        io: &mut I,
        initial_input: &str,
    ) -> Result<SessionSummary, SessionError> {
        let mut summary = SessionSummary::default();
        let mut input = initial_input.trim().to_string();

        loop {
            if input.is_empty() {
                debug!("Empty input, ending session");
                break;
            }
            if is_exit_keyword(&input) {
                debug!("Exit keyword received");
                break;
            }

            self.transcript.push_user(input.as_str());
            summary.requests += 1;

            match self.generator.generate(&self.transcript).await {
                Ok(reply) => {
                    self.transcript.push_model(reply.as_str());
                    io.show_reply(&reply);

                    let block = extract_code_block(&reply);
                    debug!(language = %block.language, "Extracted reply content");
                    match io.choose_action(&block)? {
                        NextTurn::Quit => break,
                        NextTurn::Prompt(next) => input = next.trim().to_string(),
                    }
                }
                Err(err) => {
                    warn!("Generation failed: {err}");
                    self.transcript.discard_last_user();
                    summary.failures += 1;
                    io.report_failure(&err);
                    input = io.prompt_retry()?.trim().to_string();
                }
            }
        }

        Ok(summary)
    }
}
