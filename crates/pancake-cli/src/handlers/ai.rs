//! AI command handler.
//!
//! Runs the conversational session against the configured provider. The
//! terminal side of the session is [`TerminalSession`]: it renders replies,
//! shows the action menu, reads one keystroke in raw mode and switches back
//! to line mode for follow-ups and retries.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use pancake_core::{CodeBlock, GenerateError, NextTurn, ProviderKind, Session, SessionIo};
use pancake_genai::build_generator;
use pancake_runtime::Interpreter;
use tracing::{debug, info};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::markdown::terminal_width;
use crate::presentation::{print_separator, render_markdown};
use crate::terminal::keys::MENU_RULE_WIDTH;
use crate::terminal::{
    KeyAction, RawMode, TypedAhead, WithThinking, collect_typed_ahead, copy_to_clipboard,
    menu_line, resolve_action,
};
use crate::utils::input;

const RETRY_RULE_WIDTH: usize = 40;
const CLEAR_LINE: &str = "\r\x1b[K";
const CLEAR_TWO_LINES: &str = "\r\x1b[K\x1b[1A\x1b[K";

/// Execute the ai command.
///
/// `description` words form the first request; when empty the user is
/// prompted for one. `provider` overrides `ai_provider` from the config.
pub async fn execute(
    ctx: &CliContext,
    description: &[String],
    provider: Option<ProviderKind>,
) -> Result<()> {
    let kind = provider.unwrap_or(ctx.config.ai_provider);
    let generator = WithThinking::new(build_generator(&ctx.config, kind).map_err(CliError::from)?);
    info!(provider = kind.display_name(), "Starting AI session");

    let mut initial = description.join(" ");
    if initial.trim().is_empty() {
        initial = input::prompt_string("> ")?;
    }

    let mut terminal = TerminalSession::new(io::stdin().lock());
    let mut session = Session::new(&generator);
    let summary = session
        .run(&mut terminal, &initial)
        .await
        .map_err(CliError::from)?;
    debug!(
        requests = summary.requests,
        failures = summary.failures,
        "AI session ended"
    );

    if let Some(run) = terminal.take_pending_run() {
        println!("> {}", run.interpreter.program());
        if let Err(e) = run.interpreter.execute(&run.code).await {
            eprintln!("\n❌ Error during execution: {e}");
        }
    }
    Ok(())
}

/// Code chosen with the run action, executed once the session has ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRun {
    pub interpreter: Interpreter,
    pub code: String,
}

/// Terminal-backed [`SessionIo`].
pub struct TerminalSession<R> {
    input: R,
    pending_run: Option<PendingRun>,
}

impl<R: BufRead> TerminalSession<R> {
    /// `input` supplies line-buffered text for follow-ups and retries.
    pub const fn new(input: R) -> Self {
        Self {
            input,
            pending_run: None,
        }
    }

    pub const fn take_pending_run(&mut self) -> Option<PendingRun> {
        self.pending_run.take()
    }

    /// Carry out a resolved menu action. Raw mode must already be released.
    fn apply(&mut self, action: KeyAction, block: &CodeBlock) -> io::Result<NextTurn> {
        match action {
            KeyAction::Quit => {
                println!("\nQuitting.");
                Ok(NextTurn::Quit)
            }
            KeyAction::Copy => {
                print!("{CLEAR_TWO_LINES}");
                match copy_to_clipboard(&block.code) {
                    Ok(()) => println!("✅ Copied to clipboard!"),
                    Err(e) => eprintln!("❌ {e}"),
                }
                Ok(NextTurn::Quit)
            }
            KeyAction::Run => {
                print!("{CLEAR_TWO_LINES}");
                io::stdout().flush()?;
                self.pending_run = Interpreter::for_language(&block.language).map(|interpreter| {
                    PendingRun {
                        interpreter,
                        code: block.code.clone(),
                    }
                });
                Ok(NextTurn::Quit)
            }
            KeyAction::FollowUp(first) => self.follow_up(TypedAhead::started_with(first)),
        }
    }

    /// Echo what was typed in raw mode and finish the line in line mode.
    fn follow_up(&mut self, typed: TypedAhead) -> io::Result<NextTurn> {
        print!("{CLEAR_LINE}> {}", typed.text);
        if typed.submitted {
            println!();
            return Ok(NextTurn::Prompt(typed.text.trim().to_string()));
        }
        io::stdout().flush()?;
        let mut rest = String::new();
        self.input.read_line(&mut rest)?;
        Ok(NextTurn::Prompt(follow_up_text(&typed.text, &rest)))
    }
}

/// The typed follow-up: keys read in raw mode plus the rest of the line.
pub fn follow_up_text(typed: &str, rest: &str) -> String {
    format!("{typed}{rest}").trim().to_string()
}

impl<R: BufRead> SessionIo for TerminalSession<R> {
    fn show_reply(&mut self, reply: &str) {
        println!("{}", render_markdown(reply, terminal_width()));
    }

    fn report_failure(&mut self, error: &GenerateError) {
        eprintln!("❌ Error getting AI response: {error}");
    }

    fn prompt_retry(&mut self) -> io::Result<String> {
        print_separator(RETRY_RULE_WIDTH);
        print!("> ");
        io::stdout().flush()?;
        input::read_line(&mut self.input)
    }

    fn choose_action(&mut self, block: &CodeBlock) -> io::Result<NextTurn> {
        let runnable = Interpreter::for_language(&block.language).is_some();
        print_separator(MENU_RULE_WIDTH);
        print!("{}", menu_line(runnable));
        io::stdout().flush()?;

        let mut raw = RawMode::acquire()?;
        let action = resolve_action(&mut raw, runnable)?;
        let typed = match action {
            KeyAction::FollowUp(first) => Some(collect_typed_ahead(&mut raw, first)?),
            _ => None,
        };
        raw.release()?;
        debug!(?action, "Resolved menu action");

        match typed {
            Some(typed) => self.follow_up(typed),
            None => self.apply(action, block),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pancake_core::extract_code_block;
    use std::io::Cursor;

    fn session(input: &str) -> TerminalSession<Cursor<Vec<u8>>> {
        TerminalSession::new(Cursor::new(input.as_bytes().to_vec()))
    }

    #[test]
    fn follow_up_keeps_first_character() {
        assert_eq!(follow_up_text("w", "hat about hidden files?\n"), "what about hidden files?");
        assert_eq!(follow_up_text("a", " b\n"), "a b");
        assert_eq!(follow_up_text("x", ""), "x");
    }

    #[test]
    fn submitted_burst_does_not_read_a_line() {
        let mut io = session("must not be read\n");
        let typed = TypedAhead {
            text: "sort by size ".into(),
            submitted: true,
        };
        assert_eq!(
            io.follow_up(typed).unwrap(),
            NextTurn::Prompt("sort by size".into())
        );
        assert_eq!(io.prompt_retry().unwrap(), "must not be read");
    }

    #[test]
    fn partial_burst_is_completed_from_the_line() {
        let mut io = session(" -la\n");
        let typed = TypedAhead {
            text: "ls".into(),
            submitted: false,
        };
        assert_eq!(io.follow_up(typed).unwrap(), NextTurn::Prompt("ls -la".into()));
    }

    #[test]
    fn follow_up_action_reads_rest_of_line() {
        let mut io = session("ow sort by size\nignored\n");
        let block = extract_code_block("```bash\nls\n```");
        let next = io.apply(KeyAction::FollowUp('n'), &block).unwrap();
        assert_eq!(next, NextTurn::Prompt("now sort by size".into()));
    }

    #[test]
    fn run_defers_execution_until_after_the_session() {
        let mut io = session("");
        let block = extract_code_block("```python\nprint(1)\n```");
        assert_eq!(io.apply(KeyAction::Run, &block).unwrap(), NextTurn::Quit);
        assert_eq!(
            io.take_pending_run(),
            Some(PendingRun {
                interpreter: Interpreter::Python,
                code: "print(1)".into(),
            })
        );
        assert_eq!(io.take_pending_run(), None);
    }

    #[test]
    fn quit_and_copy_end_the_session() {
        let mut io = session("");
        let block = extract_code_block("plain answer");
        assert_eq!(io.apply(KeyAction::Quit, &block).unwrap(), NextTurn::Quit);
        // Clipboard may be unavailable in CI; either way the action ends the session.
        assert_eq!(io.apply(KeyAction::Copy, &block).unwrap(), NextTurn::Quit);
        assert!(io.take_pending_run().is_none());
    }

    #[test]
    fn retry_prompt_reads_a_trimmed_line() {
        let mut io = session("  try again  \n");
        assert_eq!(io.prompt_retry().unwrap(), "try again");
        assert_eq!(io.prompt_retry().unwrap(), "");
    }
}
