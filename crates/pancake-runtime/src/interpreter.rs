//! Execution of extracted code blocks.

use pancake_core::Language;
use tracing::info;

use crate::command::CommandSpec;
use crate::error::ProcessError;

/// Interpreter able to execute a fenced code block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpreter {
    Bash,
    Python,
}

impl Interpreter {
    /// Interpreter for `language`, or `None` when the block is not runnable.
    pub const fn for_language(language: &Language) -> Option<Self> {
        match language {
            Language::Shell => Some(Self::Bash),
            Language::Python => Some(Self::Python),
            Language::Other(_) | Language::Text => None,
        }
    }

    pub const fn program(self) -> &'static str {
        match self {
            Self::Bash => "bash",
            Self::Python => "python",
        }
    }

    /// `<program> -c <code>`.
    pub fn command(self, code: &str) -> CommandSpec {
        CommandSpec::new(self.program()).arg("-c").arg(code)
    }

    /// Run `code`, streaming output to the terminal.
    pub async fn execute(self, code: &str) -> Result<(), ProcessError> {
        info!(interpreter = self.program(), "Executing code block");
        self.command(code).run().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_shell_and_python_are_runnable() {
        assert_eq!(
            Interpreter::for_language(&Language::Shell),
            Some(Interpreter::Bash)
        );
        assert_eq!(
            Interpreter::for_language(&Language::Python),
            Some(Interpreter::Python)
        );
        assert_eq!(
            Interpreter::for_language(&Language::Other("rust".into())),
            None
        );
        assert_eq!(Interpreter::for_language(&Language::Text), None);
    }

    #[test]
    fn code_is_passed_as_a_single_argument() {
        let cmd = Interpreter::Python.command("print('a b')\nprint(2)");
        assert_eq!(cmd.program, "python");
        assert_eq!(cmd.args, ["-c", "print('a b')\nprint(2)"]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failing_script_surfaces_exit_code() {
        let err = Interpreter::Bash.execute("exit 7").await.unwrap_err();
        assert!(matches!(err, ProcessError::Exit { code: Some(7), .. }));
    }
}
