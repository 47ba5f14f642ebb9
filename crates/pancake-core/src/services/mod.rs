//! Core services.

mod session;

pub use session::{NextTurn, Session, SessionError, SessionIo, SessionSummary, is_exit_keyword};
