//! Raw-mode guard.
//!
//! Raw single-key reads and line-buffered reads are mutually exclusive, so
//! the guard must be released before any prompt that reads a whole line.
//! Dropping the guard also restores line mode, which covers early returns
//! and unwinding.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use crossterm::terminal;
use tracing::{debug, warn};

use super::keys::KeySource;

/// Holds the terminal in raw mode for as long as it lives.
#[derive(Debug)]
pub struct RawMode {
    active: bool,
}

impl RawMode {
    /// Switch the terminal to raw mode.
    pub fn acquire() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        debug!("Raw mode enabled");
        Ok(Self { active: true })
    }

    /// Return to line mode explicitly, reporting any failure.
    pub fn release(mut self) -> io::Result<()> {
        self.active = false;
        terminal::disable_raw_mode()?;
        debug!("Raw mode released");
        Ok(())
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        if self.active && let Err(e) = terminal::disable_raw_mode() {
            warn!("Failed to restore terminal mode: {e}");
        }
    }
}

impl KeySource for RawMode {
    fn next_key(&mut self) -> io::Result<KeyEvent> {
        loop {
            if let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                return Ok(key);
            }
        }
    }

    fn pending_key(&mut self) -> io::Result<Option<KeyEvent>> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                return Ok(Some(key));
            }
        }
        Ok(None)
    }
}
