//! Keystroke action resolver.
//!
//! After a reply is shown the user picks exactly one action with a single
//! key: Ctrl-C quits, Enter copies, Ctrl-R runs (only for runnable blocks)
//! and any printable character starts a follow-up prompt.

use std::io;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Width of the rule printed above the menu.
pub const MENU_RULE_WIDTH: usize = 70;

/// Anything that yields key presses.
pub trait KeySource {
    /// Block until the next key press.
    fn next_key(&mut self) -> io::Result<KeyEvent>;

    /// A key press that is already waiting, without blocking.
    fn pending_key(&mut self) -> io::Result<Option<KeyEvent>>;
}

/// Action chosen from the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Copy,
    Run,
    /// The first character of a follow-up prompt.
    FollowUp(char),
}

/// The one-line menu shown after each reply.
pub fn menu_line(runnable: bool) -> &'static str {
    if runnable {
        "[Ctrl+R] Run | [Enter] Copy | [Ctrl+C] Quit | Type a follow-up > "
    } else {
        "[Enter] Copy | [Ctrl+C] Quit | Type a follow-up > "
    }
}

/// Map a single key press to an action, or `None` if it should be ignored.
pub fn classify(key: &KeyEvent, runnable: bool) -> Option<KeyAction> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Char('c' | 'C') if ctrl => Some(KeyAction::Quit),
        KeyCode::Char('r' | 'R') if ctrl => runnable.then_some(KeyAction::Run),
        KeyCode::Enter => Some(KeyAction::Copy),
        KeyCode::Char(c) if !ctrl && !alt && !c.is_control() => Some(KeyAction::FollowUp(c)),
        _ => None,
    }
}

/// Read keys from `keys` until one resolves to an action.
pub fn resolve_action<K: KeySource + ?Sized>(
    keys: &mut K,
    runnable: bool,
) -> io::Result<KeyAction> {
    loop {
        let key = keys.next_key()?;
        if let Some(action) = classify(&key, runnable) {
            return Ok(action);
        }
    }
}

/// Follow-up text typed before raw mode was released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedAhead {
    pub text: String,
    /// Enter was among the queued keys, so the line is complete.
    pub submitted: bool,
}

impl TypedAhead {
    pub fn started_with(first: char) -> Self {
        Self {
            text: first.to_string(),
            submitted: false,
        }
    }
}

/// Drain keys already queued behind the first follow-up character.
///
/// A paste or fast typing delivers several keys at once; they sit in the raw
/// event queue and would otherwise never reach the line-buffered read.
pub fn collect_typed_ahead<K: KeySource + ?Sized>(
    keys: &mut K,
    first: char,
) -> io::Result<TypedAhead> {
    let mut typed = TypedAhead::started_with(first);
    while let Some(key) = keys.pending_key()? {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        match key.code {
            KeyCode::Enter => {
                typed.submitted = true;
                break;
            }
            KeyCode::Backspace => {
                typed.text.pop();
            }
            KeyCode::Tab => typed.text.push(' '),
            KeyCode::Char(c) if !ctrl && !alt && !c.is_control() => typed.text.push(c),
            _ => {}
        }
    }
    Ok(typed)
}


#[cfg(test)]
mod tests {
    use super::testing::{ScriptedKeys, ctrl, plain};
    use super::*;

    #[test]
    fn ctrl_c_quits() {
        let mut keys = ScriptedKeys::new([ctrl('c')]);
        assert_eq!(resolve_action(&mut keys, true).unwrap(), KeyAction::Quit);
    }

    #[test]
    fn enter_copies() {
        let mut keys = ScriptedKeys::new([plain(KeyCode::Enter)]);
        assert_eq!(resolve_action(&mut keys, false).unwrap(), KeyAction::Copy);
    }

    #[test]
    fn ctrl_r_runs_only_runnable_blocks() {
        let mut keys = ScriptedKeys::new([ctrl('r')]);
        assert_eq!(resolve_action(&mut keys, true).unwrap(), KeyAction::Run);

        let mut keys = ScriptedKeys::new([ctrl('r'), plain(KeyCode::Enter)]);
        assert_eq!(resolve_action(&mut keys, false).unwrap(), KeyAction::Copy);
    }

    #[test]
    fn printable_character_starts_follow_up() {
        let shifted = KeyEvent::new(KeyCode::Char('W'), KeyModifiers::SHIFT);
        let mut keys = ScriptedKeys::new([shifted]);
        assert_eq!(
            resolve_action(&mut keys, true).unwrap(),
            KeyAction::FollowUp('W')
        );
    }

    #[test]
    fn navigation_and_modified_keys_are_ignored() {
        let alt_x = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT);
        let mut keys = ScriptedKeys::new([
            plain(KeyCode::Up),
            plain(KeyCode::Backspace),
            plain(KeyCode::Esc),
            alt_x,
            ctrl('l'),
            plain(KeyCode::Char('h')),
        ]);
        assert_eq!(
            resolve_action(&mut keys, true).unwrap(),
            KeyAction::FollowUp('h')
        );
    }

    #[test]
    fn exhausted_source_is_an_error() {
        let mut keys = ScriptedKeys::new([plain(KeyCode::Tab)]);
        let err = resolve_action(&mut keys, true).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    fn typed(text: &str) -> Vec<KeyEvent> {
        text.chars()
            .map(|c| match c {
                '\n' => plain(KeyCode::Enter),
                c => plain(KeyCode::Char(c)),
            })
            .collect()
    }

    #[test]
    fn queued_burst_is_collected_after_first_character() {
        let mut keys = ScriptedKeys::new(typed("how big is /tmp"));
        assert_eq!(resolve_action(&mut keys, true).unwrap(), KeyAction::FollowUp('h'));

        let rest = collect_typed_ahead(&mut keys, 'h').unwrap();
        assert_eq!(rest.text, "how big is /tmp");
        assert!(!rest.submitted);
    }

    #[test]
    fn enter_in_burst_submits_and_leaves_later_keys_queued() {
        let mut keys = ScriptedKeys::new(typed("bc\nx"));
        let rest = collect_typed_ahead(&mut keys, 'a').unwrap();
        assert_eq!(rest.text, "abc");
        assert!(rest.submitted);
        assert_eq!(keys.pending_key().unwrap(), Some(plain(KeyCode::Char('x'))));
    }

    #[test]
    fn burst_applies_backspace_and_skips_control_keys() {
        let mut keys = ScriptedKeys::new([
            plain(KeyCode::Char('s')),
            plain(KeyCode::Char('x')),
            plain(KeyCode::Backspace),
            plain(KeyCode::Up),
            ctrl('r'),
            plain(KeyCode::Char('h')),
        ]);
        let rest = collect_typed_ahead(&mut keys, 'l').unwrap();
        assert_eq!(rest, TypedAhead { text: "lsh".into(), submitted: false });
    }

    #[test]
    fn nothing_queued_keeps_only_first_character() {
        let mut keys = ScriptedKeys::new(Vec::new());
        assert_eq!(
            collect_typed_ahead(&mut keys, 'q').unwrap(),
            TypedAhead::started_with('q')
        );
    }

    #[test]
    fn menu_offers_run_only_when_runnable() {
        assert!(menu_line(true).starts_with("[Ctrl+R] Run | "));
        assert!(!menu_line(false).contains("Run"));
        assert!(menu_line(false).ends_with("Type a follow-up > "));
    }
}
