//! Markdown rendering for model replies.

use termimad::MadSkin;

/// Replies are never wrapped wider than this, even on very wide terminals.
pub const MAX_RENDER_WIDTH: usize = 100;

/// Render `text` for a terminal `width` columns wide.
///
/// Without a known width the raw text is returned unchanged.
pub fn render_markdown(text: &str, width: Option<usize>) -> String {
    let Some(width) = width.filter(|w| *w > 0) else {
        return text.to_string();
    };
    let skin = MadSkin::default();
    skin.text(text, Some(width.min(MAX_RENDER_WIDTH))).to_string()
}

/// Current terminal width, if stdout is a terminal.
pub fn terminal_width() -> Option<usize> {
    crossterm::terminal::size()
        .ok()
        .map(|(cols, _)| usize::from(cols))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_width_returns_raw_text() {
        let reply = "```bash\nls -la\n```";
        assert_eq!(render_markdown(reply, None), reply);
        assert_eq!(render_markdown(reply, Some(0)), reply);
    }

    #[test]
    fn rendered_text_keeps_words() {
        let rendered = render_markdown("Use the listing command to see files", Some(200));
        assert!(rendered.contains("listing"));
        assert!(rendered.contains("files"));
    }
}
