//! Table formatting utilities for CLI output.

/// Truncates a string to a maximum length in characters, adding "..." if needed.
///
/// # Examples
///
/// ```rust
/// use pancake_cli::presentation::truncate_string;
///
/// assert_eq!(truncate_string("Hello", 10), "Hello");
/// assert_eq!(truncate_string("Hello World", 8), "Hello...");
/// ```
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Print a horizontal separator line.
pub fn print_separator(width: usize) {
    println!("{}", "-".repeat(width));
}

/// Format an optional value for table display, returning a default if None.
pub fn format_optional<T: std::fmt::Display>(value: Option<&T>, default: &str) -> String {
    value.map_or_else(|| default.to_string(), ToString::to_string)
}

/// Render rows as a pipe-delimited table with a rule under the header.
pub fn format_table<S: AsRef<str>>(headers: &[&str], rows: &[Vec<S>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(cell.as_ref().chars().count());
        }
    }

    let mut out = Vec::with_capacity(rows.len() + 2);
    out.push(render_row(headers.iter().copied(), &widths));
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push(render_row(rule.iter().map(String::as_str), &widths));
    for row in rows {
        out.push(render_row(row.iter().map(AsRef::as_ref), &widths));
    }
    out.join("\n")
}

fn render_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let mut line = String::new();
    for (cell, &width) in cells.zip(widths) {
        line.push_str(&format!("| {cell:<width$} "));
    }
    line.push('|');
    line
}

/// Print a table built by [`format_table`].
pub fn print_table<S: AsRef<str>>(headers: &[&str], rows: &[Vec<S>]) {
    println!("{}", format_table(headers, rows));
}
