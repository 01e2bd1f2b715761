use ratatui::layout::{Constraint, Direction, Layout, Rect};
use unicode_width::UnicodeWidthChar;

/// Helper function to create a centered rect using up certain percentage of the available rect `r`
#[must_use]
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Wraps `text` into rows no wider than `width` display columns.
///
/// Breaks at the last space that fits, or mid-word when a word is longer
/// than the row. Explicit newlines are kept.
#[must_use]
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();

    for paragraph in text.split('\n') {
        let mut row = String::new();
        let mut row_width = 0;
        let mut last_space: Option<usize> = None;

        for c in paragraph.chars() {
            let w = c.width().unwrap_or(0);
            if row_width + w > width && !row.is_empty() {
                if let Some(at) = last_space.filter(|_| c != ' ') {
                    let rest = row.split_off(at + 1);
                    rows.push(row.trim_end().to_string());
                    row = rest;
                } else {
                    rows.push(row.trim_end().to_string());
                    row = String::new();
                }
                row_width = row.chars().map(|c| c.width().unwrap_or(0)).sum();
                last_space = None;
                if c == ' ' && row.is_empty() {
                    continue;
                }
            }
            if c == ' ' {
                last_space = Some(row.len());
            }
            row.push(c);
            row_width += w;
        }

        rows.push(row);
    }

    rows
}
