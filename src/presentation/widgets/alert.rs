//! Blocking alert dialog.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

/// Modal message acknowledged with any key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    message: String,
}

impl Alert {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Widget for &Alert {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = u16::try_from(self.message.width())
            .unwrap_or(u16::MAX)
            .saturating_add(6)
            .max(30)
            .min(area.width);

        let [_, row, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(5),
            Constraint::Fill(1),
        ])
        .areas(area);
        let [_, popup, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(width),
            Constraint::Fill(1),
        ])
        .areas(row);

        Clear.render(popup, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(" Alert ")
            .title_bottom(" press any key ");

        Paragraph::new(self.message.as_str())
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .style(Style::default().add_modifier(Modifier::BOLD))
            .render(popup, buf);
    }
}
