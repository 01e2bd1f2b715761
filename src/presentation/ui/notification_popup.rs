use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::domain::{Notification, NotificationLevel};

/// Overlay drawn in the top-right corner while a notification is live.
pub struct NotificationPopup<'a> {
    notification: &'a Notification,
}

impl<'a> NotificationPopup<'a> {
    #[must_use]
    pub fn new(notification: &'a Notification) -> Self {
        Self { notification }
    }
}

impl Widget for NotificationPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (title, color) = match self.notification.level {
            NotificationLevel::Success => (" Done ", Color::Green),
            NotificationLevel::Error => (" Error ", Color::Red),
        };
        let message = &self.notification.message;

        let max_popup_width = 60.min(area.width.saturating_sub(2));
        let width = u16::try_from(message.width())
            .unwrap_or(u16::MAX)
            .max(u16::try_from(title.width()).unwrap_or(0))
            .saturating_add(4)
            .min(max_popup_width);

        let inner_width = width.saturating_sub(2).max(1);
        let content_width = u16::try_from(message.width()).unwrap_or(u16::MAX);
        let lines = content_width.div_ceil(inner_width);
        let height = lines.saturating_add(2).clamp(3, 10);

        let x = area.x + area.width.saturating_sub(width).saturating_sub(2);
        let y = area.y + 1;

        let popup_area = area.intersection(Rect::new(x, y, width, height));
        if popup_area.area() == 0 {
            return;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .style(Style::default().fg(color));

        let para = Paragraph::new(message.as_str())
            .block(block)
            .wrap(Wrap { trim: true })
            .style(Style::default().add_modifier(Modifier::BOLD));

        Clear.render(popup_area, buf);
        para.render(popup_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_message_top_right() {
        let notification = Notification::error("Upload documents first!");
        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        NotificationPopup::new(&notification).render(area, &mut buf);

        let row: String = (0..80).map(|x| buf[(x, 2)].symbol().to_string()).collect();
        assert!(row.contains("Upload documents first!"));
        assert!(row.trim_start().len() < 40);
    }

    #[test]
    fn test_tiny_area_does_not_panic() {
        let notification = Notification::success("Documents processed successfully!");
        let area = Rect::new(0, 0, 2, 1);
        let mut buf = Buffer::empty(area);
        NotificationPopup::new(&notification).render(area, &mut buf);
    }
}
