//! Scrolling transcript widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
        StatefulWidget, Widget,
    },
};

use crate::domain::entities::{Message, Role, Transcript};
use crate::presentation::ui::utils::wrap_text;

/// Scroll position of the transcript.
///
/// The offset counts lines up from the newest message, so new entries stay
/// in view unless the user has scrolled back.
#[derive(Debug, Default, Clone)]
pub struct TranscriptPaneState {
    offset_from_bottom: usize,
    max_offset: usize,
}

impl TranscriptPaneState {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            offset_from_bottom: 0,
            max_offset: 0,
        }
    }

    #[must_use]
    pub const fn is_following(&self) -> bool {
        self.offset_from_bottom == 0
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.offset_from_bottom = (self.offset_from_bottom + lines).min(self.max_offset);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.offset_from_bottom = self.offset_from_bottom.saturating_sub(lines);
    }

    pub fn scroll_to_top(&mut self) {
        self.offset_from_bottom = self.max_offset;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.offset_from_bottom = 0;
    }
}

pub struct TranscriptPane<'a> {
    transcript: &'a Transcript,
    pending: bool,
}

impl<'a> TranscriptPane<'a> {
    #[must_use]
    pub const fn new(transcript: &'a Transcript) -> Self {
        Self {
            transcript,
            pending: false,
        }
    }

    /// Shows a waiting indicator below the last message.
    #[must_use]
    pub const fn pending(mut self, pending: bool) -> Self {
        self.pending = pending;
        self
    }
}

fn role_style(role: Role) -> Style {
    match role {
        Role::User => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        Role::Bot => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    }
}

fn message_lines(message: &Message, width: usize) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        message.role().label(),
        role_style(message.role()),
    ))];
    lines.extend(
        wrap_text(message.text(), width.saturating_sub(2))
            .into_iter()
            .map(|row| Line::from(format!("  {row}"))),
    );
    lines.push(Line::default());
    lines
}

impl StatefulWidget for TranscriptPane<'_> {
    type State = TranscriptPaneState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Conversation ");
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width < 2 || inner.height == 0 {
            return;
        }

        let text_width = usize::from(inner.width - 1);
        let mut lines: Vec<Line> = self
            .transcript
            .messages()
            .iter()
            .flat_map(|message| message_lines(message, text_width))
            .collect();

        if self.pending {
            lines.push(Line::from(Span::styled(
                "Assistant is thinking...",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )));
        }

        if lines.is_empty() {
            Paragraph::new("Ask a question about your documents.")
                .style(Style::default().fg(Color::DarkGray))
                .render(inner, buf);
            return;
        }

        let viewport = usize::from(inner.height);
        state.max_offset = lines.len().saturating_sub(viewport);
        state.offset_from_bottom = state.offset_from_bottom.min(state.max_offset);
        let top = state.max_offset - state.offset_from_bottom;

        let visible: Vec<Line> = lines.into_iter().skip(top).take(viewport).collect();
        let text_area = Rect::new(inner.x, inner.y, inner.width - 1, inner.height);
        Paragraph::new(visible).render(text_area, buf);

        if state.max_offset > 0 {
            let mut scrollbar_state = ScrollbarState::new(state.max_offset).position(top);
            Scrollbar::new(ScrollbarOrientation::VerticalRight).render(
                inner,
                buf,
                &mut scrollbar_state,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(buf: &Buffer, y: u16) -> String {
        (buf.area.x..buf.area.right())
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    fn render(transcript: &Transcript, state: &mut TranscriptPaneState, height: u16) -> Buffer {
        let area = Rect::new(0, 0, 30, height);
        let mut buf = Buffer::empty(area);
        TranscriptPane::new(transcript).render(area, &mut buf, state);
        buf
    }

    #[test]
    fn test_renders_roles_in_order() {
        let mut transcript = Transcript::new();
        transcript.push(Message::user("What is X?"));
        transcript.push(Message::bot("X is Y"));

        let buf = render(&transcript, &mut TranscriptPaneState::new(), 10);

        assert!(row(&buf, 1).contains("You"));
        assert!(row(&buf, 2).contains("What is X?"));
        assert!(row(&buf, 4).contains("Assistant"));
        assert!(row(&buf, 5).contains("X is Y"));
    }

    #[test]
    fn test_follows_newest_message() {
        let mut transcript = Transcript::new();
        for i in 0..10 {
            transcript.push(Message::user(format!("question {i}")));
        }

        let buf = render(&transcript, &mut TranscriptPaneState::new(), 6);

        let visible: String = (1..5).map(|y| row(&buf, y)).collect();
        assert!(visible.contains("question 9"));
        assert!(!visible.contains("question 0"));
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut transcript = Transcript::new();
        for i in 0..10 {
            transcript.push(Message::user(format!("question {i}")));
        }
        let mut state = TranscriptPaneState::new();
        render(&transcript, &mut state, 6);

        state.scroll_up(1000);
        let buf = render(&transcript, &mut state, 6);
        assert!(row(&buf, 2).contains("question 0"));
        assert!(!state.is_following());

        state.scroll_to_bottom();
        assert!(state.is_following());
    }
}
