//! Chat screen: ask questions and read answers.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    widgets::{StatefulWidget, Widget},
};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use crate::application::use_cases::AskQuestionUseCase;
use crate::domain::entities::{Message, Transcript};
use crate::domain::errors::AskError;
use crate::domain::request::RequestTracker;
use crate::domain::Notification;
use crate::presentation::actions::{Action, ChatAction};
use crate::presentation::events::{EventHandler, EventResult};
use crate::presentation::timer::ScopedTimer;
use crate::presentation::ui::NotificationPopup;
use crate::presentation::widgets::{StatusBar, TextInput, TranscriptPane, TranscriptPaneState};

/// Overlay text shown when a question fails.
pub const ASK_FAILED_NOTICE: &str = "Upload documents first!";

const SCROLL_PAGE: usize = 10;

pub struct ChatScreen {
    transcript: Transcript,
    input: TextInput,
    pane_state: TranscriptPaneState,
    notification: Option<Notification>,
    notification_timer: Option<ScopedTimer>,
    notifications: RequestTracker,
    requests: RequestTracker,
    pending: bool,
    precise_errors: bool,
    use_case: AskQuestionUseCase,
    action_tx: UnboundedSender<Action>,
}

impl ChatScreen {
    #[must_use]
    pub fn new(
        use_case: AskQuestionUseCase,
        action_tx: UnboundedSender<Action>,
        precise_errors: bool,
    ) -> Self {
        let mut input = TextInput::new(" Question ")
            .placeholder("Ask something...")
            .hint("Send: Enter / Ctrl+S");
        input.set_focused(true);

        Self {
            transcript: Transcript::new(),
            input,
            pane_state: TranscriptPaneState::new(),
            notification: None,
            notification_timer: None,
            notifications: RequestTracker::new(),
            requests: RequestTracker::new(),
            pending: false,
            precise_errors,
            use_case,
            action_tx,
        }
    }

    #[must_use]
    pub const fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    #[must_use]
    pub fn input_value(&self) -> &str {
        self.input.value()
    }

    #[must_use]
    pub const fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> EventResult {
        if EventHandler::is_submit_event(&key) {
            self.submit();
            return EventResult::Consumed;
        }

        match (key.code, key.modifiers) {
            (KeyCode::PageUp, _) => self.pane_state.scroll_up(SCROLL_PAGE),
            (KeyCode::PageDown, _) => self.pane_state.scroll_down(SCROLL_PAGE),
            (KeyCode::Up, _) => self.pane_state.scroll_up(1),
            (KeyCode::Down, _) => self.pane_state.scroll_down(1),
            (KeyCode::Home, KeyModifiers::CONTROL) => self.pane_state.scroll_to_top(),
            (KeyCode::End, KeyModifiers::CONTROL) => self.pane_state.scroll_to_bottom(),
            (KeyCode::Home, _) => self.input.move_start(),
            (KeyCode::End, _) => self.input.move_end(),
            (KeyCode::Left, _) => self.input.move_left(),
            (KeyCode::Right, _) => self.input.move_right(),
            (KeyCode::Backspace, _) => self.input.backspace(),
            (KeyCode::Delete, _) => self.input.delete(),
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                self.input.input_char(c);
            }
            _ => return EventResult::Continue,
        }

        EventResult::Consumed
    }

    /// Appends the question, clears the input, and asks the server.
    ///
    /// Blank input is ignored.
    pub fn submit(&mut self) {
        let Some(question) = AskQuestionUseCase::prepare(self.input.value()) else {
            return;
        };

        self.transcript.push(Message::user(question.clone()));
        self.input.clear();
        self.pane_state.scroll_to_bottom();
        self.pending = true;

        let token = self.requests.issue();
        let use_case = self.use_case.clone();
        let tx = self.action_tx.clone();

        debug!(token = %token, "Submitting question");
        tokio::spawn(async move {
            let result = use_case.execute(&question).await;
            let _ = tx.send(ChatAction::Answered { token, result }.into());
        });
    }

    pub fn handle_action(&mut self, action: ChatAction) {
        match action {
            ChatAction::Answered { token, result } => {
                if !self.requests.is_current(token) {
                    debug!(token = %token, "Discarding stale answer");
                    return;
                }
                self.pending = false;
                match result {
                    Ok(answer) => {
                        self.transcript.push(Message::bot(answer.answer));
                    }
                    Err(e) => {
                        warn!(error = %e, "Question failed");
                        let notice = self.failure_notice(&e);
                        self.show_notification(Notification::error(notice));
                    }
                }
            }
            ChatAction::NotificationElapsed { token } => {
                if self.notifications.is_current(token) {
                    self.notification = None;
                    self.notification_timer = None;
                }
            }
        }
    }

    fn failure_notice(&self, error: &AskError) -> String {
        if !self.precise_errors || error.is_missing_index() {
            ASK_FAILED_NOTICE.to_string()
        } else {
            error.to_string()
        }
    }

    fn show_notification(&mut self, notification: Notification) {
        let token = self.notifications.issue();
        self.notification_timer = Some(ScopedTimer::spawn(
            notification.duration,
            self.action_tx.clone(),
            ChatAction::NotificationElapsed { token }.into(),
        ));
        self.notification = Some(notification);
    }
}

impl Widget for &mut ChatScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [transcript_area, input_area, footer_area] = Layout::vertical([
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .areas(area);

        TranscriptPane::new(&self.transcript)
            .pending(self.pending)
            .render(transcript_area, buf, &mut self.pane_state);

        (&self.input).render(input_area, buf);

        let count = self.transcript.len();
        let position = if !self.pane_state.is_following() {
            "Scrolled back, Ctrl+End: latest ".to_string()
        } else if count == 0 {
            String::new()
        } else {
            format!("{count} messages ")
        };
        let footer = StatusBar::new()
            .left(" PgUp/PgDn: Scroll | Ctrl+C: Quit")
            .right(position);
        (&footer).render(footer_area, buf);

        if let Some(notification) = &self.notification {
            NotificationPopup::new(notification).render(transcript_area, buf);
        }
    }
}
