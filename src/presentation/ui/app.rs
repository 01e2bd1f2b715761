//! Root view and event loop.

use std::sync::Arc;

use crossterm::event::{Event, EventStream, KeyEvent};
use futures_util::StreamExt;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Alignment, Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::application::use_cases::{AskQuestionUseCase, UploadDocumentsUseCase};
use crate::domain::ports::DocumentQaPort;
use crate::presentation::actions::Action;
use crate::presentation::events::{EventHandler, EventResult};
use crate::presentation::ui::{ChatScreen, PickerOptions, UploadScreen, UploadSignal};

pub const APP_TITLE: &str = "DocuMind Assistant";

/// Presentation settings resolved from configuration.
#[derive(Debug, Clone, Default)]
pub struct AppSettings {
    pub precise_errors: bool,
    pub picker: PickerOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppState {
    Running,
    Exiting,
}

enum CurrentScreen {
    Upload(Box<UploadScreen>),
    Chat(Box<ChatScreen>),
}

pub struct App {
    state: AppState,
    ready: bool,
    screen: CurrentScreen,
    port: Arc<dyn DocumentQaPort>,
    settings: AppSettings,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    #[must_use]
    pub fn new(port: Arc<dyn DocumentQaPort>, settings: AppSettings) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let screen = Self::upload_screen(&port, &settings, &action_tx);

        Self {
            state: AppState::Running,
            ready: false,
            screen,
            port,
            settings,
            action_tx,
            action_rx,
        }
    }

    fn upload_screen(
        port: &Arc<dyn DocumentQaPort>,
        settings: &AppSettings,
        action_tx: &mpsc::UnboundedSender<Action>,
    ) -> CurrentScreen {
        CurrentScreen::Upload(Box::new(UploadScreen::new(
            UploadDocumentsUseCase::new(port.clone()),
            action_tx.clone(),
            settings.picker.clone(),
        )))
    }

    fn chat_screen(
        port: &Arc<dyn DocumentQaPort>,
        settings: &AppSettings,
        action_tx: &mpsc::UnboundedSender<Action>,
    ) -> CurrentScreen {
        CurrentScreen::Chat(Box::new(ChatScreen::new(
            AskQuestionUseCase::new(port.clone()),
            action_tx.clone(),
            settings.precise_errors,
        )))
    }

    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.ready
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == AppState::Running
    }

    /// # Errors
    /// Returns error if drawing to the terminal fails.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        info!("Starting event loop");
        self.run_event_loop(terminal).await?;
        info!("Application exiting normally");
        Ok(())
    }

    async fn run_event_loop(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let mut terminal_events = EventStream::new();

        terminal.draw(|frame| self.render(frame))?;

        while self.state != AppState::Exiting {
            tokio::select! {
                biased;

                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action);
                    terminal.draw(|frame| self.render(frame))?;
                }

                maybe_event = terminal_events.next() => {
                    match maybe_event {
                        Some(Ok(event)) => {
                            if self.handle_terminal_event(event) == EventResult::Exit {
                                self.state = AppState::Exiting;
                            }
                            terminal.draw(|frame| self.render(frame))?;
                        }
                        Some(Err(e)) => return Err(e.into()),
                        None => self.state = AppState::Exiting,
                    }
                }
            }
        }

        Ok(())
    }

    fn handle_terminal_event(&mut self, event: Event) -> EventResult {
        match event {
            Event::Key(key) if EventHandler::is_press(&key) => self.handle_key(key),
            _ => EventResult::Continue,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> EventResult {
        if EventHandler::is_quit_event(&key) {
            self.state = AppState::Exiting;
            return EventResult::Exit;
        }

        let result = match &mut self.screen {
            CurrentScreen::Upload(screen) => screen.handle_key(key),
            CurrentScreen::Chat(screen) => screen.handle_key(key),
        };

        if result == EventResult::Exit {
            self.state = AppState::Exiting;
        }
        result
    }

    /// Routes a background result to the mounted view.
    ///
    /// Actions for a view that is no longer mounted are dropped.
    pub fn handle_action(&mut self, action: Action) {
        match (&mut self.screen, action) {
            (CurrentScreen::Upload(screen), Action::Upload(action)) => {
                if let UploadSignal::Ready(ready) = screen.handle_action(action) {
                    self.set_ready(ready);
                }
            }
            (CurrentScreen::Chat(screen), Action::Chat(action)) => {
                screen.handle_action(action);
            }
            (_, action) => {
                debug!(?action, "Dropping action for unmounted view");
            }
        }
    }

    /// Updates the readiness flag and mounts the matching view.
    pub fn set_ready(&mut self, ready: bool) {
        if self.ready == ready {
            return;
        }
        info!(ready, "Readiness changed");
        self.ready = ready;
        self.screen = if ready {
            Self::chat_screen(&self.port, &self.settings, &self.action_tx)
        } else {
            Self::upload_screen(&self.port, &self.settings, &self.action_tx)
        };
    }

    fn render(&mut self, frame: &mut Frame) {
        let [title_area, body_area, hint_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let title = Paragraph::new(Line::from(Span::styled(
            APP_TITLE,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(title, title_area);

        let hint = match self.screen {
            CurrentScreen::Upload(_) => " Step 1: upload documents",
            CurrentScreen::Chat(_) => " Step 2: ask questions",
        };
        match &mut self.screen {
            CurrentScreen::Upload(screen) => frame.render_widget(&mut **screen, body_area),
            CurrentScreen::Chat(screen) => frame.render_widget(&mut **screen, body_area),
        }

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(hint, Style::default().fg(Color::DarkGray)),
                Span::styled("  Ctrl+C: Quit", Style::default().fg(Color::DarkGray)),
            ])),
            hint_area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Answer, Role};
    use crate::domain::ports::mocks::MockDocumentQa;
    use crate::presentation::actions::{ChatAction, UploadAction};
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::path::PathBuf;
    use std::time::Duration;
    use tokio::sync::mpsc::error::TryRecvError;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app(port: &Arc<MockDocumentQa>) -> App {
        App::new(port.clone(), AppSettings::default())
    }

    async fn pump(app: &mut App) {
        let action = app.action_rx.recv().await.expect("action channel open");
        app.handle_action(action);
    }

    fn chat(app: &App) -> &ChatScreen {
        match &app.screen {
            CurrentScreen::Chat(screen) => screen,
            CurrentScreen::Upload(_) => panic!("chat view not mounted"),
        }
    }

    fn upload(app: &mut App) -> &mut UploadScreen {
        match &mut app.screen {
            CurrentScreen::Upload(screen) => screen,
            CurrentScreen::Chat(_) => panic!("upload view not mounted"),
        }
    }

    #[test]
    fn test_app_starts_on_upload_view() {
        let port = Arc::new(MockDocumentQa::new());
        let app = app(&port);

        assert!(!app.is_ready());
        assert!(app.is_running());
        assert!(matches!(app.screen, CurrentScreen::Upload(_)));
    }

    #[test]
    fn test_ctrl_c_quits() {
        let port = Arc::new(MockDocumentQa::new());
        let mut app = app(&port);

        let result = app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));

        assert_eq!(result, EventResult::Exit);
        assert!(!app.is_running());
    }

    #[tokio::test]
    async fn test_set_ready_mounts_chat() {
        let port = Arc::new(MockDocumentQa::new());
        let mut app = app(&port);

        app.set_ready(true);

        assert!(app.is_ready());
        assert!(chat(&app).transcript().is_empty());
    }

    #[tokio::test]
    async fn test_action_for_unmounted_view_is_dropped() {
        let port = Arc::new(MockDocumentQa::new());
        let mut app = app(&port);
        app.set_ready(true);

        let mut tracker = crate::domain::request::RequestTracker::new();
        app.handle_action(
            UploadAction::ConfirmationElapsed {
                token: tracker.issue(),
            }
            .into(),
        );

        assert!(app.is_ready());
        assert!(matches!(app.screen, CurrentScreen::Chat(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_upload_then_chat_end_to_end() {
        let port = Arc::new(MockDocumentQa::new());
        port.push_answer(Ok(Answer::new("X is Y")));
        let mut app = app(&port);

        upload(&mut app).select_files(vec![PathBuf::from("a.pdf"), PathBuf::from("b.txt")]);
        assert_eq!(
            upload(&mut app).files().summary().as_deref(),
            Some("2 file(s) selected")
        );
        app.handle_key(key(KeyCode::Enter));

        pump(&mut app).await;
        assert!(!app.is_ready());
        assert!(upload(&mut app).notification().is_some());

        tokio::time::advance(Duration::from_millis(1999)).await;
        tokio::task::yield_now().await;
        assert!(matches!(app.action_rx.try_recv(), Err(TryRecvError::Empty)));

        pump(&mut app).await;
        assert!(app.is_ready());
        assert_eq!(
            port.uploads(),
            vec![vec![PathBuf::from("a.pdf"), PathBuf::from("b.txt")]]
        );

        for c in "What is X?".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Enter));

        let roles: Vec<Role> = chat(&app).transcript().messages().iter().map(|m| m.role()).collect();
        assert_eq!(roles, vec![Role::User]);

        pump(&mut app).await;
        let messages = chat(&app).transcript().messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].text(), "What is X?");
        assert_eq!(messages[1].role(), Role::Bot);
        assert_eq!(messages[1].text(), "X is Y");
    }

    #[tokio::test(start_paused = true)]
    async fn test_unmounting_upload_view_cancels_confirmation() {
        let port = Arc::new(MockDocumentQa::new());
        let mut app = app(&port);

        upload(&mut app).select_files(vec![PathBuf::from("a.pdf")]);
        upload(&mut app).submit();
        pump(&mut app).await;

        app.set_ready(true);
        tokio::time::advance(Duration::from_secs(3)).await;
        tokio::task::yield_now().await;

        assert!(matches!(app.action_rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn test_chat_action_routed_to_chat() {
        let port = Arc::new(MockDocumentQa::new());
        let mut app = app(&port);
        app.set_ready(true);

        let mut tracker = crate::domain::request::RequestTracker::new();
        app.handle_action(
            ChatAction::NotificationElapsed {
                token: tracker.issue(),
            }
            .into(),
        );

        assert!(chat(&app).notification().is_none());
    }
}
