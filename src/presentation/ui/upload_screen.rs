//! Upload screen: pick documents and send them for indexing.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error, info, warn};

use crate::application::dto::UploadOutcome;
use crate::application::use_cases::UploadDocumentsUseCase;
use crate::domain::entities::SelectedFileSet;
use crate::domain::errors::UploadError;
use crate::domain::request::{RequestToken, RequestTracker};
use crate::domain::Notification;
use crate::presentation::actions::{Action, UploadAction};
use crate::presentation::events::{EventHandler, EventResult};
use crate::presentation::timer::ScopedTimer;
use crate::presentation::ui::NotificationPopup;
use crate::presentation::ui::utils::centered_rect;
use crate::presentation::widgets::{Alert, FilePicker, FilePickerAction, StatusBar};

pub const EMPTY_SELECTION_ALERT: &str = "Please upload at least one file!";
pub const UPLOAD_FAILED_ALERT: &str = "Upload failed!";

/// Signal returned to the parent in place of a readiness callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadSignal {
    None,
    /// The readiness flag should take this value.
    Ready(bool),
}

/// Where the file picker opens and what it lists.
#[derive(Debug, Clone, Default)]
pub struct PickerOptions {
    pub start_dir: Option<PathBuf>,
    pub show_hidden: bool,
}

pub struct UploadScreen {
    files: SelectedFileSet,
    picker: Option<FilePicker>,
    picker_options: PickerOptions,
    alert: Option<Alert>,
    notification: Option<Notification>,
    confirmation_timer: Option<ScopedTimer>,
    status: Option<StatusBar>,
    uploading: bool,
    requests: RequestTracker,
    use_case: UploadDocumentsUseCase,
    action_tx: UnboundedSender<Action>,
}

impl UploadScreen {
    #[must_use]
    pub fn new(
        use_case: UploadDocumentsUseCase,
        action_tx: UnboundedSender<Action>,
        picker_options: PickerOptions,
    ) -> Self {
        Self {
            files: SelectedFileSet::new(),
            picker: None,
            picker_options,
            alert: None,
            notification: None,
            confirmation_timer: None,
            status: None,
            uploading: false,
            requests: RequestTracker::new(),
            use_case,
            action_tx,
        }
    }

    #[must_use]
    pub const fn files(&self) -> &SelectedFileSet {
        &self.files
    }

    #[must_use]
    pub const fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    #[must_use]
    pub const fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    #[must_use]
    pub const fn status(&self) -> Option<&StatusBar> {
        self.status.as_ref()
    }

    #[must_use]
    pub const fn is_uploading(&self) -> bool {
        self.uploading
    }

    #[must_use]
    pub const fn is_picker_open(&self) -> bool {
        self.picker.is_some()
    }

    /// Replaces the whole selection.
    pub fn select_files(&mut self, files: Vec<PathBuf>) {
        info!(count = files.len(), "Documents selected");
        self.files.replace(files);
        self.status = None;
    }

    pub fn open_picker(&mut self) {
        self.picker = Some(FilePicker::new(
            self.picker_options.start_dir.as_deref(),
            self.picker_options.show_hidden,
        ));
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> EventResult {
        if self.alert.take().is_some() {
            return EventResult::Consumed;
        }

        if let Some(picker) = self.picker.as_mut() {
            match picker.handle_key(key) {
                FilePickerAction::Confirm(files) => {
                    self.picker = None;
                    self.select_files(files);
                }
                FilePickerAction::Cancel => self.picker = None,
                FilePickerAction::None => {}
            }
            return EventResult::Consumed;
        }

        if EventHandler::is_submit_event(&key) || key.code == KeyCode::Char('p') {
            self.submit();
            return EventResult::Consumed;
        }

        match key.code {
            KeyCode::Char('o' | ' ') => {
                self.open_picker();
                EventResult::Consumed
            }
            KeyCode::Char('q') | KeyCode::Esc => EventResult::Exit,
            _ => EventResult::Continue,
        }
    }

    /// Sends the current selection, or raises an alert when it is empty.
    pub fn submit(&mut self) {
        if self.files.is_empty() {
            debug!("Upload requested with no files selected");
            self.alert = Some(Alert::new(EMPTY_SELECTION_ALERT));
            return;
        }

        let token = self.requests.issue();
        self.confirmation_timer = None;
        self.notification = None;
        self.status = None;
        self.uploading = true;

        let files = self.files.files().to_vec();
        let use_case = self.use_case.clone();
        let tx = self.action_tx.clone();

        debug!(token = %token, count = files.len(), "Starting upload");
        tokio::spawn(async move {
            let result = use_case.execute(&files).await;
            let _ = tx.send(UploadAction::Finished { token, result }.into());
        });
    }

    pub fn handle_action(&mut self, action: UploadAction) -> UploadSignal {
        match action {
            UploadAction::Finished { token, result } => {
                if !self.requests.is_current(token) {
                    debug!(token = %token, "Discarding stale upload response");
                    return UploadSignal::None;
                }
                self.uploading = false;
                self.on_upload_finished(token, result);
                UploadSignal::None
            }
            UploadAction::ConfirmationElapsed { token } => {
                if !self.requests.is_current(token) || self.confirmation_timer.is_none() {
                    debug!(token = %token, "Ignoring stale confirmation timer");
                    return UploadSignal::None;
                }
                self.confirmation_timer = None;
                self.notification = None;
                UploadSignal::Ready(true)
            }
        }
    }

    fn on_upload_finished(
        &mut self,
        token: RequestToken,
        result: Result<UploadOutcome, UploadError>,
    ) {
        match result {
            Ok(outcome) if outcome.is_processed() => {
                info!(outcome = ?outcome, "Documents processed");
                let notification = Notification::success(outcome.describe());
                self.confirmation_timer = Some(ScopedTimer::spawn(
                    notification.duration,
                    self.action_tx.clone(),
                    UploadAction::ConfirmationElapsed { token }.into(),
                ));
                self.notification = Some(notification);
            }
            Ok(outcome) => {
                warn!(outcome = ?outcome, "Upload finished without success status");
                self.status = Some(StatusBar::warning(outcome.describe()));
            }
            Err(e) => {
                error!(error = %e, reached_server = e.is_server_response(), "Upload failed");
                self.alert = Some(Alert::new(UPLOAD_FAILED_ALERT));
                self.status = Some(StatusBar::error(e.to_string()));
            }
        }
    }

    fn render_dropzone(&self, area: Rect, buf: &mut Buffer) {
        let [_, card, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(11),
            Constraint::Fill(1),
        ])
        .areas(area);
        let [_, card, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Max(56),
            Constraint::Fill(1),
        ])
        .areas(card);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Upload documents ");
        let inner = block.inner(card);
        block.render(card, buf);

        let mut lines = vec![
            Line::default(),
            Line::from(Span::styled(
                "[o] Select documents",
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "PDF, DOCX, TXT",
                Style::default().fg(Color::DarkGray),
            )),
            Line::default(),
        ];

        match self.files.summary() {
            Some(summary) => lines.push(Line::from(Span::styled(
                summary,
                Style::default().fg(Color::Yellow),
            ))),
            None => lines.push(Line::default()),
        }

        lines.push(Line::default());
        let button = if self.uploading {
            Span::styled(
                "Processing...",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            )
        } else {
            Span::styled(
                "[Enter] Process Documents",
                Style::default().fg(Color::Black).bg(Color::Cyan),
            )
        };
        lines.push(Line::from(button));

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}

impl Widget for &mut UploadScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [body, footer] =
            Layout::vertical([Constraint::Min(5), Constraint::Length(1)]).areas(area);

        self.render_dropzone(body, buf);

        let status = self.status.clone().unwrap_or_else(|| {
            StatusBar::new().left(" o: Select | Enter: Process | q: Quit")
        });
        (&status).render(footer, buf);

        if let Some(picker) = self.picker.as_mut() {
            picker.render(centered_rect(80, 80, body), buf);
        }

        if let Some(notification) = &self.notification {
            NotificationPopup::new(notification).render(body, buf);
        }

        if let Some(alert) = &self.alert {
            alert.render(area, buf);
        }
    }
}
