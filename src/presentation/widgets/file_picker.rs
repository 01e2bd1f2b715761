use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, StatefulWidget, Widget},
};
use std::{
    cmp::Ordering,
    env, fs,
    path::{Path, PathBuf},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilePickerAction {
    /// Replace the selection with these files, in the order given.
    Confirm(Vec<PathBuf>),
    Cancel,
    None,
}

#[derive(Debug, Clone)]
struct FileEntry {
    path: PathBuf,
    is_dir: bool,
    name: String,
}

/// Directory browser that lets the user mark several files at once.
pub struct FilePicker {
    current_dir: PathBuf,
    entries: Vec<FileEntry>,
    marked: Vec<PathBuf>,
    state: ListState,
    show_hidden: bool,
}

impl FilePicker {
    /// Opens the picker in `start_dir`, or the home directory when `None`.
    #[must_use]
    pub fn new(start_dir: Option<&Path>, show_hidden: bool) -> Self {
        let root = start_dir.map_or_else(
            || env::var("HOME").map_or_else(|_| PathBuf::from("/"), PathBuf::from),
            Path::to_path_buf,
        );
        let mut picker = Self {
            current_dir: root.clone(),
            entries: Vec::new(),
            marked: Vec::new(),
            state: ListState::default(),
            show_hidden,
        };
        picker.load_entries(&root);
        picker
    }

    #[must_use]
    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    /// Files marked so far, in marking order.
    #[must_use]
    pub fn marked(&self) -> &[PathBuf] {
        &self.marked
    }

    fn load_entries(&mut self, path: &Path) {
        let selected_name = self.selected_entry().map(|e| e.name.clone());

        self.entries.clear();

        if let Some(parent) = path.parent() {
            self.entries.push(FileEntry {
                path: parent.to_path_buf(),
                is_dir: true,
                name: "..".to_string(),
            });
        }

        if let Ok(read_dir) = fs::read_dir(path) {
            let mut entries: Vec<FileEntry> = read_dir
                .filter_map(Result::ok)
                .filter(|entry| {
                    self.show_hidden
                        || !entry.file_name().to_string_lossy().starts_with('.')
                })
                .map(|entry| {
                    let path = entry.path();
                    let is_dir = path.is_dir();
                    let name = entry.file_name().to_string_lossy().into_owned();
                    FileEntry { path, is_dir, name }
                })
                .collect();

            entries.sort_by(|a, b| match (a.is_dir, b.is_dir) {
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                _ => a.name.cmp(&b.name),
            });

            self.entries.extend(entries);
        }

        let restored = selected_name
            .and_then(|name| self.entries.iter().position(|e| e.name == name));
        if self.entries.is_empty() {
            self.state.select(None);
        } else {
            self.state.select(Some(restored.unwrap_or(0)));
        }
    }

    fn change_dir(&mut self, path: PathBuf) {
        self.state.select(None);
        self.current_dir = path;
        let path = self.current_dir.clone();
        self.load_entries(&path);
    }

    fn go_up(&mut self) {
        if let Some(parent) = self.current_dir.parent().map(PathBuf::from) {
            self.change_dir(parent);
        }
    }

    pub fn toggle_hidden(&mut self) {
        self.show_hidden = !self.show_hidden;
        let path = self.current_dir.clone();
        self.load_entries(&path);
    }

    fn toggle_mark(&mut self) {
        let Some(entry) = self.selected_entry() else {
            return;
        };
        if entry.is_dir {
            return;
        }
        let path = entry.path.clone();
        if let Some(idx) = self.marked.iter().position(|p| *p == path) {
            self.marked.remove(idx);
        } else {
            self.marked.push(path);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FilePickerAction {
        match key.code {
            KeyCode::Esc => FilePickerAction::Cancel,
            KeyCode::Up | KeyCode::Char('k') => {
                self.previous();
                FilePickerAction::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.next();
                FilePickerAction::None
            }
            KeyCode::Left | KeyCode::Backspace | KeyCode::Char('h') => {
                self.go_up();
                FilePickerAction::None
            }
            KeyCode::Char(' ') => {
                self.toggle_mark();
                self.next();
                FilePickerAction::None
            }
            KeyCode::Char('.') => {
                self.toggle_hidden();
                FilePickerAction::None
            }
            KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => self.activate(),
            _ => FilePickerAction::None,
        }
    }

    fn activate(&mut self) -> FilePickerAction {
        let Some(selected) = self.selected_entry().cloned() else {
            return self.confirm_marked();
        };

        if selected.name == ".." {
            self.go_up();
            FilePickerAction::None
        } else if selected.is_dir {
            self.change_dir(selected.path);
            FilePickerAction::None
        } else if self.marked.is_empty() {
            FilePickerAction::Confirm(vec![selected.path])
        } else {
            self.confirm_marked()
        }
    }

    fn confirm_marked(&self) -> FilePickerAction {
        if self.marked.is_empty() {
            FilePickerAction::None
        } else {
            FilePickerAction::Confirm(self.marked.clone())
        }
    }

    fn next(&mut self) {
        let i = match self.state.selected() {
            Some(i) if i >= self.entries.len().saturating_sub(1) => 0,
            Some(i) => i + 1,
            None => 0,
        };
        self.state.select(Some(i));
    }

    fn previous(&mut self) {
        let i = match self.state.selected() {
            Some(0) | None => self.entries.len().saturating_sub(1),
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    fn selected_entry(&self) -> Option<&FileEntry> {
        self.state.selected().and_then(|i| self.entries.get(i))
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let title = format!(
            " Select documents - {} ({} marked) ",
            self.current_dir.display(),
            self.marked.len()
        );

        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .title_style(Style::default().add_modifier(Modifier::BOLD));

        let inner_area = block.inner(area);
        let [list_area, footer_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner_area);

        block.render(area, buf);

        let items: Vec<ListItem> = self
            .entries
            .iter()
            .map(|entry| {
                let mark = if self.marked.contains(&entry.path) {
                    "[x] "
                } else if entry.is_dir {
                    "    "
                } else {
                    "[ ] "
                };
                let suffix = if entry.is_dir && entry.name != ".." { "/" } else { "" };
                ListItem::new(format!("{mark}{}{suffix}", entry.name)).style(
                    Style::default().fg(if entry.is_dir {
                        Color::Blue
                    } else {
                        Color::White
                    }),
                )
            })
            .collect();

        let list = List::new(items)
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol(">> ");

        StatefulWidget::render(list, list_area, buf, &mut self.state);

        let footer = Line::from(vec![
            Span::raw(" [Space] Mark | "),
            Span::raw("[Enter] Open/Confirm | "),
            Span::raw("[.] Hidden | "),
            Span::raw("[Esc] Cancel "),
        ])
        .style(Style::default().fg(Color::Gray));

        Widget::render(footer, footer_area, buf);
    }
}
