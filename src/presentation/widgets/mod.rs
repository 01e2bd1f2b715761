mod alert;
mod file_picker;
mod input;
mod status_bar;
mod transcript_pane;

pub use alert::Alert;
pub use file_picker::{FilePicker, FilePickerAction};
pub use input::TextInput;
pub use status_bar::{StatusBar, StatusLevel};
pub use transcript_pane::{TranscriptPane, TranscriptPaneState};
