//! Presentation layer with UI components and event handling.

/// Results delivered by background tasks.
pub mod actions;
/// Event handling.
pub mod events;
/// Cancellable one-shot timers.
pub mod timer;
/// UI screens.
pub mod ui;
/// Reusable widgets.
pub mod widgets;

pub use ui::{App, AppSettings};
