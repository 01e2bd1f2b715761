//! Timers bound to the lifetime of the view that owns them.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Delivers one action after a delay unless dropped first.
///
/// Dropping the timer aborts the underlying task, so a view that owns its
/// timers can never be reached by them once it is gone.
#[derive(Debug)]
pub struct ScopedTimer {
    handle: JoinHandle<()>,
}

impl ScopedTimer {
    /// Spawns a timer that sends `action` on `tx` after `delay`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<A>(delay: Duration, tx: UnboundedSender<A>, action: A) -> Self
    where
        A: Send + 'static,
    {
        let deadline = tokio::time::Instant::now() + delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let _ = tx.send(action);
        });

        Self { handle }
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
