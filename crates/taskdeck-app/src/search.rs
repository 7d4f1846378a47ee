//! Timer-based coalescing for search input.
//!
//! Rapid-fire term updates within the quiet window collapse to the most
//! recent value; an empty term commits immediately so the UI never shows a
//! stale filter after an explicit clear. Deliberately independent of any UI
//! framework's effect system.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Quiet window for search input coalescing.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(300);

/// Debounces search-term updates with cancel-on-new-call semantics.
///
/// Committed values are observable through a [`watch`] channel so a UI loop
/// can await the settled term instead of polling.
pub struct SearchDebouncer {
    delay: Duration,
    tx: watch::Sender<String>,
    rx: watch::Receiver<String>,
    pending: Option<JoinHandle<()>>,
}

impl SearchDebouncer {
    /// Debouncer with the standard 300 ms quiet window.
    #[must_use]
    pub fn new() -> Self {
        Self::with_delay(DEBOUNCE_DELAY)
    }

    /// Debouncer with a custom quiet window (mainly for tests).
    #[must_use]
    pub fn with_delay(delay: Duration) -> Self {
        let (tx, rx) = watch::channel(String::new());
        Self {
            delay,
            tx,
            rx,
            pending: None,
        }
    }

    /// Submit a new term. Any pending commit is cancelled; blank terms
    /// commit an empty string immediately, bypassing the timer.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(&mut self, term: &str) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }

        if term.trim().is_empty() {
            let _ = self.tx.send(String::new());
            return;
        }

        let tx = self.tx.clone();
        let value = term.to_owned();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(value);
        }));
    }

    /// The most recently committed term.
    #[must_use]
    pub fn current(&self) -> String {
        self.rx.borrow().clone()
    }

    /// Subscribe to committed terms.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.rx.clone()
    }
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SearchDebouncer {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
