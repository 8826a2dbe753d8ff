//! Trailing-edge debouncer for keystroke-driven updates.
//!
//! Each call replaces the pending one; only the last value within `delay` is
//! delivered. Dropping the debouncer cancels anything still pending, so a
//! closed view never receives a late update.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub struct Debouncer<T: Send + 'static> {
    delay: Duration,
    sender: mpsc::UnboundedSender<T>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(delay: Duration, sender: mpsc::UnboundedSender<T>) -> Self {
        Self {
            delay,
            sender,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `value` for delivery after the delay, replacing any pending value.
    pub fn call(&mut self, value: T) {
        self.cancel();

        let delay = self.delay;
        let sender = self.sender.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the view is gone; nothing left to update.
            let _ = sender.send(value);
        }));
    }

    /// Drop the pending value, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().map(|h| !h.is_finished()).unwrap_or(false)
    }
}

impl<T: Send + 'static> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}
