use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Trailing-edge debouncer for rapid input
///
/// Each call to [`input`](Self::input) cancels the previous pending
/// emission, so a burst of keystrokes yields exactly one value — the last
/// one — after the quiet window elapses. Values come out of the receiver
/// returned by [`new`](Self::new).
pub struct DebouncedInput {
    delay: Duration,
    tx: mpsc::Sender<String>,
    pending: Option<JoinHandle<()>>,
}

impl DebouncedInput {
    /// Create a debouncer with the given quiet window
    pub fn new(delay: Duration) -> (Self, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(16);
        (
            Self {
                delay,
                tx,
                pending: None,
            },
            rx,
        )
    }

    /// Feed a value; it is emitted only if no newer value arrives in time
    pub fn input(&mut self, value: impl Into<String>) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }

        let tx = self.tx.clone();
        let delay = self.delay;
        let value = value.into();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver dropped means nobody cares anymore
            let _ = tx.send(value).await;
        }));
    }

    /// Cancel any pending emission
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for DebouncedInput {
    fn drop(&mut self) {
        self.cancel();
    }
}
