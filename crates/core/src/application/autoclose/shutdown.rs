// Stop signal for the auto-close timer task

use tokio::sync::watch;

/// Cooperative stop token checked by the timer loop
#[derive(Clone)]
pub struct StopToken {
    rx: watch::Receiver<bool>,
}

impl StopToken {
    /// Check if a stop was requested
    pub fn is_stopped(&self) -> bool {
        *self.rx.borrow()
    }

    /// Wait for the stop signal
    pub async fn wait(&mut self) {
        let _ = self.rx.changed().await;
    }
}

/// Stop sender held by the scheduler facade
pub struct StopSender {
    tx: watch::Sender<bool>,
}

impl StopSender {
    /// Signal the timer loop to stop after any in-flight cycle
    pub fn stop(&self) {
        let _ = self.tx.send(true);
    }
}

/// Create a stop channel
pub fn stop_channel() -> (StopSender, StopToken) {
    let (tx, rx) = watch::channel(false);
    (StopSender { tx }, StopToken { rx })
}
