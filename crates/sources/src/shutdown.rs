//! Cooperative cancellation for adapter loops.

use tokio::sync::watch;

/// Owner side; dropping it also cancels every token
#[derive(Debug)]
pub struct Shutdown {
    tx: watch::Sender<bool>,
}

/// Cloneable listener handed to each adapter
#[derive(Debug, Clone)]
pub struct ShutdownToken {
    rx: watch::Receiver<bool>,
}

impl Shutdown {
    pub fn new() -> (Self, ShutdownToken) {
        let (tx, rx) = watch::channel(false);
        (Self { tx }, ShutdownToken { rx })
    }

    pub fn token(&self) -> ShutdownToken {
        ShutdownToken {
            rx: self.tx.subscribe(),
        }
    }

    pub fn trigger(&self) {
        // send_replace works even when no token is listening
        self.tx.send_replace(true);
    }
}

impl ShutdownToken {
    pub fn is_triggered(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once shutdown has been requested or the owner is gone
    pub async fn cancelled(&mut self) {
        // wait_for returns Err when the sender is dropped; treat as cancelled
        let _ = self.rx.wait_for(|triggered| *triggered).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_trigger_wakes_all_tokens() {
        let (shutdown, mut first) = Shutdown::new();
        let mut second = shutdown.token();
        assert!(!first.is_triggered());

        shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(1), first.cancelled())
            .await
            .unwrap();
        tokio::time::timeout(Duration::from_secs(1), second.cancelled())
            .await
            .unwrap();
        assert!(first.is_triggered());
    }

    #[tokio::test]
    async fn test_dropping_owner_cancels() {
        let (shutdown, mut token) = Shutdown::new();
        drop(shutdown);
        tokio::time::timeout(Duration::from_secs(1), token.cancelled())
            .await
            .unwrap();
    }
}
