//! Fixed-interval polling shared by the command-driven adapters.

use log::debug;
use std::future::Future;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

use crate::shutdown::ShutdownToken;

/// Smallest interval a poll loop will accept
const MIN_INTERVAL: Duration = Duration::from_millis(10);

/// Wait `warmup`, then run `pass` every `interval` until shutdown.
///
/// Passes never overlap: a slow pass delays the next tick instead of
/// stacking up behind it.
pub async fn poll_loop<F, Fut>(
    name: &str,
    warmup: Duration,
    interval: Duration,
    mut shutdown: ShutdownToken,
    mut pass: F,
) where
    F: FnMut() -> Fut,
    Fut: Future<Output = ()>,
{
    if !warmup.is_zero() {
        debug!("{}: waiting {:?} before first poll", name, warmup);
        tokio::select! {
            _ = tokio::time::sleep(warmup) => {}
            _ = shutdown.cancelled() => {
                debug!("{}: shut down during warmup", name);
                return;
            }
        }
    }

    let mut ticker = tokio::time::interval(interval.max(MIN_INTERVAL));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => pass().await,
            _ = shutdown.cancelled() => break,
        }
    }

    debug!("{}: poll loop stopped", name);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shutdown::Shutdown;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_runs_until_shutdown() {
        let (shutdown, token) = Shutdown::new();
        let passes = Arc::new(AtomicUsize::new(0));
        let counter = passes.clone();

        let task = tokio::spawn(async move {
            poll_loop("test", Duration::ZERO, Duration::from_secs(3), token, || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                }
            })
            .await;
        });

        // first tick fires immediately, then at 3s and 6s
        tokio::time::sleep(Duration::from_millis(7000)).await;
        shutdown.trigger();
        task.await.unwrap();
        assert_eq!(passes.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_during_warmup_skips_polls() {
        let (shutdown, token) = Shutdown::new();
        let passes = Arc::new(AtomicUsize::new(0));
        let counter = passes.clone();

        let task = tokio::spawn(async move {
            poll_loop("test", Duration::from_secs(5), Duration::from_secs(3), token, || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                }
            })
            .await;
        });

        tokio::time::sleep(Duration::from_secs(1)).await;
        shutdown.trigger();
        task.await.unwrap();
        assert_eq!(passes.load(Ordering::SeqCst), 0);
    }
}
