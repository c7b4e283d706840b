//! One-shot timer capability for replay pacing.

use std::time::Duration;
use tracing::warn;

/// Fire-and-forget one-shot timer.
///
/// The controller schedules replay steps through this seam and stays
/// agnostic of how the delay is implemented; tests substitute a manual
/// implementation and fire the callbacks by hand.
pub trait Scheduler: Send + Sync {
    /// Runs `callback` once after `delay`.
    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce() + Send>);
}

/// [`Scheduler`] backed by a short-lived named thread per timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadScheduler;

impl Scheduler for ThreadScheduler {
    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce() + Send>) {
        let spawned = std::thread::Builder::new()
            .name("reversi-timer".into())
            .spawn(move || {
                std::thread::sleep(delay);
                callback();
            });
        if let Err(err) = spawned {
            warn!(%err, "failed to spawn timer thread, callback dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_thread_scheduler_fires_once() {
        let (tx, rx) = mpsc::channel();
        ThreadScheduler.schedule(
            Duration::from_millis(1),
            Box::new(move || tx.send(()).unwrap()),
        );
        rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());
    }
}
