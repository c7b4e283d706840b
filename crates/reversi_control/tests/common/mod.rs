//! Shared helpers for the controller integration tests.

use parking_lot::Mutex;
use reversi_control::{Scheduler, UiEvent};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

/// Scheduler that queues callbacks for the test to fire by hand.
#[derive(Default)]
pub struct ManualScheduler {
    pending: Mutex<VecDeque<Box<dyn FnOnce() + Send>>>,
}

impl ManualScheduler {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Runs the oldest pending callback; false when none is queued.
    pub fn fire_next(&self) -> bool {
        let callback = self.pending.lock().pop_front();
        match callback {
            Some(callback) => {
                callback();
                true
            }
            None => false,
        }
    }

    pub fn pending(&self) -> usize {
        self.pending.lock().len()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, _delay: Duration, callback: Box<dyn FnOnce() + Send>) {
        self.pending.lock().push_back(callback);
    }
}

/// Collects dispatched events for later assertions.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<UiEvent>>>,
}

impl EventLog {
    /// Dispatch callback that appends to this log.
    pub fn recorder(&self) -> impl Fn(UiEvent) + Send + Sync + 'static {
        let events = Arc::clone(&self.events);
        move |event| events.lock().push(event)
    }

    pub fn snapshot(&self) -> Vec<UiEvent> {
        self.events.lock().clone()
    }

    pub fn count_game_over(&self) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|event| matches!(event, UiEvent::GameOver { .. }))
            .count()
    }
}

/// Polls `cond` until it holds, panicking after two seconds.
pub fn wait_until(what: &str, mut cond: impl FnMut() -> bool) {
    for _ in 0..400 {
        if cond() {
            return;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    panic!("timed out waiting for {what}");
}
