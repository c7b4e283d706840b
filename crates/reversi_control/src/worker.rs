//! Single background worker with a paired inbound/outbound message queue.
//!
//! All game mutations are funneled through one worker thread: callers
//! submit jobs on the inbound queue, the worker runs them one at a time
//! and posts the resulting events on the outbound queue. One mutex guards
//! both queues and the lifecycle flag, with a condition variable per
//! direction so neither side busy-polls.

use crate::error::EngineError;
use crate::events::Event;
use parking_lot::{Condvar, Mutex};
use reversi_core::Coord;
use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Worker lifecycle.
///
/// `Active` admits jobs, `Paused` silently drops them, `Stopped` ends the
/// execution loop once the in-flight job (if any) completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Lifecycle {
    #[default]
    Active,
    Paused,
    Stopped,
}

/// Semantic identity of a queued job.
///
/// Two submissions with equal kinds are considered the same request, so a
/// submission matching the inbound tail is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobKind {
    /// Apply a user move.
    UserMove(Coord),
    /// Ask the machine for its reply.
    MachineMove,
    /// Reset to the opening position.
    NewGame,
    /// Return to before the last user move.
    Undo,
    /// Hand the machine the opposite side.
    Switch,
    /// Rebuild the game from a saved move log.
    LoadGame,
    /// Write a replay snapshot back over the engine.
    RestoreSnapshot,
    /// Recompute derived state only.
    Refresh,
}

/// A unit of work: a semantic tag plus the closure that performs it.
///
/// The closure returns the events describing what it changed; a failure
/// becomes an outbound [`Event::Failed`] instead of killing the worker.
pub struct Job {
    kind: JobKind,
    run: Box<dyn FnOnce() -> Result<Vec<Event>, EngineError> + Send>,
}

impl Job {
    /// Creates a job from its semantic tag and work closure.
    pub fn new(
        kind: JobKind,
        run: impl FnOnce() -> Result<Vec<Event>, EngineError> + Send + 'static,
    ) -> Self {
        Self {
            kind,
            run: Box::new(run),
        }
    }

    /// Returns the job's semantic tag.
    pub fn kind(&self) -> JobKind {
        self.kind
    }
}

impl std::fmt::Debug for Job {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Job").field("kind", &self.kind).finish()
    }
}

/// Queues and lifecycle, all guarded by one mutex.
#[derive(Debug, Default)]
struct Channel {
    jobs: VecDeque<Job>,
    events: VecDeque<Event>,
    lifecycle: Lifecycle,
}

#[derive(Debug, Default)]
struct Shared {
    channel: Mutex<Channel>,
    job_ready: Condvar,
    event_ready: Condvar,
}

impl Shared {
    /// Appends an event unless it equals the outbound tail.
    fn post(&self, event: Event) {
        let mut channel = self.channel.lock();
        if channel.events.back() == Some(&event) {
            debug!(?event, "duplicate of outbound tail, dropped");
            return;
        }
        channel.events.push_back(event);
        self.event_ready.notify_one();
    }
}

/// The background worker and its queue pair.
///
/// Dropping the worker stops it and joins the thread.
#[derive(Debug)]
pub struct Worker {
    shared: Arc<Shared>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl Worker {
    /// Spawns the worker thread with empty queues.
    #[instrument]
    pub fn spawn() -> Self {
        let shared = Arc::new(Shared::default());
        let runner = Arc::clone(&shared);
        let handle = std::thread::Builder::new()
            .name("reversi-worker".into())
            .spawn(move || run(&runner))
            .expect("failed to spawn worker thread");
        Self {
            shared,
            handle: Mutex::new(Some(handle)),
        }
    }

    /// Enqueues a job for the worker thread.
    ///
    /// Silently dropped while paused, and dropped as a duplicate when its
    /// kind equals the inbound tail's kind.
    ///
    /// # Panics
    ///
    /// Panics when the worker has been stopped; submitting work to a
    /// stopped worker is a contract violation, not a recoverable error.
    #[instrument(skip(self, job), fields(kind = ?job.kind()))]
    pub fn submit(&self, job: Job) {
        let mut channel = self.shared.channel.lock();
        assert!(
            channel.lifecycle != Lifecycle::Stopped,
            "job submitted to a stopped worker"
        );
        if channel.lifecycle == Lifecycle::Paused {
            debug!("worker paused, job dropped");
            return;
        }
        if channel.jobs.back().map(Job::kind) == Some(job.kind()) {
            debug!("duplicate of inbound tail, dropped");
            return;
        }
        channel.jobs.push_back(job);
        self.shared.job_ready.notify_one();
    }

    /// Appends an event to the outbound queue, de-duplicating against the
    /// tail. Used for recomputation events raised off the worker thread.
    pub fn post(&self, event: Event) {
        self.shared.post(event);
    }

    /// Pops every currently queued outbound event, oldest first.
    ///
    /// Non-blocking; returns an empty vector when nothing is pending.
    pub fn drain(&self) -> Vec<Event> {
        let mut channel = self.shared.channel.lock();
        channel.events.drain(..).collect()
    }

    /// Blocks until an outbound event is available and returns it.
    ///
    /// Returns `None` once the worker is stopped and the queue is drained.
    pub fn blocking_recv(&self) -> Option<Event> {
        let mut channel = self.shared.channel.lock();
        loop {
            if let Some(event) = channel.events.pop_front() {
                return Some(event);
            }
            if channel.lifecycle == Lifecycle::Stopped {
                return None;
            }
            self.shared.event_ready.wait(&mut channel);
        }
    }

    /// Pauses the worker and clears all pending jobs.
    ///
    /// Pending jobs are cleared even when already paused. Returns whether
    /// this call transitioned the worker from active to paused.
    #[instrument(skip(self))]
    pub fn pause(&self) -> bool {
        let mut channel = self.shared.channel.lock();
        let dropped = channel.jobs.len();
        channel.jobs.clear();
        match channel.lifecycle {
            Lifecycle::Active => {
                channel.lifecycle = Lifecycle::Paused;
                debug!(dropped, "worker paused");
                true
            }
            Lifecycle::Paused => {
                debug!(dropped, "worker already paused");
                false
            }
            Lifecycle::Stopped => false,
        }
    }

    /// Resumes a paused worker.
    ///
    /// Returns true only on the paused-to-active transition.
    #[instrument(skip(self))]
    pub fn resume(&self) -> bool {
        let mut channel = self.shared.channel.lock();
        if channel.lifecycle != Lifecycle::Paused {
            return false;
        }
        channel.lifecycle = Lifecycle::Active;
        self.shared.job_ready.notify_one();
        debug!("worker resumed");
        true
    }

    /// Stops the worker and waits for the thread to exit.
    ///
    /// The in-flight job (if any) runs to completion and its events stay
    /// readable via [`drain`](Self::drain); queued jobs are discarded.
    /// Idempotent.
    #[instrument(skip(self))]
    pub fn stop(&self) {
        {
            let mut channel = self.shared.channel.lock();
            let discarded = channel.jobs.len();
            channel.jobs.clear();
            channel.lifecycle = Lifecycle::Stopped;
            if discarded > 0 {
                debug!(discarded, "queued jobs discarded");
            }
            self.shared.job_ready.notify_all();
            self.shared.event_ready.notify_all();
        }
        if let Some(handle) = self.handle.lock().take() {
            if handle.join().is_err() {
                warn!("worker thread panicked");
            }
            info!("worker stopped");
        }
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        self.stop();
    }
}

/// The execution loop: pop a job, run it, post its events, repeat.
fn run(shared: &Shared) {
    info!("worker started");
    loop {
        let job = {
            let mut channel = shared.channel.lock();
            loop {
                if channel.lifecycle == Lifecycle::Stopped {
                    debug!("worker loop exiting");
                    return;
                }
                if channel.lifecycle == Lifecycle::Active {
                    if let Some(job) = channel.jobs.pop_front() {
                        break job;
                    }
                }
                shared.job_ready.wait(&mut channel);
            }
        };
        let kind = job.kind();
        debug!(?kind, "running job");
        let events = match panic::catch_unwind(AssertUnwindSafe(job.run)) {
            Ok(Ok(events)) => events,
            Ok(Err(err)) => {
                warn!(%err, ?kind, "job failed");
                vec![Event::Failed {
                    reason: err.to_string(),
                }]
            }
            Err(payload) => {
                let reason = describe_panic(payload.as_ref());
                warn!(reason, ?kind, "job panicked");
                vec![Event::Failed { reason }]
            }
        };
        for event in events {
            shared.post(event);
        }
    }
}

fn describe_panic(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "job panicked".to_string()
    }
}
