//! Queue-pair and worker lifecycle properties.

use reversi_control::{EngineError, Event, Job, JobKind, Worker};
use reversi_core::Coord;
use std::sync::mpsc;
use std::time::Duration;

/// A job whose single event carries a recognizable payload.
fn marker_job(kind: JobKind, dark: u32) -> Job {
    Job::new(kind, move || Ok(vec![Event::GameOver { dark, light: 0 }]))
}

fn marker(dark: u32) -> Event {
    Event::GameOver { dark, light: 0 }
}

#[test]
fn test_results_arrive_in_submission_order() {
    let worker = Worker::spawn();
    worker.submit(marker_job(JobKind::UserMove(Coord::new(0, 0)), 1));
    worker.submit(marker_job(JobKind::UserMove(Coord::new(1, 0)), 2));
    worker.submit(marker_job(JobKind::UserMove(Coord::new(2, 0)), 3));

    assert_eq!(worker.blocking_recv(), Some(marker(1)));
    assert_eq!(worker.blocking_recv(), Some(marker(2)));
    assert_eq!(worker.blocking_recv(), Some(marker(3)));
}

#[test]
fn test_duplicate_submission_collapses_to_one_entry() {
    let worker = Worker::spawn();
    // Hold the worker on a blocker so the queue tail is observable.
    let (started_tx, started_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel::<()>();
    worker.submit(Job::new(JobKind::NewGame, move || {
        started_tx.send(()).unwrap();
        release_rx.recv().ok();
        Ok(vec![Event::Ready])
    }));
    started_rx
        .recv_timeout(Duration::from_secs(2))
        .expect("blocker job did not start");

    worker.submit(marker_job(JobKind::Undo, 1));
    // Same kind as the queue tail: dropped, payload and all.
    worker.submit(marker_job(JobKind::Undo, 2));
    worker.submit(marker_job(JobKind::Switch, 3));
    release_tx.send(()).unwrap();

    assert_eq!(worker.blocking_recv(), Some(Event::Ready));
    assert_eq!(worker.blocking_recv(), Some(marker(1)));
    assert_eq!(worker.blocking_recv(), Some(marker(3)));
}

#[test]
fn test_duplicate_outbound_events_collapse() {
    let worker = Worker::spawn();
    worker.post(Event::Update);
    worker.post(Event::Update);
    worker.post(Event::Ready);
    // Only the tail is compared, so a repeat further back still queues.
    worker.post(Event::Update);
    assert_eq!(
        worker.drain(),
        vec![Event::Update, Event::Ready, Event::Update]
    );
}

#[test]
fn test_job_events_collapse_against_the_outbound_tail() {
    let worker = Worker::spawn();
    let (done_tx, done_rx) = mpsc::channel();
    worker.submit(Job::new(JobKind::Refresh, || {
        Ok(vec![Event::Update, Event::Update])
    }));
    worker.submit(Job::new(JobKind::NewGame, move || {
        done_tx.send(()).unwrap();
        Ok(vec![Event::Ready])
    }));
    // Both Updates are posted before the second job starts, so the queue
    // is settled before anything is read.
    done_rx.recv_timeout(Duration::from_secs(2)).unwrap();

    assert_eq!(worker.blocking_recv(), Some(Event::Update));
    assert_eq!(worker.blocking_recv(), Some(Event::Ready));
    worker.stop();
    assert_eq!(worker.blocking_recv(), None);
}

#[test]
fn test_pause_clears_pending_and_drops_submissions() {
    let worker = Worker::spawn();
    let (started_tx, started_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel::<()>();
    worker.submit(Job::new(JobKind::NewGame, move || {
        started_tx.send(()).unwrap();
        release_rx.recv().ok();
        Ok(vec![Event::Ready])
    }));
    started_rx
        .recv_timeout(Duration::from_secs(2))
        .expect("blocker job did not start");

    worker.submit(marker_job(JobKind::Undo, 1));
    assert!(worker.pause());
    // Cleared by the pause and dropped afterwards.
    worker.submit(marker_job(JobKind::Switch, 2));
    worker.submit(marker_job(JobKind::Switch, 3));
    assert!(worker.resume());
    release_tx.send(()).unwrap();

    // The in-flight blocker finishes; nothing else ran.
    assert_eq!(worker.blocking_recv(), Some(Event::Ready));
    worker.submit(marker_job(JobKind::MachineMove, 9));
    assert_eq!(worker.blocking_recv(), Some(marker(9)));
}

#[test]
fn test_pause_and_resume_report_transitions_only() {
    let worker = Worker::spawn();
    assert!(!worker.resume());
    assert!(worker.pause());
    assert!(!worker.pause());
    assert!(worker.resume());
    assert!(!worker.resume());
}

#[test]
fn test_failed_and_panicking_jobs_keep_the_worker_alive() {
    let worker = Worker::spawn();
    worker.submit(Job::new(JobKind::Undo, || {
        Err(EngineError::new("boom"))
    }));
    worker.submit(Job::new(JobKind::Switch, || panic!("kaboom")));
    worker.submit(Job::new(JobKind::NewGame, || Ok(vec![Event::Ready])));

    match worker.blocking_recv() {
        Some(Event::Failed { reason }) => assert!(reason.contains("boom")),
        other => panic!("expected a failure event, got {other:?}"),
    }
    match worker.blocking_recv() {
        Some(Event::Failed { reason }) => assert!(reason.contains("kaboom")),
        other => panic!("expected a failure event, got {other:?}"),
    }
    assert_eq!(worker.blocking_recv(), Some(Event::Ready));
}

#[test]
fn test_blocking_recv_returns_none_once_stopped_and_drained() {
    let worker = Worker::spawn();
    worker.submit(Job::new(JobKind::NewGame, || Ok(vec![Event::Ready])));
    assert_eq!(worker.blocking_recv(), Some(Event::Ready));
    worker.stop();
    assert_eq!(worker.blocking_recv(), None);
}

#[test]
fn test_drain_is_nonblocking_and_ordered() {
    let worker = Worker::spawn();
    assert!(worker.drain().is_empty());
    worker.submit(marker_job(JobKind::UserMove(Coord::new(0, 0)), 1));
    worker.submit(marker_job(JobKind::UserMove(Coord::new(1, 0)), 2));
    // Wait for both results, then drain in one call.
    let first = worker.blocking_recv();
    let mut rest = Vec::new();
    while rest.is_empty() {
        rest.extend(worker.drain());
    }
    assert_eq!(first, Some(marker(1)));
    assert_eq!(rest, vec![marker(2)]);
}

#[test]
#[should_panic(expected = "stopped worker")]
fn test_submitting_to_a_stopped_worker_panics() {
    let worker = Worker::spawn();
    worker.stop();
    worker.submit(Job::new(JobKind::NewGame, || Ok(Vec::new())));
}
