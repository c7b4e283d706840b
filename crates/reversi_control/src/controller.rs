//! The orchestrator: gates user input, serializes every game mutation
//! through the worker, and runs the replay state machine.
//!
//! Each mutating operation follows one pattern: publish a freshly derived
//! state (so "busy" is visible before the work starts), submit the mutation
//! as a worker job, then submit a refresh job that re-derives state after
//! the mutation. The refresh runs on the same serialized thread as the
//! mutation, so observers never see a mutation's effect without the
//! matching recomputation.

use crate::config::ControllerConfig;
use crate::engine::Engine;
use crate::events::{Event, UiEvent};
use crate::scheduler::Scheduler;
use crate::state::{DerivedState, StateCell};
use crate::status;
use crate::worker::{Job, JobKind, Worker};
use parking_lot::Mutex;
use reversi_core::{Coord, Player};
use std::collections::VecDeque;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// A replay in progress: the moves still to show and the position to put
/// back once they run out (or the user cancels).
struct ReplaySession<S> {
    remaining: VecDeque<(Player, Coord)>,
    snapshot: S,
}

/// Coordinates a two-player game against a possibly machine-controlled
/// opponent.
///
/// The controller owns the derived-state snapshot, the replay session and
/// the worker; the engine is shared with the worker thread behind a mutex.
/// Drive it from the UI thread: call operations, then [`pump`](Self::pump)
/// on a periodic tick to deliver events to the dispatch callback.
pub struct Controller<E: Engine> {
    engine: Arc<Mutex<E>>,
    worker: Worker,
    state: StateCell,
    session: Mutex<Option<ReplaySession<E::Snapshot>>>,
    dispatch: Box<dyn Fn(UiEvent) + Send + Sync>,
    scheduler: Arc<dyn Scheduler>,
    config: ControllerConfig,
    weak: Weak<Self>,
}

impl<E: Engine> Controller<E> {
    /// Creates a controller, spawns its worker and derives the initial
    /// state.
    ///
    /// Returned in an [`Arc`] because scheduled replay steps hold a weak
    /// handle back to the controller.
    pub fn new(
        engine: E,
        config: ControllerConfig,
        dispatch: impl Fn(UiEvent) + Send + Sync + 'static,
        scheduler: Arc<dyn Scheduler>,
    ) -> Arc<Self> {
        let controller = Arc::new_cyclic(|weak| Self {
            engine: Arc::new(Mutex::new(engine)),
            worker: Worker::spawn(),
            state: StateCell::new(),
            session: Mutex::new(None),
            dispatch: Box::new(dispatch),
            scheduler,
            config,
            weak: weak.clone(),
        });
        let initial = controller.recompute();
        controller.worker.post(initial);
        controller
    }

    /// Copies out the current derived-state snapshot.
    pub fn state(&self) -> DerivedState {
        self.state.load()
    }

    /// Checks whether user input reaches the game.
    ///
    /// False while a replay session is active; moves are ignored and taps
    /// cancel the replay instead.
    pub fn accepting_input(&self) -> bool {
        self.session.lock().is_none()
    }

    /// Plays a move for the user side.
    ///
    /// Ignored while a replay is running; an illegal square is absorbed by
    /// the engine as a no-op.
    #[instrument(skip(self))]
    pub fn user_move(&self, coord: Coord) {
        if !self.accepting_input() {
            debug!("replay active, move ignored");
            return;
        }
        let engine = Arc::clone(&self.engine);
        self.submit_serialized(JobKind::UserMove(coord), move || {
            engine.lock().user_move(coord)
        });
    }

    /// Advances the game: steps the replay if one is running, otherwise
    /// asks the machine for its move.
    ///
    /// Call this after move animations complete.
    #[instrument(skip(self))]
    pub fn next(&self) {
        if self.session.lock().is_some() {
            self.schedule_step(self.config.next_delay);
        } else {
            let engine = Arc::clone(&self.engine);
            self.submit_serialized(JobKind::MachineMove, move || engine.lock().machine_move());
        }
    }

    /// Starts a new game, announcing `Ready` once the board is reset.
    #[instrument(skip(self))]
    pub fn new_game(&self) {
        let engine = Arc::clone(&self.engine);
        self.submit_serialized(JobKind::NewGame, move || engine.lock().new_game());
    }

    /// Takes back the last user move and the machine reply after it.
    #[instrument(skip(self))]
    pub fn undo(&self) {
        let engine = Arc::clone(&self.engine);
        self.submit_serialized(JobKind::Undo, move || engine.lock().undo_turn());
    }

    /// Hands the machine the opposite side.
    #[instrument(skip(self))]
    pub fn switch(&self) {
        let engine = Arc::clone(&self.engine);
        self.submit_serialized(JobKind::Switch, move || engine.lock().switch_sides());
    }

    /// Replays the recorded game from the opening position.
    ///
    /// Pauses the worker (suspending machine moves), captures a snapshot
    /// of the current position, resets the board and schedules the first
    /// replay step. A no-op unless `can_replay` is set.
    #[instrument(skip(self))]
    pub fn replay(&self) {
        if !self.state.load().can_replay {
            debug!("replay unavailable");
            return;
        }
        self.worker.pause();
        let (remaining, snapshot) = {
            let mut engine = self.engine.lock();
            let log: VecDeque<_> = engine.play_log().into();
            let snapshot = engine.snapshot();
            if let Err(err) = engine.new_game() {
                warn!(%err, "board reset for replay failed");
            }
            (log, snapshot)
        };
        debug!(moves = remaining.len(), "replay started");
        *self.session.lock() = Some(ReplaySession {
            remaining,
            snapshot,
        });
        let event = self.recompute();
        self.worker.post(event);
        self.schedule_step(self.config.replay_start_delay);
    }

    /// Cancels a running replay.
    ///
    /// Clears the remaining moves so the next scheduled step restores the
    /// pre-replay position instead of playing on. Does nothing outside a
    /// replay; cancellation takes effect at the next step, an in-flight
    /// delay is not pre-empted.
    #[instrument(skip(self))]
    pub fn touch(&self) {
        if let Some(session) = self.session.lock().as_mut() {
            debug!(skipped = session.remaining.len(), "replay cancelled");
            session.remaining.clear();
        }
    }

    /// Delivers every pending outbound event to the dispatch callback.
    ///
    /// Call on a periodic tick from the UI thread. Side names in
    /// [`Event::CannotMove`] are resolved to their configured display
    /// strings.
    pub fn pump(&self) {
        for event in self.worker.drain() {
            let ui = match event {
                Event::Ready => UiEvent::Ready,
                Event::Update => UiEvent::Update,
                Event::GameOver { dark, light } => UiEvent::GameOver { dark, light },
                Event::CannotMove(player) => UiEvent::CannotMove {
                    player: self.config.player_name(player).to_string(),
                },
                Event::Failed { reason } => UiEvent::Failed { reason },
            };
            (self.dispatch)(ui);
        }
    }

    /// One-line description of what the game is doing right now.
    pub fn status_text(&self) -> String {
        let (turn, machine, score) = {
            let engine = self.engine.lock();
            (engine.turn(), engine.machine(), engine.score())
        };
        status::status_line(self.state.load(), turn, machine, score, &self.config)
    }

    /// Captures the game for an external store.
    pub fn save_game(&self) -> crate::persist::SavedGame {
        let engine = self.engine.lock();
        crate::persist::SavedGame {
            game: engine.play_log(),
            turn: engine.turn(),
            machine: engine.machine(),
        }
    }

    /// Rebuilds the game from a saved record, announcing `Ready` when the
    /// position is in place.
    #[instrument(skip(self, saved), fields(moves = saved.game.len()))]
    pub fn load_game(&self, saved: crate::persist::SavedGame) {
        let engine = Arc::clone(&self.engine);
        self.submit_serialized(JobKind::LoadGame, move || {
            engine
                .lock()
                .load_log(&saved.game, saved.turn, saved.machine)
        });
    }

    /// Stops the worker; queued jobs are discarded.
    #[instrument(skip(self))]
    pub fn quit(&self) {
        self.worker.stop();
    }

    /// Returns the board side length.
    pub fn board_size(&self) -> u8 {
        self.engine.lock().board_size()
    }

    /// Returns the owner of a square, if any.
    pub fn owner(&self, coord: Coord) -> Option<Player> {
        self.engine.lock().owner(coord)
    }

    /// Returns the most recently placed disc.
    pub fn last_move(&self) -> Option<Coord> {
        self.engine.lock().last_move()
    }

    /// Counts discs as `(dark, light)`.
    pub fn score(&self) -> (u32, u32) {
        self.engine.lock().score()
    }

    /// Returns the player to move.
    pub fn turn(&self) -> Player {
        self.engine.lock().turn()
    }

    /// Returns the configured display name of the machine's side.
    pub fn machine_name(&self) -> String {
        self.config
            .player_name(self.engine.lock().machine())
            .to_string()
    }

    /// Returns the controller configuration.
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Wraps a mutation in the recompute-before/after pattern.
    fn submit_serialized(
        &self,
        kind: JobKind,
        job: impl FnOnce() -> Result<Vec<Event>, crate::error::EngineError> + Send + 'static,
    ) {
        let before = self.recompute();
        self.worker.post(before);
        self.worker.submit(Job::new(kind, job));
        let weak = self.weak.clone();
        self.worker.submit(Job::new(JobKind::Refresh, move || {
            Ok(weak
                .upgrade()
                .map(|controller| vec![controller.recompute()])
                .unwrap_or_default())
        }));
    }

    /// Re-derives the permission flags from the engine and swaps them in.
    ///
    /// Returns the event announcing the change: `GameOver` exactly once,
    /// on the false-to-true edge of the engine's terminal state, `Update`
    /// otherwise.
    fn recompute(&self) -> Event {
        let (turn, machine, game_over, new_game, can_undo, score) = {
            let engine = self.engine.lock();
            (
                engine.turn(),
                engine.machine(),
                engine.is_game_over(),
                engine.is_new_game(),
                engine.can_undo(),
                engine.score(),
            )
        };
        let replay = self.session.lock().is_some();
        let ai_busy = !game_over && !replay && turn == machine;
        let working = ai_busy || replay;
        let next = DerivedState {
            ai_busy,
            replay,
            game_over,
            can_new: !working && !new_game,
            can_replay: !working && can_undo,
            can_switch: !working && !game_over,
            can_undo: !working && can_undo,
        };
        let previous = self.state.swap(next);
        if game_over && !previous.game_over {
            Event::GameOver {
                dark: score.0,
                light: score.1,
            }
        } else {
            Event::Update
        }
    }

    /// Schedules one replay step; the controller may be gone by the time
    /// the timer fires.
    fn schedule_step(&self, delay: Duration) {
        let weak = self.weak.clone();
        self.scheduler.schedule(
            delay,
            Box::new(move || {
                if let Some(controller) = weak.upgrade() {
                    controller.step_replay();
                }
            }),
        );
    }

    /// Runs one replay step.
    ///
    /// Plays the next recorded move and schedules the following step, or,
    /// once the moves run out, resumes the worker and hands it the job of
    /// restoring the pre-replay snapshot.
    fn step_replay(&self) {
        let next = match self.session.lock().as_mut() {
            Some(session) => session.remaining.pop_front(),
            None => return,
        };
        match next {
            Some((player, coord)) => {
                if let Err(err) = self.engine.lock().replay_move(player, coord) {
                    warn!(%err, %coord, "recorded move failed to apply, cancelling replay");
                    if let Some(session) = self.session.lock().as_mut() {
                        session.remaining.clear();
                    }
                }
                let event = self.recompute();
                self.worker.post(event);
                self.schedule_step(self.config.replay_step_delay);
            }
            None => {
                if self.worker.resume() {
                    let engine = Arc::clone(&self.engine);
                    let weak = self.weak.clone();
                    self.submit_serialized(JobKind::RestoreSnapshot, move || {
                        let Some(controller) = weak.upgrade() else {
                            return Ok(Vec::new());
                        };
                        let Some(session) = controller.session.lock().take() else {
                            return Ok(Vec::new());
                        };
                        engine.lock().restore(session.snapshot);
                        Ok(Vec::new())
                    });
                }
            }
        }
    }
}

impl<E: Engine> std::fmt::Debug for Controller<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("state", &self.state.load())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
