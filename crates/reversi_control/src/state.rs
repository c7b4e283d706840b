//! Atomic snapshot of the UI-facing permission flags.

use arc_swap::ArcSwap;
use std::sync::Arc;

/// UI-facing permission flags, recomputed as a whole after every mutation.
///
/// Observers always read a complete snapshot; fields are never updated in
/// place. A default snapshot (everything false) stands in until the first
/// recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DerivedState {
    /// The machine is due to move and the board may change underneath.
    pub ai_busy: bool,
    /// A replay session is running.
    pub replay: bool,
    /// Neither player can move.
    pub game_over: bool,
    /// A new game may be started.
    pub can_new: bool,
    /// The recorded game may be replayed.
    pub can_replay: bool,
    /// The machine may be handed the opposite side.
    pub can_switch: bool,
    /// The last user move may be undone.
    pub can_undo: bool,
}

impl DerivedState {
    /// True while a machine move or a replay keeps user actions locked out.
    pub fn working(self) -> bool {
        self.ai_busy || self.replay
    }
}

/// Lock-free cell holding the current snapshot.
///
/// Writers swap in a whole new snapshot and get the previous one back,
/// which is how the game-over transition is detected exactly once.
#[derive(Debug)]
pub(crate) struct StateCell {
    current: ArcSwap<DerivedState>,
}

impl StateCell {
    pub fn new() -> Self {
        Self {
            current: ArcSwap::from_pointee(DerivedState::default()),
        }
    }

    /// Copies out the current snapshot.
    pub fn load(&self) -> DerivedState {
        **self.current.load()
    }

    /// Installs `next` and returns the snapshot it replaced.
    pub fn swap(&self, next: DerivedState) -> DerivedState {
        *self.current.swap(Arc::new(next))
    }
}
