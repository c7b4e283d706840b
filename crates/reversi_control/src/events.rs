//! Events flowing from the worker out to the user interface.

use reversi_core::Player;

/// Event posted to the outbound queue by jobs and state recomputation.
///
/// Consecutive identical events collapse into one queue entry, so a burst
/// of recomputations produces a single `Update` for the next drain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A fresh game is ready to draw.
    Ready,
    /// Board or derived state changed.
    Update,
    /// The game just ended, with the final disc counts.
    GameOver {
        /// Dark's disc count.
        dark: u32,
        /// Light's disc count.
        light: u32,
    },
    /// A player has no legal reply and forfeits the turn.
    CannotMove(Player),
    /// A worker job failed; the worker keeps running.
    Failed {
        /// Human-readable failure description.
        reason: String,
    },
}

/// Event delivered to the dispatch callback, with player names resolved
/// to their configured display strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// A fresh game is ready to draw.
    Ready,
    /// Board or derived state changed; re-read the controller surface.
    Update,
    /// The game just ended, with the final disc counts.
    GameOver {
        /// Dark's disc count.
        dark: u32,
        /// Light's disc count.
        light: u32,
    },
    /// The named player has no legal reply and forfeits the turn.
    CannotMove {
        /// Display name of the passing player.
        player: String,
    },
    /// A worker job failed.
    Failed {
        /// Human-readable failure description.
        reason: String,
    },
}
