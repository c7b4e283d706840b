//! The saved-game shape exchanged with an external store.

use reversi_core::{Coord, Player};
use serde::{Deserialize, Serialize};

/// Everything needed to resume a game: the move log and both side
/// assignments. Serialization format is up to the store; this crate only
/// fixes the shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedGame {
    /// Recorded moves in play order.
    pub game: Vec<(Player, Coord)>,
    /// Player to move when the game was saved.
    pub turn: Player,
    /// Side the machine controls.
    pub machine: Player,
}
