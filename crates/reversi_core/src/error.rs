//! Rule violation errors.

use crate::types::Player;
use derive_more::{Display, Error};

/// Errors raised by board construction and move application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// Board dimension must be an even number between 4 and 16.
    #[display("board dimension {dim} is not an even number in 4..=16")]
    BadDimension {
        /// The rejected dimension.
        dim: u8,
    },
    /// Coordinate lies outside the board.
    #[display("({row}, {col}) is off the board")]
    OutOfBounds {
        /// Row index.
        row: u8,
        /// Column index.
        col: u8,
    },
    /// The square already holds a disc.
    #[display("({row}, {col}) is occupied")]
    Occupied {
        /// Row index.
        row: u8,
        /// Column index.
        col: u8,
    },
    /// The move would flip no discs.
    #[display("a disc at ({row}, {col}) flips nothing")]
    NoCapture {
        /// Row index.
        row: u8,
        /// Column index.
        col: u8,
    },
    /// The acting player is not the player to move.
    #[display("it is not {player}'s turn")]
    OutOfTurn {
        /// The player who tried to move.
        player: Player,
    },
    /// There is no earlier position to return to.
    #[display("nothing to undo")]
    NothingToUndo,
}
