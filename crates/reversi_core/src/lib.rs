//! Pure Reversi game logic.
//!
//! This crate owns the rules and nothing else: board representation,
//! move legality and line capture, pass handling, the move log, undo
//! restore points and whole-game snapshots. It performs no I/O and
//! spawns no threads, which keeps it easy to drive from a controller
//! or a test harness.
//!
//! # Example
//!
//! ```
//! use reversi_core::{Coord, Game, Player};
//!
//! # fn example() -> Result<(), reversi_core::MoveError> {
//! let mut game = Game::new(8)?;
//! assert_eq!(game.turn(), Player::Dark);
//!
//! // The user plays Dark; the machine answers for Light.
//! game.user_move(Coord::new(2, 3))?;
//! game.machine_move()?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod error;
mod game;
mod types;

pub use board::Board;
pub use error::MoveError;
pub use game::{Game, MoveOutcome, Snapshot};
pub use types::{Cell, Coord, Player};
