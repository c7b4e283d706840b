//! Core domain types for Reversi.

use serde::{Deserialize, Serialize};

/// Player in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Player {
    /// Dark discs (moves first).
    Dark,
    /// Light discs (moves second).
    Light,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::Dark => Player::Light,
            Player::Light => Player::Dark,
        }
    }
}

/// A square on the board, addressed by zero-based row and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    /// Row index, 0 at the top.
    pub row: u8,
    /// Column index, 0 at the left.
    pub col: u8,
}

impl Coord {
    /// Creates a coordinate.
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Contents of one board square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    /// No disc.
    Empty,
    /// Disc owned by a player.
    Taken(Player),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_display_matches_the_variant_name() {
        assert_eq!(Player::Dark.to_string(), "Dark");
        assert_eq!(Player::Light.to_string(), "Light");
    }

    #[test]
    fn test_coord_displays_as_a_pair() {
        assert_eq!(Coord::new(2, 3).to_string(), "(2, 3)");
    }
}
