//! Board representation and line-capture rules.

use crate::error::MoveError;
use crate::types::{Cell, Coord, Player};
use serde::{Deserialize, Serialize};

/// The eight compass directions a capture line can run in.
const DIRECTIONS: [(i16, i16); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Square Reversi board with the standard four-disc opening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Side length.
    dim: u8,
    /// Squares in row-major order.
    cells: Vec<Cell>,
}

impl Board {
    /// Creates a board of the given side length with the opening position.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::BadDimension`] unless `dim` is an even number
    /// between 4 and 16.
    pub fn new(dim: u8) -> Result<Self, MoveError> {
        if !(4..=16).contains(&dim) || dim % 2 != 0 {
            return Err(MoveError::BadDimension { dim });
        }
        let mut board = Self {
            dim,
            cells: vec![Cell::Empty; usize::from(dim) * usize::from(dim)],
        };
        board.reset();
        Ok(board)
    }

    /// Clears the board back to the four-disc opening position.
    pub fn reset(&mut self) {
        self.cells.fill(Cell::Empty);
        let half = self.dim / 2;
        self.set(Coord::new(half - 1, half - 1), Cell::Taken(Player::Light));
        self.set(Coord::new(half - 1, half), Cell::Taken(Player::Dark));
        self.set(Coord::new(half, half - 1), Cell::Taken(Player::Dark));
        self.set(Coord::new(half, half), Cell::Taken(Player::Light));
    }

    /// Returns the side length.
    pub fn dim(&self) -> u8 {
        self.dim
    }

    fn index(&self, coord: Coord) -> usize {
        usize::from(coord.row) * usize::from(self.dim) + usize::from(coord.col)
    }

    fn in_bounds(&self, coord: Coord) -> bool {
        coord.row < self.dim && coord.col < self.dim
    }

    fn set(&mut self, coord: Coord, cell: Cell) {
        let index = self.index(coord);
        self.cells[index] = cell;
    }

    /// Gets the cell at the given coordinate, if on the board.
    pub fn get(&self, coord: Coord) -> Option<Cell> {
        self.in_bounds(coord).then(|| self.cells[self.index(coord)])
    }

    /// Returns who holds the square, if anyone.
    pub fn owner(&self, coord: Coord) -> Option<Player> {
        match self.get(coord) {
            Some(Cell::Taken(player)) => Some(player),
            _ => None,
        }
    }

    /// Collects every disc a move by `player` at `coord` would flip.
    ///
    /// Empty when the square is occupied, off the board, or flanks nothing.
    pub fn captures(&self, player: Player, coord: Coord) -> Vec<Coord> {
        let mut flipped = Vec::new();
        if self.get(coord) != Some(Cell::Empty) {
            return flipped;
        }
        for (dr, dc) in DIRECTIONS {
            let mut run = Vec::new();
            let mut row = i16::from(coord.row) + dr;
            let mut col = i16::from(coord.col) + dc;
            loop {
                if row < 0 || col < 0 || row >= i16::from(self.dim) || col >= i16::from(self.dim) {
                    run.clear();
                    break;
                }
                let next = Coord::new(row as u8, col as u8);
                match self.cells[self.index(next)] {
                    Cell::Taken(p) if p == player.opponent() => run.push(next),
                    Cell::Taken(_) => break,
                    Cell::Empty => {
                        run.clear();
                        break;
                    }
                }
                row += dr;
                col += dc;
            }
            flipped.extend(run);
        }
        flipped
    }

    /// Checks whether `player` may legally move at `coord`.
    pub fn is_legal(&self, player: Player, coord: Coord) -> bool {
        !self.captures(player, coord).is_empty()
    }

    /// Lists every legal move for `player` in row-major order.
    pub fn legal_moves(&self, player: Player) -> Vec<Coord> {
        let mut moves = Vec::new();
        for row in 0..self.dim {
            for col in 0..self.dim {
                let coord = Coord::new(row, col);
                if self.is_legal(player, coord) {
                    moves.push(coord);
                }
            }
        }
        moves
    }

    /// Checks whether `player` has at least one legal move.
    pub fn has_move(&self, player: Player) -> bool {
        for row in 0..self.dim {
            for col in 0..self.dim {
                if self.is_legal(player, Coord::new(row, col)) {
                    return true;
                }
            }
        }
        false
    }

    /// Places a disc for `player` at `coord` and flips the captured line(s).
    ///
    /// Returns the flipped coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::OutOfBounds`], [`MoveError::Occupied`] or
    /// [`MoveError::NoCapture`] when the move is not legal.
    pub fn place(&mut self, player: Player, coord: Coord) -> Result<Vec<Coord>, MoveError> {
        if !self.in_bounds(coord) {
            return Err(MoveError::OutOfBounds {
                row: coord.row,
                col: coord.col,
            });
        }
        if self.cells[self.index(coord)] != Cell::Empty {
            return Err(MoveError::Occupied {
                row: coord.row,
                col: coord.col,
            });
        }
        let flipped = self.captures(player, coord);
        if flipped.is_empty() {
            return Err(MoveError::NoCapture {
                row: coord.row,
                col: coord.col,
            });
        }
        self.set(coord, Cell::Taken(player));
        for &flip in &flipped {
            self.set(flip, Cell::Taken(player));
        }
        Ok(flipped)
    }

    /// Counts discs as `(dark, light)`.
    pub fn score(&self) -> (u32, u32) {
        let mut dark = 0;
        let mut light = 0;
        for cell in &self.cells {
            match cell {
                Cell::Taken(Player::Dark) => dark += 1,
                Cell::Taken(Player::Light) => light += 1,
                Cell::Empty => {}
            }
        }
        (dark, light)
    }

    /// Formats the board as a human-readable grid.
    pub fn render(&self) -> String {
        let mut result = String::new();
        for row in 0..self.dim {
            for col in 0..self.dim {
                let symbol = match self.cells[self.index(Coord::new(row, col))] {
                    Cell::Empty => '.',
                    Cell::Taken(Player::Dark) => 'D',
                    Cell::Taken(Player::Light) => 'L',
                };
                result.push(symbol);
                if col + 1 < self.dim {
                    result.push(' ');
                }
            }
            if row + 1 < self.dim {
                result.push('\n');
            }
        }
        result
    }
}
