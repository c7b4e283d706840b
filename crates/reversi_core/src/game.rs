//! Game state: turn order, pass handling, move log, undo and snapshots.

use crate::board::Board;
use crate::error::MoveError;
use crate::types::{Coord, Player};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// What happened when a disc was placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Who placed the disc.
    pub player: Player,
    /// Where it was placed.
    pub placed: Coord,
    /// Discs flipped by the move.
    pub flipped: Vec<Coord>,
    /// A player who had to forfeit their reply, if any.
    pub passed: Option<Player>,
}

/// Position to return to when a user move is undone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct RestorePoint {
    board: Board,
    turn: Player,
    log_len: usize,
    last_move: Option<Coord>,
}

/// Opaque restorable copy of the complete game state.
#[derive(Debug, Clone)]
pub struct Snapshot(Game);

/// A Reversi game in progress.
///
/// Tracks the board, the player to move, which side the machine controls,
/// the move log and an undo stack with one entry per user move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    turn: Player,
    machine: Player,
    log: Vec<(Player, Coord)>,
    undo_stack: Vec<RestorePoint>,
    last_move: Option<Coord>,
}

impl Game {
    /// Creates a fresh game on a board of the given side length.
    ///
    /// Dark moves first; the machine plays Light until
    /// [`switch_sides`](Self::switch_sides) is called.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::BadDimension`] for an unsupported board size.
    #[instrument]
    pub fn new(dim: u8) -> Result<Self, MoveError> {
        Ok(Self {
            board: Board::new(dim)?,
            turn: Player::Dark,
            machine: Player::Light,
            log: Vec::new(),
            undo_stack: Vec::new(),
            last_move: None,
        })
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player to move.
    pub fn turn(&self) -> Player {
        self.turn
    }

    /// Returns the side the machine controls.
    pub fn machine(&self) -> Player {
        self.machine
    }

    /// Returns the move log in play order.
    pub fn log(&self) -> &[(Player, Coord)] {
        &self.log
    }

    /// Returns the most recently placed disc.
    pub fn last_move(&self) -> Option<Coord> {
        self.last_move
    }

    /// Checks whether any move has been played.
    pub fn is_new_game(&self) -> bool {
        self.log.is_empty()
    }

    /// Checks whether neither player can move.
    pub fn is_game_over(&self) -> bool {
        !self.board.has_move(Player::Dark) && !self.board.has_move(Player::Light)
    }

    /// Checks whether an undo point exists.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Counts discs as `(dark, light)`.
    pub fn score(&self) -> (u32, u32) {
        self.board.score()
    }

    /// Plays a move for the user side and records an undo point.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::OutOfTurn`] when it is the machine's turn, or
    /// the underlying placement error for an illegal square.
    #[instrument(skip(self), fields(turn = %self.turn))]
    pub fn user_move(&mut self, coord: Coord) -> Result<MoveOutcome, MoveError> {
        if self.turn == self.machine {
            return Err(MoveError::OutOfTurn { player: self.turn });
        }
        self.undo_stack.push(RestorePoint {
            board: self.board.clone(),
            turn: self.turn,
            log_len: self.log.len(),
            last_move: self.last_move,
        });
        match self.apply(self.turn, coord) {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                self.undo_stack.pop();
                Err(err)
            }
        }
    }

    /// Plays the machine's reply if it is the machine's turn.
    ///
    /// Picks the highest-weight legal move (most flips, corners preferred).
    /// Returns `None` without touching the game when it is not the
    /// machine's turn or no move exists.
    #[instrument(skip(self), fields(turn = %self.turn, machine = %self.machine))]
    pub fn machine_move(&mut self) -> Result<Option<MoveOutcome>, MoveError> {
        if self.turn != self.machine {
            debug!("not the machine's turn");
            return Ok(None);
        }
        let coord = match self.choose_move(self.machine) {
            Some(coord) => coord,
            None => return Ok(None),
        };
        self.apply(self.machine, coord).map(Some)
    }

    /// Replays a recorded move without recording an undo point.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::OutOfTurn`] when `player` is not the player to
    /// move, or the placement error for an illegal square.
    #[instrument(skip(self))]
    pub fn replay_move(&mut self, player: Player, coord: Coord) -> Result<MoveOutcome, MoveError> {
        self.apply(player, coord)
    }

    /// Resets to the opening position, keeping board size and machine side.
    #[instrument(skip(self))]
    pub fn new_game(&mut self) {
        self.board.reset();
        self.turn = Player::Dark;
        self.log.clear();
        self.undo_stack.clear();
        self.last_move = None;
    }

    /// Hands the machine the opposite side.
    #[instrument(skip(self), fields(machine = %self.machine))]
    pub fn switch_sides(&mut self) {
        self.machine = self.machine.opponent();
    }

    /// Returns to the position before the last user move.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::NothingToUndo`] when no undo point exists.
    #[instrument(skip(self))]
    pub fn undo_turn(&mut self) -> Result<(), MoveError> {
        let point = self.undo_stack.pop().ok_or(MoveError::NothingToUndo)?;
        debug!(log_len = point.log_len, "restoring undo point");
        self.board = point.board;
        self.turn = point.turn;
        self.log.truncate(point.log_len);
        self.last_move = point.last_move;
        Ok(())
    }

    /// Rebuilds the game from a recorded log.
    ///
    /// Replays every move on a fresh board, then adopts the given turn and
    /// machine side. The undo stack starts empty. `self` is untouched when
    /// any recorded move fails to apply.
    ///
    /// # Errors
    ///
    /// Returns the first placement error in the log.
    #[instrument(skip(self, log), fields(moves = log.len()))]
    pub fn load_log(
        &mut self,
        log: &[(Player, Coord)],
        turn: Player,
        machine: Player,
    ) -> Result<(), MoveError> {
        let mut fresh = Self::new(self.board.dim())?;
        for &(player, coord) in log {
            fresh.apply(player, coord)?;
        }
        fresh.turn = turn;
        fresh.machine = machine;
        *self = fresh;
        Ok(())
    }

    /// Captures a restorable copy of the game.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot(self.clone())
    }

    /// Writes a snapshot back over the game.
    #[instrument(skip(self, snapshot))]
    pub fn restore(&mut self, snapshot: Snapshot) {
        *self = snapshot.0;
    }

    /// Applies a move for `player`, advancing the turn with pass handling.
    ///
    /// The turn passes to the opponent unless they have no reply, in which
    /// case it stays with the mover and the outcome records the pass. When
    /// neither side can move the game is over and the turn value is moot.
    fn apply(&mut self, player: Player, coord: Coord) -> Result<MoveOutcome, MoveError> {
        if player != self.turn {
            return Err(MoveError::OutOfTurn { player });
        }
        let flipped = self.board.place(player, coord)?;
        self.log.push((player, coord));
        self.last_move = Some(coord);
        let opponent = player.opponent();
        let passed = if self.board.has_move(opponent) {
            self.turn = opponent;
            None
        } else if self.board.has_move(player) {
            debug!(player = %opponent, "no legal reply, turn stays");
            Some(opponent)
        } else {
            self.turn = opponent;
            None
        };
        Ok(MoveOutcome {
            player,
            placed: coord,
            flipped,
            passed,
        })
    }

    fn choose_move(&self, player: Player) -> Option<Coord> {
        let dim = usize::from(self.board.dim());
        let corner_bonus = dim * dim;
        let edge = self.board.dim() - 1;
        let mut best: Option<(usize, Coord)> = None;
        for coord in self.board.legal_moves(player) {
            let mut weight = self.board.captures(player, coord).len();
            if (coord.row == 0 || coord.row == edge) && (coord.col == 0 || coord.col == edge) {
                weight += corner_bonus;
            }
            if best.as_ref().is_none_or(|(w, _)| weight > *w) {
                best = Some((weight, coord));
            }
        }
        best.map(|(_, coord)| coord)
    }
}
