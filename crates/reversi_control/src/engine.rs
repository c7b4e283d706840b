//! The engine seam between the controller and the game rules.

use crate::error::EngineError;
use crate::events::Event;
use reversi_core::{Coord, Game, Player};
use tracing::debug;

/// Game capability the controller serializes mutations against.
///
/// Mutating operations return the events describing what they changed; the
/// worker posts them on the outbound queue. Read operations are cheap and
/// run under a short-lived lock on any thread.
pub trait Engine: Send + 'static {
    /// Restorable copy of the complete engine state.
    type Snapshot: Send + 'static;

    /// Applies a move for the human side.
    fn user_move(&mut self, coord: Coord) -> Result<Vec<Event>, EngineError>;

    /// Plays the machine's reply if it is the machine's turn.
    fn machine_move(&mut self) -> Result<Vec<Event>, EngineError>;

    /// Resets to the opening position.
    fn new_game(&mut self) -> Result<Vec<Event>, EngineError>;

    /// Hands the machine the opposite side.
    fn switch_sides(&mut self) -> Result<Vec<Event>, EngineError>;

    /// Returns to the position before the last user move.
    fn undo_turn(&mut self) -> Result<Vec<Event>, EngineError>;

    /// Applies a recorded move without recording an undo point.
    fn replay_move(&mut self, player: Player, coord: Coord) -> Result<(), EngineError>;

    /// Rebuilds the game from a recorded move log.
    fn load_log(
        &mut self,
        log: &[(Player, Coord)],
        turn: Player,
        machine: Player,
    ) -> Result<Vec<Event>, EngineError>;

    /// Captures a restorable copy of the engine.
    fn snapshot(&self) -> Self::Snapshot;

    /// Writes a snapshot back over the engine.
    fn restore(&mut self, snapshot: Self::Snapshot);

    /// Returns the player to move.
    fn turn(&self) -> Player;

    /// Returns the side the machine controls.
    fn machine(&self) -> Player;

    /// Checks whether neither player can move.
    fn is_game_over(&self) -> bool;

    /// Checks whether any move has been played.
    fn is_new_game(&self) -> bool;

    /// Checks whether an undo point exists.
    fn can_undo(&self) -> bool;

    /// Counts discs as `(dark, light)`.
    fn score(&self) -> (u32, u32);

    /// Returns the move log in play order.
    fn play_log(&self) -> Vec<(Player, Coord)>;

    /// Returns the owner of a square, if any.
    fn owner(&self, coord: Coord) -> Option<Player>;

    /// Returns the most recently placed disc.
    fn last_move(&self) -> Option<Coord>;

    /// Returns the board side length.
    fn board_size(&self) -> u8;
}

/// [`Engine`] adapter over the pure rules in [`reversi_core`].
#[derive(Debug, Clone)]
pub struct ReversiEngine {
    game: Game,
}

impl ReversiEngine {
    /// Creates an engine with a fresh game of the given board size.
    ///
    /// # Errors
    ///
    /// Returns an error for an unsupported board dimension.
    pub fn new(dim: u8) -> Result<Self, EngineError> {
        Ok(Self {
            game: Game::new(dim)?,
        })
    }

    /// Wraps an existing game, preserving its position and machine side.
    pub fn from_game(game: Game) -> Self {
        Self { game }
    }
}

/// A forced pass becomes a [`Event::CannotMove`] announcement.
fn pass_events(passed: Option<Player>) -> Vec<Event> {
    passed.map(Event::CannotMove).into_iter().collect()
}

impl Engine for ReversiEngine {
    type Snapshot = reversi_core::Snapshot;

    fn user_move(&mut self, coord: Coord) -> Result<Vec<Event>, EngineError> {
        // An illegal square or an off-turn click is routine input, not a
        // failure; the refresh that follows republishes the unchanged state.
        match self.game.user_move(coord) {
            Ok(outcome) => Ok(pass_events(outcome.passed)),
            Err(err) => {
                debug!(%err, %coord, "user move rejected");
                Ok(Vec::new())
            }
        }
    }

    fn machine_move(&mut self) -> Result<Vec<Event>, EngineError> {
        match self.game.machine_move()? {
            Some(outcome) => Ok(pass_events(outcome.passed)),
            None => Ok(Vec::new()),
        }
    }

    fn new_game(&mut self) -> Result<Vec<Event>, EngineError> {
        self.game.new_game();
        Ok(vec![Event::Ready])
    }

    fn switch_sides(&mut self) -> Result<Vec<Event>, EngineError> {
        self.game.switch_sides();
        Ok(Vec::new())
    }

    fn undo_turn(&mut self) -> Result<Vec<Event>, EngineError> {
        self.game.undo_turn()?;
        Ok(Vec::new())
    }

    fn replay_move(&mut self, player: Player, coord: Coord) -> Result<(), EngineError> {
        self.game.replay_move(player, coord)?;
        Ok(())
    }

    fn load_log(
        &mut self,
        log: &[(Player, Coord)],
        turn: Player,
        machine: Player,
    ) -> Result<Vec<Event>, EngineError> {
        self.game.load_log(log, turn, machine)?;
        Ok(vec![Event::Ready])
    }

    fn snapshot(&self) -> Self::Snapshot {
        self.game.snapshot()
    }

    fn restore(&mut self, snapshot: Self::Snapshot) {
        self.game.restore(snapshot);
    }

    fn turn(&self) -> Player {
        self.game.turn()
    }

    fn machine(&self) -> Player {
        self.game.machine()
    }

    fn is_game_over(&self) -> bool {
        self.game.is_game_over()
    }

    fn is_new_game(&self) -> bool {
        self.game.is_new_game()
    }

    fn can_undo(&self) -> bool {
        self.game.can_undo()
    }

    fn score(&self) -> (u32, u32) {
        self.game.score()
    }

    fn play_log(&self) -> Vec<(Player, Coord)> {
        self.game.log().to_vec()
    }

    fn owner(&self, coord: Coord) -> Option<Player> {
        self.game.board().owner(coord)
    }

    fn last_move(&self) -> Option<Coord> {
        self.game.last_move()
    }

    fn board_size(&self) -> u8 {
        self.game.board().dim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_illegal_user_move_is_a_benign_noop() {
        let mut engine = ReversiEngine::new(8).unwrap();
        let events = engine.user_move(Coord::new(0, 0)).unwrap();
        assert!(events.is_empty());
        assert!(!engine.can_undo());
        assert!(engine.is_new_game());
    }

    #[test]
    fn test_new_game_announces_ready() {
        let mut engine = ReversiEngine::new(8).unwrap();
        engine.user_move(Coord::new(2, 3)).unwrap();
        assert_eq!(engine.new_game().unwrap(), vec![Event::Ready]);
        assert!(engine.is_new_game());
    }

    #[test]
    fn test_undo_with_empty_stack_is_an_error() {
        let mut engine = ReversiEngine::new(8).unwrap();
        assert!(engine.undo_turn().is_err());
    }

    #[test]
    fn test_load_log_announces_ready() {
        let mut engine = ReversiEngine::new(8).unwrap();
        let log = vec![(Player::Dark, Coord::new(2, 3))];
        let events = engine.load_log(&log, Player::Light, Player::Light).unwrap();
        assert_eq!(events, vec![Event::Ready]);
        assert_eq!(engine.play_log(), log);
        assert_eq!(engine.machine(), Player::Light);
    }
}
