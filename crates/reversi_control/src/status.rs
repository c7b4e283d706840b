//! Status line derivation.
//!
//! Pure functions of a state snapshot plus a few engine reads, so any
//! thread holding a copied snapshot can format text without locking.

use crate::config::ControllerConfig;
use crate::state::DerivedState;
use reversi_core::Player;
use std::cmp::Ordering;

/// One-line description of what the game is doing right now.
pub fn status_line(
    state: DerivedState,
    turn: Player,
    machine: Player,
    score: (u32, u32),
    config: &ControllerConfig,
) -> String {
    if state.ai_busy {
        "Thinking...".to_string()
    } else if state.game_over && !state.replay {
        let winner = match score.0.cmp(&score.1) {
            Ordering::Greater => config.player_name(Player::Dark),
            Ordering::Less => config.player_name(Player::Light),
            Ordering::Equal => "Nobody",
        };
        format!("Game over: {winner} won.")
    } else if state.replay {
        "Click anywhere to cancel replay".to_string()
    } else {
        let who = if turn == machine { "Machine's" } else { "Your" };
        format!("{} turn ({})", who, config.player_name(turn))
    }
}

/// Formats a score as `Dark: n, Light: m` with the configured names.
pub fn format_score(score: (u32, u32), config: &ControllerConfig) -> String {
    format!(
        "{}: {}, {}: {}",
        config.player_name(Player::Dark),
        score.0,
        config.player_name(Player::Light),
        score.1
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ControllerConfig {
        ControllerConfig::default()
    }

    #[test]
    fn test_thinking_wins_over_everything() {
        let state = DerivedState {
            ai_busy: true,
            ..DerivedState::default()
        };
        let line = status_line(state, Player::Light, Player::Light, (2, 2), &config());
        assert_eq!(line, "Thinking...");
    }

    #[test]
    fn test_game_over_names_the_winner() {
        let state = DerivedState {
            game_over: true,
            ..DerivedState::default()
        };
        let line = status_line(state, Player::Dark, Player::Light, (11, 5), &config());
        assert_eq!(line, "Game over: Dark won.");
        let line = status_line(state, Player::Dark, Player::Light, (5, 11), &config());
        assert_eq!(line, "Game over: Light won.");
        let line = status_line(state, Player::Dark, Player::Light, (8, 8), &config());
        assert_eq!(line, "Game over: Nobody won.");
    }

    #[test]
    fn test_replay_invites_cancellation() {
        let state = DerivedState {
            replay: true,
            ..DerivedState::default()
        };
        let line = status_line(state, Player::Dark, Player::Light, (2, 2), &config());
        assert_eq!(line, "Click anywhere to cancel replay");
    }

    #[test]
    fn test_turn_line_distinguishes_machine_and_user() {
        let state = DerivedState::default();
        let line = status_line(state, Player::Dark, Player::Light, (2, 2), &config());
        assert_eq!(line, "Your turn (Dark)");
        let line = status_line(state, Player::Light, Player::Light, (2, 2), &config());
        assert_eq!(line, "Machine's turn (Light)");
    }

    #[test]
    fn test_format_score_uses_configured_names() {
        let config = ControllerConfig {
            dark_name: "Alice".to_string(),
            light_name: "Bob".to_string(),
            ..ControllerConfig::default()
        };
        assert_eq!(format_score((3, 4), &config), "Alice: 3, Bob: 4");
    }
}
