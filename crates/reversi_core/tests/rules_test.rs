//! Integration tests driving the rules crate through its public API.

use reversi_core::{Game, Player};

/// Plays the first legal move for whoever is to move until the game ends,
/// checking the turn-handover bookkeeping at every step.
fn play_out(game: &mut Game) -> usize {
    let capacity = usize::from(game.board().dim()).pow(2) - 4;
    let mut placements = 0;
    while !game.is_game_over() {
        let player = game.turn();
        let coord = game.board().legal_moves(player)[0];
        let outcome = game.replay_move(player, coord).unwrap();
        placements += 1;
        assert!(placements <= capacity, "game failed to terminate");
        match outcome.passed {
            Some(passed) => {
                assert_eq!(passed, player.opponent());
                assert_eq!(game.turn(), player);
            }
            None => {
                if !game.is_game_over() {
                    assert_eq!(game.turn(), player.opponent());
                }
            }
        }
    }
    placements
}

#[test]
fn test_games_terminate_on_every_board_size() {
    for dim in [4, 6, 8] {
        let mut game = Game::new(dim).unwrap();
        let placements = play_out(&mut game);
        assert!(game.is_game_over());
        assert!(placements >= 4, "a {dim}x{dim} game ended implausibly fast");
        let (dark, light) = game.score();
        assert_eq!(
            (dark + light) as usize,
            placements + 4,
            "every placement and the opening discs must be on the board"
        );
    }
}

#[test]
fn test_recorded_log_reproduces_the_game() {
    let mut game = Game::new(6).unwrap();
    play_out(&mut game);
    let log = game.log().to_vec();

    let mut replayed = Game::new(6).unwrap();
    replayed
        .load_log(&log, game.turn(), game.machine())
        .unwrap();
    assert_eq!(replayed.score(), game.score());
    assert_eq!(replayed.board().render(), game.board().render());
    assert_eq!(replayed.log(), game.log());
}

#[test]
fn test_undo_returns_to_each_earlier_position() {
    let mut game = Game::new(8).unwrap();
    let opening = game.board().render();

    game.user_move(game.board().legal_moves(Player::Dark)[0]).unwrap();
    game.machine_move().unwrap();
    let after_first_exchange = game.board().render();

    game.user_move(game.board().legal_moves(game.turn())[0]).unwrap();
    game.machine_move().unwrap();

    game.undo_turn().unwrap();
    assert_eq!(game.board().render(), after_first_exchange);
    game.undo_turn().unwrap();
    assert_eq!(game.board().render(), opening);
    assert!(!game.can_undo());
}

#[test]
fn test_game_state_survives_serialization() {
    let mut game = Game::new(8).unwrap();
    game.user_move(game.board().legal_moves(Player::Dark)[0]).unwrap();
    game.machine_move().unwrap();

    let encoded = serde_json::to_string(&game).unwrap();
    let decoded: Game = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, game);
}
