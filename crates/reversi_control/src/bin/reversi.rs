//! Headless scripted Reversi session.
//!
//! Exercises the controller end to end without a UI: plays a short
//! opening against the machine, optionally replays the recorded game,
//! and can round-trip the result through a JSON save file.

use anyhow::{Context, Result};
use clap::Parser;
use reversi_control::{
    Controller, ControllerConfig, ReversiEngine, SavedGame, ThreadScheduler, format_score,
};
use reversi_core::{Coord, Game};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Scripted Reversi session exercising the turn controller.
#[derive(Debug, Parser)]
#[command(name = "reversi", version, about)]
struct Cli {
    /// Board side length (even, 4..=16).
    #[arg(long, default_value_t = 8)]
    size: u8,

    /// Let the machine play Dark (it plays Light by default).
    #[arg(long)]
    machine_dark: bool,

    /// Replay the recorded game before exiting.
    #[arg(long)]
    replay: bool,

    /// Write the finished game as JSON to this path.
    #[arg(long)]
    save: Option<PathBuf>,

    /// Load a saved game from this path instead of playing the opening.
    #[arg(long)]
    load: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut game = Game::new(cli.size).context("invalid board size")?;
    if cli.machine_dark {
        game.switch_sides();
    }
    let config = ControllerConfig::default();
    let controller = Controller::new(
        ReversiEngine::from_game(game),
        config.clone(),
        |event| info!(?event, "dispatched"),
        Arc::new(ThreadScheduler),
    );

    if let Some(path) = &cli.load {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let saved: SavedGame = serde_json::from_str(&json).context("parsing saved game")?;
        info!(moves = saved.game.len(), "loading saved game");
        controller.load_game(saved);
        settle(&controller, |c| !c.state().working());
    } else if cli.machine_dark {
        // The machine opens; one reply is the whole script.
        controller.next();
        settle(&controller, |c| !c.state().ai_busy);
    } else {
        // Standard opening square for Dark on any even board.
        let half = cli.size / 2;
        controller.user_move(Coord::new(half - 2, half - 1));
        settle(&controller, |c| c.state().ai_busy);
        controller.next();
        settle(&controller, |c| !c.state().ai_busy);
    }

    info!(
        status = %controller.status_text(),
        score = %format_score(controller.score(), &config),
        "position reached"
    );

    if cli.replay {
        if controller.state().can_replay {
            controller.replay();
            info!(status = %controller.status_text(), "replaying");
            settle(&controller, |c| !c.state().replay);
            info!(
                score = %format_score(controller.score(), &config),
                "replay finished, position restored"
            );
        } else {
            warn!("nothing to replay");
        }
    }

    if let Some(path) = &cli.save {
        let saved = controller.save_game();
        let json = serde_json::to_string_pretty(&saved).context("serializing saved game")?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        info!(moves = saved.game.len(), path = %path.display(), "game saved");
    }

    controller.pump();
    controller.quit();
    Ok(())
}

/// Pumps events until `done` holds, giving up after ten seconds.
fn settle(controller: &Controller<ReversiEngine>, done: impl Fn(&Controller<ReversiEngine>) -> bool) {
    for _ in 0..500 {
        controller.pump();
        if done(controller) {
            return;
        }
        std::thread::sleep(Duration::from_millis(20));
    }
    warn!("timed out waiting for the controller to settle");
}
