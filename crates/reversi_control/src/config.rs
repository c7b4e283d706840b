//! Controller configuration.

use reversi_core::Player;
use std::time::Duration;

/// Display names and replay pacing for a controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Display name for the dark side.
    pub dark_name: String,
    /// Display name for the light side.
    pub light_name: String,
    /// Delay before the first replay step.
    pub replay_start_delay: Duration,
    /// Delay between subsequent replay steps.
    pub replay_step_delay: Duration,
    /// Delay before a replay step requested through `next()`.
    pub next_delay: Duration,
}

impl ControllerConfig {
    /// Returns the configured display name for a player.
    pub fn player_name(&self, player: Player) -> &str {
        match player {
            Player::Dark => &self.dark_name,
            Player::Light => &self.light_name,
        }
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            dark_name: "Dark".to_string(),
            light_name: "Light".to_string(),
            replay_start_delay: Duration::from_secs(1),
            replay_step_delay: Duration::from_millis(500),
            next_delay: Duration::from_millis(500),
        }
    }
}
