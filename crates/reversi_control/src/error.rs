//! Engine error type surfaced through failure events.

use derive_more::{Display, Error};
use tracing::instrument;

/// Engine failure with location tracking.
///
/// Raised by engine operations for conditions a fresh derived state cannot
/// absorb, such as a corrupt move log. The worker converts it into an
/// outbound [`Event::Failed`](crate::Event::Failed) and keeps running.
#[derive(Debug, Clone, Display, Error)]
#[display("engine error: {} at {}:{}", message, file, line)]
pub struct EngineError {
    /// Error message.
    pub message: String,
    /// Line number where the error was raised.
    pub line: u32,
    /// Source file where the error was raised.
    pub file: &'static str,
}

impl EngineError {
    /// Creates a new engine error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<reversi_core::MoveError> for EngineError {
    #[track_caller]
    fn from(err: reversi_core::MoveError) -> Self {
        Self::new(err.to_string())
    }
}
