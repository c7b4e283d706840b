//! Turn coordination for a two-player board game.
//!
//! This crate keeps a UI thread responsive while every game mutation is
//! serialized through one background worker: moves, undo, side switch and
//! move-log replay all flow through a dual-direction message queue, and a
//! controller on top derives the permission flags the UI binds its
//! buttons to.
//!
//! The game rules live behind the [`Engine`] trait; [`ReversiEngine`]
//! adapts the rules in [`reversi_core`].
//!
//! # Example
//!
//! ```
//! use reversi_control::{Controller, ControllerConfig, ReversiEngine, ThreadScheduler};
//! use reversi_core::Coord;
//! use std::sync::Arc;
//!
//! # fn example() -> Result<(), reversi_control::EngineError> {
//! let controller = Controller::new(
//!     ReversiEngine::new(8)?,
//!     ControllerConfig::default(),
//!     |event| println!("{event:?}"),
//!     Arc::new(ThreadScheduler),
//! );
//!
//! controller.user_move(Coord::new(2, 3));
//! // ...on a periodic UI tick:
//! controller.pump();
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod controller;
mod engine;
mod error;
mod events;
mod persist;
mod scheduler;
mod state;
mod status;
mod worker;

pub use config::ControllerConfig;
pub use controller::Controller;
pub use engine::{Engine, ReversiEngine};
pub use error::EngineError;
pub use events::{Event, UiEvent};
pub use persist::SavedGame;
pub use scheduler::{Scheduler, ThreadScheduler};
pub use state::DerivedState;
pub use status::{format_score, status_line};
pub use worker::{Job, JobKind, Worker};
