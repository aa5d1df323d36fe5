//! Self-play tabular Q-learning on N-in-a-row grids.
//!
//! This crate provides:
//! - Grid game rules for classic 3x3 tic-tac-toe and larger five-in-a-row
//!   boards, with win detection and state-key encoding
//! - A step/reset environment adapter that absorbs illegal exploration as a
//!   penalty signal
//! - Tabular Q-learning agents with epsilon-greedy exploration
//! - A self-play trainer with delayed end-of-episode credit assignment
//! - Agent persistence, CSV statistics export, and training observers

pub mod adapters;
pub mod app;
pub mod cli;
pub mod env;
pub mod error;
pub mod export;
pub mod game;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod types;

pub use env::Environment;
pub use error::{Error, Result};
pub use game::{Game, GameOutcome, GameState, GameStatus, Grid, WinRule};
pub use pipeline::{StatsRow, StatsSeries, Trainer};
pub use q_learning::TabularAgent;
pub use types::{Cell, Coord, Player, StateKey};
