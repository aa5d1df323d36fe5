//! N-in-a-row game rules and board representation.

pub mod grid;
pub mod rules;

pub use grid::{Grid, WIN_RUN_LENGTH, WinRule};
pub use rules::{
    DRAW_REWARD, Game, GameOutcome, GameState, GameStatus, LOSS_REWARD, RecordedMove, WIN_REWARD,
};
