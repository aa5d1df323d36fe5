//! Game state machine: turn order, move legality, terminal detection, and
//! reward assignment.

use serde::{Deserialize, Serialize};

use crate::{
    game::grid::Grid,
    types::{Coord, Player, StateKey},
};

/// A move recorded in the game history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordedMove {
    pub coord: Coord,
    pub player: Player,
}

/// Lifecycle state of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won(Player),
    Draw,
}

/// Outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Player),
    Draw,
}

/// Read view of the game, recomputed on every query.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub key: StateKey,
    pub current_player: Player,
    pub legal_moves: Vec<Coord>,
    pub terminal: bool,
    pub winner: Option<Player>,
    pub draw: bool,
}

/// Rules engine wrapping a [`Grid`].
///
/// Transitions from `InProgress` to `Won` or `Draw` on the move that produces
/// the terminal position. Terminal states are absorbing: further moves are
/// rejected with [`crate::Error::GameOver`].
#[derive(Debug, Clone)]
pub struct Game {
    grid: Grid,
    current_player: Player,
    winner: Option<Player>,
    draw: bool,
    move_history: Vec<RecordedMove>,
}

/// Reward for the winning seat.
pub const WIN_REWARD: f64 = 1.0;
/// Reward for the losing seat.
pub const LOSS_REWARD: f64 = -1.0;
/// Reward for either seat on a draw. Mildly positive: draws are a good
/// outcome for both seats under this shaping.
pub const DRAW_REWARD: f64 = 0.5;

impl Game {
    /// Create a fresh game on a grid of the given size, X to move.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidGridSize`] for sizes below 3.
    pub fn new(size: usize) -> Result<Self, crate::Error> {
        Ok(Game {
            grid: Grid::new(size)?,
            current_player: Player::X,
            winner: None,
            draw: false,
            move_history: Vec::new(),
        })
    }

    /// Reset to the initial state and return the resulting view.
    pub fn reset(&mut self) -> GameState {
        self.grid.reset();
        self.current_player = Player::X;
        self.winner = None;
        self.draw = false;
        self.move_history.clear();
        self.state()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn is_draw(&self) -> bool {
        self.draw
    }

    pub fn is_terminal(&self) -> bool {
        self.winner.is_some() || self.draw
    }

    pub fn status(&self) -> GameStatus {
        match self.winner {
            Some(player) => GameStatus::Won(player),
            None if self.draw => GameStatus::Draw,
            None => GameStatus::InProgress,
        }
    }

    /// Outcome of the game once terminal, `None` while in progress.
    pub fn outcome(&self) -> Option<GameOutcome> {
        match self.status() {
            GameStatus::Won(player) => Some(GameOutcome::Win(player)),
            GameStatus::Draw => Some(GameOutcome::Draw),
            GameStatus::InProgress => None,
        }
    }

    pub fn move_history(&self) -> &[RecordedMove] {
        &self.move_history
    }

    /// Apply the current player's move at the given coordinate.
    ///
    /// On success the move is recorded, the winner recomputed, and either the
    /// game transitions to a terminal state or the active player swaps.
    ///
    /// # Errors
    ///
    /// [`crate::Error::GameOver`] when the game is already terminal;
    /// [`crate::Error::IllegalMove`] when the grid rejects the coordinate.
    pub fn make_move(&mut self, coord: Coord) -> Result<GameState, crate::Error> {
        if self.is_terminal() {
            return Err(crate::Error::GameOver);
        }
        if !self.grid.apply_move(coord, self.current_player) {
            return Err(crate::Error::IllegalMove {
                row: coord.row,
                col: coord.col,
            });
        }

        self.move_history.push(RecordedMove {
            coord,
            player: self.current_player,
        });

        if let Some(winner) = self.grid.winner() {
            self.winner = Some(winner);
        } else if self.grid.is_full() {
            self.draw = true;
        } else {
            self.current_player = self.current_player.opponent();
        }

        Ok(self.state())
    }

    /// Reward for a seat given the current status: 0 while in progress,
    /// [`DRAW_REWARD`] for both seats on a draw, [`WIN_REWARD`] for the
    /// winner and [`LOSS_REWARD`] for the other seat.
    pub fn reward(&self, player: Player) -> f64 {
        match self.status() {
            GameStatus::InProgress => 0.0,
            GameStatus::Draw => DRAW_REWARD,
            GameStatus::Won(winner) if winner == player => WIN_REWARD,
            GameStatus::Won(_) => LOSS_REWARD,
        }
    }

    /// Compute the current state view.
    pub fn state(&self) -> GameState {
        GameState {
            key: self.grid.state_key(),
            current_player: self.current_player,
            legal_moves: self.grid.legal_moves(),
            terminal: self.is_terminal(),
            winner: self.winner,
            draw: self.draw,
        }
    }
}
