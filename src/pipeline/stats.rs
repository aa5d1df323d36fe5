//! Training statistics time series.

use serde::{Deserialize, Serialize};

use crate::game::Game;

/// One flushed block of training statistics.
///
/// Counts cover the episodes since the previous flush, not cumulative
/// totals. `game_length` is the move count of the episode that triggered the
/// flush; the epsilons are both seats' exploration rates at flush time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatsRow {
    pub episode: usize,
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
    pub game_length: usize,
    pub x_epsilon: f64,
    pub o_epsilon: f64,
}

/// Append-only, ordered series of flushed statistics rows, owned by the
/// trainer for the life of a training run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsSeries {
    rows: Vec<StatsRow>,
}

impl StatsSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, row: StatsRow) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[StatsRow] {
        &self.rows
    }

    pub fn last(&self) -> Option<&StatsRow> {
        self.rows.last()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Read-only view of a training run, polled by external collaborators
/// (renderer, statistics display) once per displayed frame or flush.
#[derive(Debug, Clone, Copy)]
pub struct TrainSnapshot<'a> {
    pub game: &'a Game,
    pub stats: &'a StatsSeries,
}
