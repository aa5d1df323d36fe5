//! Observer port - abstraction for training observation.
//!
//! Observers consume read-only snapshots of the training run (board
//! contents, outcome tallies, the statistics series) and produce nothing the
//! trainer depends on. A run with no observers attached yields bit-identical
//! statistics to an observed run for the same seeds.

use crate::{
    Result,
    game::GameOutcome,
    pipeline::stats::{StatsRow, TrainSnapshot},
};

/// Observer of a self-play training run.
///
/// # Event Sequence
///
/// 1. `on_training_start(total_episodes)` - once at the beginning
/// 2. Per episode: `on_episode_end(episode, outcome, steps)`
/// 3. Per statistics flush: `on_stats_flush(row, snapshot)`
/// 4. `on_training_end()` - once at the end
pub trait Observer: Send {
    /// Called when training starts.
    ///
    /// # Default Implementation
    ///
    /// Does nothing. Override to initialize observation state.
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called after each episode with its outcome and move count.
    ///
    /// # Default Implementation
    ///
    /// Does nothing. Override to record outcomes.
    fn on_episode_end(&mut self, _episode: usize, _outcome: GameOutcome, _steps: usize) -> Result<()> {
        Ok(())
    }

    /// Called when the running counters are flushed into the statistics
    /// series. The snapshot exposes the current game and the series so far.
    ///
    /// # Default Implementation
    ///
    /// Does nothing. Override to render or export progress.
    fn on_stats_flush(&mut self, _row: &StatsRow, _snapshot: &TrainSnapshot<'_>) -> Result<()> {
        Ok(())
    }

    /// Called when training completes or is stopped.
    ///
    /// # Default Implementation
    ///
    /// Does nothing. Override to finalize outputs.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
