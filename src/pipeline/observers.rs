//! Observers for self-play training runs.
//!
//! Observers consume read-only training snapshots without coupling the loop
//! to specific output formats.

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    Result,
    game::GameOutcome,
    pipeline::stats::{StatsRow, TrainSnapshot},
    ports::Observer,
    types::Player,
};

/// Progress bar observer - shows episode progress and outcome tallies.
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    x_wins: usize,
    o_wins: usize,
    draws: usize,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            x_wins: 0,
            o_wins: 0,
            draws: 0,
        }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes (X:{msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, outcome: GameOutcome, _steps: usize) -> Result<()> {
        match outcome {
            GameOutcome::Win(Player::X) => self.x_wins += 1,
            GameOutcome::Win(Player::O) => self.o_wins += 1,
            GameOutcome::Draw => self.draws += 1,
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(episode as u64);
            pb.set_message(format!("{} O:{} D:{}", self.x_wins, self.o_wins, self.draws));
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(format!(
                "{} O:{} D:{}",
                self.x_wins, self.o_wins, self.draws
            ));
        }
        Ok(())
    }
}

/// Terminal renderer - prints the board and the flushed statistics row at a
/// configurable cadence.
pub struct BoardPrinter {
    display_interval: usize,
}

impl BoardPrinter {
    /// Print at every flush whose episode is a multiple of
    /// `display_interval`.
    pub fn new(display_interval: usize) -> Self {
        Self {
            display_interval: display_interval.max(1),
        }
    }
}

impl Observer for BoardPrinter {
    fn on_stats_flush(&mut self, row: &StatsRow, snapshot: &TrainSnapshot<'_>) -> Result<()> {
        if !row.episode.is_multiple_of(self.display_interval) {
            return Ok(());
        }

        println!(
            "Episode {} - X: {}, O: {}, Draw: {}, Steps: {}, X eps: {:.3}, O eps: {:.3}",
            row.episode,
            row.x_wins,
            row.o_wins,
            row.draws,
            row.game_length,
            row.x_epsilon,
            row.o_epsilon,
        );
        println!("{}", snapshot.game.grid());
        Ok(())
    }
}

/// Metrics observer - accumulates outcome tallies for programmatic use.
pub struct MetricsObserver {
    x_wins: usize,
    o_wins: usize,
    draws: usize,
    episodes: usize,
    move_counts: Vec<usize>,
}

impl MetricsObserver {
    pub fn new() -> Self {
        Self {
            x_wins: 0,
            o_wins: 0,
            draws: 0,
            episodes: 0,
            move_counts: Vec::new(),
        }
    }

    pub fn episodes(&self) -> usize {
        self.episodes
    }

    pub fn draw_rate(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.draws as f64 / self.episodes as f64
        }
    }

    pub fn average_game_length(&self) -> f64 {
        if self.move_counts.is_empty() {
            0.0
        } else {
            self.move_counts.iter().sum::<usize>() as f64 / self.move_counts.len() as f64
        }
    }

    pub fn tallies(&self) -> (usize, usize, usize) {
        (self.x_wins, self.o_wins, self.draws)
    }
}

impl Default for MetricsObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for MetricsObserver {
    fn on_episode_end(&mut self, _episode: usize, outcome: GameOutcome, steps: usize) -> Result<()> {
        match outcome {
            GameOutcome::Win(Player::X) => self.x_wins += 1,
            GameOutcome::Win(Player::O) => self.o_wins += 1,
            GameOutcome::Draw => self.draws += 1,
        }
        self.episodes += 1;
        self.move_counts.push(steps);
        Ok(())
    }
}
