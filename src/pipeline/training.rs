//! Self-play training loop with delayed, intra-episode credit assignment.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use crate::{
    Result,
    app::TrainerConfig,
    env::Environment,
    game::{DRAW_REWARD, Game, GameOutcome, GameState, LOSS_REWARD, WIN_REWARD},
    pipeline::stats::{StatsRow, StatsSeries, TrainSnapshot},
    ports::{Agent, Observer},
    types::{Coord, Player},
};

/// Win/draw tallies accumulated since the last statistics flush.
#[derive(Debug, Clone, Copy, Default)]
struct RunningCounters {
    x_wins: usize,
    o_wins: usize,
    draws: usize,
}

impl RunningCounters {
    fn record(&mut self, outcome: GameOutcome) {
        match outcome {
            GameOutcome::Win(Player::X) => self.x_wins += 1,
            GameOutcome::Win(Player::O) => self.o_wins += 1,
            GameOutcome::Draw => self.draws += 1,
        }
    }
}

/// Drives self-play episodes between two agents and owns the resulting
/// statistics series.
///
/// Each seat records its own `(state, action)` trajectory during an episode;
/// learning happens in one pass per seat after the episode ends, with the
/// single terminal reward assigned to the final step and zero reward to all
/// earlier ones. The `next_state` of an intermediate step is the opposing
/// seat's following state view: each agent trains against the actual board
/// sequence it will face, not an idealized own-move transition.
pub struct Trainer {
    env: Environment,
    agent_x: Box<dyn Agent>,
    agent_o: Box<dyn Agent>,
    config: TrainerConfig,
    observers: Vec<Box<dyn Observer>>,
    stats: StatsSeries,
    running: RunningCounters,
    totals: RunningCounters,
    stop: Arc<AtomicBool>,
}

impl Trainer {
    pub fn new(
        game: Game,
        agent_x: Box<dyn Agent>,
        agent_o: Box<dyn Agent>,
        config: TrainerConfig,
    ) -> Self {
        Self {
            env: Environment::new(game),
            agent_x,
            agent_o,
            config,
            observers: Vec::new(),
            stats: StatsSeries::new(),
            running: RunningCounters::default(),
            totals: RunningCounters::default(),
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Add an observer to the run.
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Handle for requesting a cooperative stop. Checked between episodes;
    /// an aborted run keeps whatever statistics and table state exist at
    /// that point.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    pub fn game(&self) -> &Game {
        self.env.game()
    }

    pub fn stats(&self) -> &StatsSeries {
        &self.stats
    }

    /// Lifetime win/draw totals as (x_wins, o_wins, draws).
    pub fn totals(&self) -> (usize, usize, usize) {
        (self.totals.x_wins, self.totals.o_wins, self.totals.draws)
    }

    pub fn agent_x(&self) -> &dyn Agent {
        self.agent_x.as_ref()
    }

    pub fn agent_o(&self) -> &dyn Agent {
        self.agent_o.as_ref()
    }

    /// Read-only view for external collaborators.
    pub fn snapshot(&self) -> TrainSnapshot<'_> {
        TrainSnapshot {
            game: self.env.game(),
            stats: &self.stats,
        }
    }

    /// Reclaim the agents, e.g. for persistence after training.
    pub fn into_agents(self) -> (Box<dyn Agent>, Box<dyn Agent>) {
        (self.agent_x, self.agent_o)
    }

    /// Run the configured number of episodes.
    pub fn train(&mut self) -> Result<()> {
        let interval = self.config.stats_interval.max(1);

        for observer in &mut self.observers {
            observer.on_training_start(self.config.episodes)?;
        }

        for episode in 1..=self.config.episodes {
            if self.stop.load(Ordering::Relaxed) {
                break;
            }

            let (outcome, steps) = self.run_episode()?;
            self.running.record(outcome);
            self.totals.record(outcome);

            for observer in &mut self.observers {
                observer.on_episode_end(episode, outcome, steps)?;
            }

            if episode.is_multiple_of(interval) {
                let row = StatsRow {
                    episode,
                    x_wins: self.running.x_wins,
                    o_wins: self.running.o_wins,
                    draws: self.running.draws,
                    game_length: steps,
                    x_epsilon: self.agent_x.epsilon(),
                    o_epsilon: self.agent_o.epsilon(),
                };
                self.stats.push(row);
                self.running = RunningCounters::default();

                let snapshot = TrainSnapshot {
                    game: self.env.game(),
                    stats: &self.stats,
                };
                for observer in &mut self.observers {
                    observer.on_stats_flush(&row, &snapshot)?;
                }
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        Ok(())
    }

    /// Play one episode, then run both seats' learning passes.
    fn run_episode(&mut self) -> Result<(GameOutcome, usize)> {
        let mut state = self.env.reset();
        let mut x_trajectory: Vec<(GameState, Coord)> = Vec::new();
        let mut o_trajectory: Vec<(GameState, Coord)> = Vec::new();
        let mut steps = 0;

        loop {
            let seat = state.current_player;
            let agent = match seat {
                Player::X => self.agent_x.as_mut(),
                Player::O => self.agent_o.as_mut(),
            };
            let action = agent.act_training(&state)?;

            match seat {
                Player::X => x_trajectory.push((state.clone(), action)),
                Player::O => o_trajectory.push((state.clone(), action)),
            }

            // Step rewards are not consumed here: credit is assigned once,
            // after the episode, from the terminal outcome.
            let (next_state, _reward, done) = self.env.step(action, seat)?;
            steps += 1;
            state = next_state;

            if done {
                break;
            }
        }

        let outcome = match state.winner {
            Some(winner) => GameOutcome::Win(winner),
            None => GameOutcome::Draw,
        };
        let (x_reward, o_reward) = match outcome {
            GameOutcome::Win(Player::X) => (WIN_REWARD, LOSS_REWARD),
            GameOutcome::Win(Player::O) => (LOSS_REWARD, WIN_REWARD),
            GameOutcome::Draw => (DRAW_REWARD, DRAW_REWARD),
        };
        let final_state = self.env.game().state();

        for i in 0..x_trajectory.len() {
            let (state_i, action_i) = &x_trajectory[i];
            let (reward_i, next_i) = if i + 1 == x_trajectory.len() {
                (x_reward, &final_state)
            } else {
                (0.0, &o_trajectory[i].0)
            };
            self.agent_x.learn(state_i, *action_i, reward_i, next_i)?;
        }

        for i in 0..o_trajectory.len() {
            let (state_i, action_i) = &o_trajectory[i];
            let (reward_i, next_i) = if i + 1 == o_trajectory.len() {
                (o_reward, &final_state)
            } else {
                (0.0, &x_trajectory[i + 1].0)
            };
            self.agent_o.learn(state_i, *action_i, reward_i, next_i)?;
        }

        self.agent_x.increment_episode();
        self.agent_o.increment_episode();

        Ok((outcome, steps))
    }

    /// Play one exhibition game with both seats acting greedily. No learning
    /// updates are applied and no statistics are recorded.
    pub fn play_greedy_game(&mut self) -> Result<GameOutcome> {
        let mut state = self.env.reset();

        loop {
            let seat = state.current_player;
            let agent = match seat {
                Player::X => self.agent_x.as_mut(),
                Player::O => self.agent_o.as_mut(),
            };
            let action = agent.act_greedy(&state)?;
            let (next_state, _reward, done) = self.env.step(action, seat)?;
            state = next_state;

            if done {
                break;
            }
        }

        Ok(match state.winner {
            Some(winner) => GameOutcome::Win(winner),
            None => GameOutcome::Draw,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{app::QLearningConfig, q_learning::TabularAgent};

    fn seeded_trainer(episodes: usize, stats_interval: usize, seed: u64) -> Trainer {
        let config = QLearningConfig::default().with_epsilon(1.0, 0.1, 0.99);
        let agent_x = TabularAgent::new(&config).unwrap().with_seed(seed);
        let agent_o = TabularAgent::new(&config).unwrap().with_seed(seed + 1);
        Trainer::new(
            Game::new(3).unwrap(),
            Box::new(agent_x),
            Box::new(agent_o),
            TrainerConfig::new(episodes).with_stats_interval(stats_interval),
        )
    }

    #[test]
    fn test_episodes_all_terminate() {
        let mut trainer = seeded_trainer(20, 5, 7);
        trainer.train().unwrap();

        let (x, o, d) = trainer.totals();
        assert_eq!(x + o + d, 20);
        assert_eq!(trainer.stats().len(), 4);
        for row in trainer.stats().rows() {
            assert!(row.game_length >= 5 && row.game_length <= 9);
            assert_eq!(row.x_wins + row.o_wins + row.draws, 5);
        }
    }

    #[test]
    fn test_flush_counts_are_per_interval() {
        let mut trainer = seeded_trainer(10, 10, 3);
        trainer.train().unwrap();

        assert_eq!(trainer.stats().len(), 1);
        let row = trainer.stats().last().unwrap();
        assert_eq!(row.episode, 10);
        assert_eq!(row.x_wins + row.o_wins + row.draws, 10);
    }

    #[test]
    fn test_agents_learn_and_count_episodes() {
        let mut trainer = seeded_trainer(5, 100, 11);
        trainer.train().unwrap();

        assert_eq!(trainer.agent_x().episode_count(), 5);
        assert_eq!(trainer.agent_o().episode_count(), 5);
        assert!(trainer.agent_x().epsilon() < 1.0);

        // No flush happened: 5 episodes < interval 100.
        assert!(trainer.stats().is_empty());
    }

    #[test]
    fn test_stop_handle_aborts_between_episodes() {
        let mut trainer = seeded_trainer(1000, 10, 13);
        trainer.stop_handle().store(true, Ordering::Relaxed);
        trainer.train().unwrap();

        let (x, o, d) = trainer.totals();
        assert_eq!(x + o + d, 0);
    }

    #[test]
    fn test_greedy_game_applies_no_learning() {
        let mut trainer = seeded_trainer(3, 100, 17);
        trainer.train().unwrap();

        let epsilon_before = trainer.agent_x().epsilon();
        let episodes_before = trainer.agent_x().episode_count();
        trainer.play_greedy_game().unwrap();

        assert_eq!(trainer.agent_x().epsilon(), epsilon_before);
        assert_eq!(trainer.agent_x().episode_count(), episodes_before);
    }

    #[test]
    fn test_snapshot_exposes_game_and_stats() {
        let mut trainer = seeded_trainer(10, 5, 19);
        trainer.train().unwrap();

        let snapshot = trainer.snapshot();
        assert_eq!(snapshot.stats.len(), 2);
        assert!(snapshot.game.is_terminal());
    }
}
