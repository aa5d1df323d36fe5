//! Command-line entry point for self-play training runs.

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use serde_json::to_writer_pretty;

use crate::{
    adapters::MsgPackStore,
    app::{QLearningConfig, TrainerConfig},
    export::StatsCsvExporter,
    game::{Game, GameOutcome},
    pipeline::{BoardPrinter, ProgressObserver, Trainer},
    ports::{Agent, AgentStore},
    q_learning::TabularAgent,
};

#[derive(Parser, Debug)]
#[command(name = "gomoku-rl")]
#[command(version, about = "Self-play Q-learning on N-in-a-row grids", long_about = None)]
pub struct Args {
    /// Number of training episodes
    #[arg(long, default_value_t = 100)]
    pub episodes: usize,

    /// Render the board every N episodes
    #[arg(long, default_value_t = 100)]
    pub display_interval: usize,

    /// Flush running statistics every N episodes
    #[arg(long, default_value_t = 100)]
    pub stats_interval: usize,

    /// Board side length (3 for the classic game, 50 for five-in-a-row)
    #[arg(long, default_value_t = 3)]
    pub board_size: usize,

    /// Learning rate alpha
    #[arg(long, default_value_t = 0.1)]
    pub learning_rate: f64,

    /// Discount factor gamma
    #[arg(long, default_value_t = 0.9)]
    pub discount_factor: f64,

    /// Starting exploration rate
    #[arg(long, default_value_t = 1.0)]
    pub epsilon_start: f64,

    /// Ending exploration rate
    #[arg(long, default_value_t = 0.1)]
    pub epsilon_end: f64,

    /// Exploration rate decay per update
    #[arg(long, default_value_t = 0.9995)]
    pub epsilon_decay: f64,

    /// Random seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Run without board rendering or progress display
    #[arg(long)]
    pub headless: bool,

    /// Directory for persisted agent models
    #[arg(long, default_value = "data/models")]
    pub model_dir: PathBuf,

    /// Output CSV for the statistics series
    #[arg(long, default_value = "data/stats/training_stats.csv")]
    pub stats_out: PathBuf,

    /// Optional path for a JSON run summary
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Skip the greedy exhibition game after training
    #[arg(long)]
    pub no_demo: bool,
}

#[derive(Debug, Serialize)]
struct RunSummary {
    episodes: usize,
    board_size: usize,
    x_wins: usize,
    o_wins: usize,
    draws: usize,
    x_epsilon: f64,
    o_epsilon: f64,
    x_episode_count: u64,
    o_episode_count: u64,
    seed: Option<u64>,
}

fn restore_if_present(store: &MsgPackStore, agent: &mut TabularAgent, path: &Path) {
    if !path.exists() {
        return;
    }
    match store.load(agent, path) {
        Ok(()) => println!(
            "Restored agent state from {} ({} entries)",
            path.display(),
            agent.q_table().len()
        ),
        Err(err) => eprintln!(
            "warning: could not restore agent from {}, starting fresh: {err}",
            path.display()
        ),
    }
}

pub fn run(args: Args) -> Result<()> {
    std::fs::create_dir_all(&args.model_dir)
        .with_context(|| format!("Failed to create model dir {}", args.model_dir.display()))?;
    if let Some(parent) = args.stats_out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create stats dir {}", parent.display()))?;
    }

    let game = Game::new(args.board_size)?;
    let agent_config = QLearningConfig::default()
        .with_learning_rate(args.learning_rate)
        .with_discount_factor(args.discount_factor)
        .with_epsilon(args.epsilon_start, args.epsilon_end, args.epsilon_decay);

    let mut agent_x = TabularAgent::new(&agent_config)?;
    let mut agent_o = TabularAgent::new(&agent_config)?;
    if let Some(seed) = args.seed {
        agent_x = agent_x.with_seed(seed);
        agent_o = agent_o.with_seed(seed.wrapping_add(1));
    }

    let store = MsgPackStore::new();
    let x_path = args.model_dir.join("agent_x.msgpack");
    let o_path = args.model_dir.join("agent_o.msgpack");
    restore_if_present(&store, &mut agent_x, &x_path);
    restore_if_present(&store, &mut agent_o, &o_path);

    let trainer_config =
        TrainerConfig::new(args.episodes).with_stats_interval(args.stats_interval);
    let mut trainer = Trainer::new(
        game,
        Box::new(agent_x),
        Box::new(agent_o),
        trainer_config,
    );
    if !args.headless {
        trainer = trainer
            .with_observer(Box::new(ProgressObserver::new()))
            .with_observer(Box::new(BoardPrinter::new(args.display_interval)));
    }

    println!("Starting training for {} episodes...", args.episodes);
    trainer.train()?;

    if !args.headless && !args.no_demo {
        println!("Training completed. Playing an exhibition game...");
        let outcome = trainer.play_greedy_game()?;
        println!("{}", trainer.game().grid());
        match outcome {
            GameOutcome::Win(player) => println!("Game over! {player} wins!"),
            GameOutcome::Draw => println!("Game over! It's a draw!"),
        }
    }

    StatsCsvExporter::export(trainer.stats(), &args.stats_out)?;
    println!("Statistics saved to {}", args.stats_out.display());

    if let Some(summary_path) = &args.summary {
        let (x_wins, o_wins, draws) = trainer.totals();
        let summary = RunSummary {
            episodes: args.episodes,
            board_size: args.board_size,
            x_wins,
            o_wins,
            draws,
            x_epsilon: trainer.agent_x().epsilon(),
            o_epsilon: trainer.agent_o().epsilon(),
            x_episode_count: trainer.agent_x().episode_count(),
            o_episode_count: trainer.agent_o().episode_count(),
            seed: args.seed,
        };
        let file = File::create(summary_path)
            .with_context(|| format!("Failed to create summary {}", summary_path.display()))?;
        to_writer_pretty(file, &summary).context("Failed to write run summary")?;
    }

    let (agent_x, agent_o) = trainer.into_agents();
    store.save(agent_x.as_ref(), &x_path)?;
    store.save(agent_o.as_ref(), &o_path)?;

    Ok(())
}
