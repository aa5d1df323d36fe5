//! Self-play training binary.
//!
//! Wires configuration and file paths, trains two tabular agents against
//! each other, persists both models, and exports the statistics series.

use anyhow::Result;
use clap::Parser;

use gomoku_rl::cli::Args;

fn main() -> Result<()> {
    gomoku_rl::cli::run(Args::parse())
}
