//! Self-play training pipeline.
//!
//! The trainer drives episodes between the two seats, performs the delayed
//! end-of-episode learning passes, and aggregates running statistics.
//! Observers attach for progress display and board rendering.

pub mod observers;
pub mod stats;
pub mod training;

pub use observers::{BoardPrinter, MetricsObserver, ProgressObserver};
pub use stats::{StatsRow, StatsSeries, TrainSnapshot};
pub use training::Trainer;
