//! Application-layer configuration types.

pub mod config;

pub use config::{QLearningConfig, TrainerConfig};
