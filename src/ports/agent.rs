//! Agent port - abstraction over learning policies.
//!
//! The trainer works against this trait only, so a future
//! function-approximation policy can replace the tabular one without
//! touching the training loop.

use crate::{Result, game::GameState, types::Coord};

/// A learning policy occupying one seat of the game.
///
/// The capability set is {choose an action, learn from a transition,
/// serialize, deserialize}, plus episode bookkeeping. Action selection is
/// split into an exploring and a greedy entry point so that exhibition play
/// never has to toggle the exploration rate behind the policy's back.
pub trait Agent: Send {
    /// Choose an action under the training policy (exploration allowed).
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NoLegalMoves`] when the state has no legal
    /// moves. Callers must not query a terminal state.
    fn act_training(&mut self, state: &GameState) -> Result<Coord>;

    /// Choose the best-known action, never exploring. Ties among maximizers
    /// are still broken at random.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NoLegalMoves`] when the state has no legal
    /// moves.
    fn act_greedy(&mut self, state: &GameState) -> Result<Coord>;

    /// Update the policy from one `(state, action, reward, next_state)`
    /// transition.
    fn learn(
        &mut self,
        state: &GameState,
        action: Coord,
        reward: f64,
        next_state: &GameState,
    ) -> Result<()>;

    /// Serialize the full policy state to an opaque blob.
    fn export_blob(&self) -> Result<Vec<u8>>;

    /// Replace the policy state from a blob produced by
    /// [`Agent::export_blob`]. On error the agent is left unchanged.
    fn import_blob(&mut self, bytes: &[u8]) -> Result<()>;

    /// Bookkeeping counter increment, called once per finished episode.
    fn increment_episode(&mut self);

    /// Number of episodes this agent has finished.
    fn episode_count(&self) -> u64;

    /// Current exploration rate.
    fn epsilon(&self) -> f64;

    /// Reseed the policy's random number generator for reproducible runs.
    ///
    /// # Default Implementation
    ///
    /// Does nothing, suitable for deterministic policies.
    fn set_seed(&mut self, _seed: u64) {}

    /// Get the policy's name, used in diagnostics.
    fn name(&self) -> &str;
}
