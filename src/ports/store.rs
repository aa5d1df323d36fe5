//! Store port for agent persistence.

use std::path::Path;

use crate::{Result, ports::Agent};

/// Port for persisting and restoring agent policy state.
///
/// Implementations decide the on-disk format; agents only provide and accept
/// opaque blobs via [`Agent::export_blob`] / [`Agent::import_blob`].
pub trait AgentStore {
    /// Save an agent's policy state.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be written or serialization fails.
    fn save(&self, agent: &dyn Agent, path: &Path) -> Result<()>;

    /// Restore an agent's policy state in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable, or not a valid
    /// blob. The agent is left unchanged on error, so callers can absorb the
    /// failure and continue from fresh defaults.
    fn load(&self, agent: &mut dyn Agent, path: &Path) -> Result<()>;
}
