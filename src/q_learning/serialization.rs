//! Serialization support for tabular agents.
//!
//! The persisted blob carries the full Q-table plus the current exploration
//! rate and episode counter, and must round-trip exactly through
//! save → load.

use serde::{Deserialize, Serialize};

use crate::{Error, Result, q_learning::agent::TabularAgent, q_learning::q_table::QTable};

/// The policy state carried inside a save blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct AgentBlob {
    pub q_table: QTable,
    pub epsilon: f64,
    pub episode_count: u64,
}

/// Versioned, MessagePack-encoded snapshot of a [`TabularAgent`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedAgent {
    pub version: u32,
    state: AgentBlob,
}

impl SavedAgent {
    pub const VERSION: u32 = 1;

    pub fn from_agent(agent: &TabularAgent) -> Self {
        Self {
            version: Self::VERSION,
            state: agent.export_state(),
        }
    }

    pub(crate) fn into_state(self) -> AgentBlob {
        self.state
    }

    /// Encode to MessagePack bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if encoding fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        rmp_serde::to_vec(self).map_err(|e| Error::Serialization {
            operation: "serialize agent state".to_string(),
            message: e.to_string(),
        })
    }

    /// Decode from MessagePack bytes, checking the format version.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] for malformed bytes or bytes missing
    /// required fields, and [`Error::UnsupportedSaveVersion`] for a version
    /// mismatch.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let saved: SavedAgent = rmp_serde::from_slice(bytes).map_err(|e| Error::Serialization {
            operation: "deserialize agent state".to_string(),
            message: e.to_string(),
        })?;
        if saved.version != Self::VERSION {
            return Err(Error::UnsupportedSaveVersion {
                found: saved.version,
                expected: Self::VERSION,
            });
        }
        Ok(saved)
    }
}
