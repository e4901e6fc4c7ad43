//! Observer subsystem configuration

use crate::error::{ObserverError, ObserverResult};
use serde::{Deserialize, Serialize};

/// What happens to a ballot once neither outcome can reach quorum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StaleBallotPolicy {
    /// Leave the ballot Pending until retention pruning removes it.
    #[default]
    KeepPending,
    /// Finalize the ballot as a failure.
    FinalizeAsFailure,
}

/// Observer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObserverConfig {
    /// Handling of ballots whose quorum became unreachable
    pub stale_ballot_policy: StaleBallotPolicy,
    /// Host blocks a finalized ballot is kept before pruning (0 = never prune)
    pub ballot_retention_blocks: u64,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            stale_ballot_policy: StaleBallotPolicy::KeepPending,
            ballot_retention_blocks: 100_000,
        }
    }
}

impl ObserverConfig {
    pub fn with_stale_ballot_policy(mut self, policy: StaleBallotPolicy) -> Self {
        self.stale_ballot_policy = policy;
        self
    }

    pub fn with_ballot_retention_blocks(mut self, blocks: u64) -> Self {
        self.ballot_retention_blocks = blocks;
        self
    }

    /// Rejects settings that would prune ballots in the block they finalize.
    pub fn validate(&self) -> ObserverResult<()> {
        if self.ballot_retention_blocks == 1 {
            return Err(ObserverError::InvalidConfig(
                "ballot_retention_blocks must be 0 (disabled) or at least 2".to_string(),
            ));
        }
        Ok(())
    }
}
