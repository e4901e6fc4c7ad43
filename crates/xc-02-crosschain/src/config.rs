//! Cross-chain settlement configuration

use crate::domain::{CrossChainError, CrossChainResult};
use serde::{Deserialize, Serialize};
use shared_types::ChainId;

/// Cross-chain configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrossChainConfig {
    /// Chain id of the settlement chain itself
    pub host_chain_id: ChainId,
    /// Gas limit granted to revert outbounds
    pub revert_gas_limit: u64,
    /// Share of unused outbound gas fees sent to the stability pool (0..=100)
    pub stability_pool_percent: u8,
    /// Maximum hashes per outbound tracker
    pub max_outbound_tracker_hashes: usize,
    /// Gas limit of fund migration outbounds
    pub migration_gas_limit: u64,
}

impl Default for CrossChainConfig {
    fn default() -> Self {
        Self {
            host_chain_id: ChainId(7000),
            revert_gas_limit: 250_000,
            stability_pool_percent: 95,
            max_outbound_tracker_hashes: 5,
            migration_gas_limit: 100_000,
        }
    }
}

impl CrossChainConfig {
    pub fn with_host_chain_id(mut self, chain_id: ChainId) -> Self {
        self.host_chain_id = chain_id;
        self
    }

    pub fn with_revert_gas_limit(mut self, gas_limit: u64) -> Self {
        self.revert_gas_limit = gas_limit;
        self
    }

    pub fn with_stability_pool_percent(mut self, percent: u8) -> Self {
        self.stability_pool_percent = percent;
        self
    }

    pub fn with_max_outbound_tracker_hashes(mut self, max: usize) -> Self {
        self.max_outbound_tracker_hashes = max;
        self
    }

    /// Validate configuration.
    pub fn validate(&self) -> CrossChainResult<()> {
        if self.stability_pool_percent > 100 {
            return Err(CrossChainError::InvalidConfig(format!(
                "stability_pool_percent {} exceeds 100",
                self.stability_pool_percent
            )));
        }
        if self.max_outbound_tracker_hashes == 0 {
            return Err(CrossChainError::InvalidConfig(
                "max_outbound_tracker_hashes must be positive".to_string(),
            ));
        }
        if self.revert_gas_limit == 0 || self.migration_gas_limit == 0 {
            return Err(CrossChainError::InvalidConfig(
                "gas limits must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
