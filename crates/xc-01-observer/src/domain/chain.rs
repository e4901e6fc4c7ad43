//! Chains, per-chain parameters and global crosschain flags

use serde::{Deserialize, Serialize};
use shared_types::ChainId;

/// Network family of a chain; decides address format and whether it is external.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Network {
    /// The settlement (host) chain itself
    Host,
    Evm,
    Bitcoin,
    Solana,
}

/// A registered chain
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chain {
    pub chain_id: ChainId,
    pub name: String,
    pub network: Network,
}

impl Chain {
    pub fn new(chain_id: ChainId, name: impl Into<String>, network: Network) -> Self {
        Self {
            chain_id,
            name: name.into(),
            network,
        }
    }

    /// True for every chain other than the host.
    pub fn is_external(&self) -> bool {
        self.network != Network::Host
    }
}

/// Governance-set parameters for one chain
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainParams {
    pub chain_id: ChainId,
    /// Percent of the observer set needed to finalize a ballot (1..=100)
    pub ballot_threshold_percent: u8,
    /// External confirmations observers wait before voting
    pub confirmation_count: u64,
    pub is_supported: bool,
}

impl ChainParams {
    pub fn new(chain_id: ChainId, ballot_threshold_percent: u8) -> Self {
        Self {
            chain_id,
            ballot_threshold_percent,
            confirmation_count: 1,
            is_supported: true,
        }
    }

    pub fn with_confirmation_count(mut self, count: u64) -> Self {
        self.confirmation_count = count;
        self
    }

    pub fn with_supported(mut self, supported: bool) -> Self {
        self.is_supported = supported;
        self
    }
}

/// Global switches for cross-chain traffic
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrosschainFlags {
    pub is_inbound_enabled: bool,
    pub is_outbound_enabled: bool,
}

impl Default for CrosschainFlags {
    fn default() -> Self {
        Self {
            is_inbound_enabled: true,
            is_outbound_enabled: true,
        }
    }
}
