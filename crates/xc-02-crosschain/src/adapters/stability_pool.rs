//! Gas Stability Pool Adapter

use crate::ports::outbound::{GasStabilityPool, PoolFundingError};
use parking_lot::Mutex;
use shared_types::{ChainId, U256};
use std::sync::atomic::{AtomicBool, Ordering};

/// Pool that records every funding; can be told to fail.
#[derive(Default)]
pub struct RecordingGasStabilityPool {
    fundings: Mutex<Vec<(ChainId, U256)>>,
    fail: AtomicBool,
}

impl RecordingGasStabilityPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn fundings(&self) -> Vec<(ChainId, U256)> {
        self.fundings.lock().clone()
    }

    /// Total credited to `chain_id`.
    pub fn balance(&self, chain_id: ChainId) -> U256 {
        self.fundings
            .lock()
            .iter()
            .filter(|(chain, _)| *chain == chain_id)
            .fold(U256::zero(), |acc, (_, amount)| acc.saturating_add(*amount))
    }
}

impl GasStabilityPool for RecordingGasStabilityPool {
    fn fund(&self, chain_id: ChainId, amount: U256) -> Result<(), PoolFundingError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(PoolFundingError(format!(
                "pool for chain {chain_id} unavailable"
            )));
        }
        self.fundings.lock().push((chain_id, amount));
        Ok(())
    }
}
