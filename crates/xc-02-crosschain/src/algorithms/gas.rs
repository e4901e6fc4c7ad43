//! Gas stability pool accounting

use crate::domain::OutboundParams;
use shared_types::U256;
use tracing::error;

/// Share of the unused outbound gas fee owed to the stability pool.
///
/// `(effective_gas_limit - gas_used) * effective_gas_price * percent / 100`.
/// Returns `None` when any factor is zero or the observation is inconsistent.
pub fn remaining_gas_fees(outbound: &OutboundParams, percent: u8) -> Option<U256> {
    let limit = outbound.effective_gas_limit;
    let used = outbound.gas_used;
    let price = outbound.effective_gas_price;
    if limit == 0 || used == 0 || price.is_zero() || percent == 0 {
        return None;
    }
    if limit < used {
        error!(
            "[xc-02] outbound gas limit {} below gas used {} on chain {}",
            limit, used, outbound.receiver_chain_id
        );
        return None;
    }
    let unused = U256::from(limit - used);
    let fees = unused.checked_mul(price)?.checked_mul(U256::from(percent))? / U256::from(100u8);
    (!fees.is_zero()).then_some(fees)
}
