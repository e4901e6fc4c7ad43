//! # Outbound Ports
//!
//! What the state machine needs from the host chain: the fungible module that
//! executes deposits, the gas stability pool, and an event sink.

use crate::domain::{CoinType, DepositError, ProtocolVersion};
use crate::events::CrossChainEvent;
use shared_types::{ChainId, Hash, U256};
use thiserror::Error;

/// Deposit of an inbound's value on the host chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DepositRequest {
    /// CCTX the deposit belongs to.
    pub cctx_index: Hash,
    /// Sender on the source chain.
    pub sender: String,
    /// Source chain.
    pub sender_chain_id: ChainId,
    /// Resolved receiver on the host chain.
    pub receiver: String,
    /// Amount to deposit.
    pub amount: U256,
    /// Asset kind.
    pub coin_type: CoinType,
    /// Source-chain asset contract (empty for gas).
    pub asset: String,
    /// Call data (empty for a plain deposit).
    pub payload: Vec<u8>,
    /// Protocol version of the inbound.
    pub protocol_version: ProtocolVersion,
}

/// Result of a successful deposit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DepositReceipt {
    /// Host-chain transaction hash.
    pub tx_hash: String,
    /// True if the receiver contract was called.
    pub contract_call: bool,
}

/// Fungible module gateway - outbound port.
///
/// Called inside the transition; a returned error decides between revert and
/// abort through [`DepositError::kind`].
pub trait FungibleGateway: Send + Sync {
    /// Deposit (and optionally call) on the host chain.
    fn deposit_and_call(&self, request: &DepositRequest) -> Result<DepositReceipt, DepositError>;
}

/// Stability pool funding failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("stability pool funding failed: {0}")]
pub struct PoolFundingError(pub String);

/// Gas stability pool - outbound port.
///
/// Funded after commit; a failure is logged and never undoes the transition.
pub trait GasStabilityPool: Send + Sync {
    /// Credit `amount` to the pool of `chain_id`.
    fn fund(&self, chain_id: ChainId, amount: U256) -> Result<(), PoolFundingError>;
}

/// Event sink - outbound port.
pub trait EventPublisher: Send + Sync {
    /// Publish one committed event.
    fn publish(&self, event: CrossChainEvent);
}
