//! # Domain Value Objects
//!
//! Closed enums of the CCTX lifecycle. Every `match` over them is exhaustive.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of asset an inbound carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoinType {
    /// Native gas token of the sender chain.
    Gas,
    /// ERC20-style token.
    Erc20,
    /// Message-only call, no value.
    NoAssetCall,
    /// Administrative transfer (fund migration). Never reverted.
    Cmd,
}

impl CoinType {
    /// Every variant, for exhaustive checks.
    pub const ALL: [CoinType; 4] = [
        CoinType::Gas,
        CoinType::Erc20,
        CoinType::NoAssetCall,
        CoinType::Cmd,
    ];

    /// Whether a failed outbound of this kind is sent back to the sender.
    pub fn is_revertible(self) -> bool {
        match self {
            CoinType::Gas | CoinType::Erc20 | CoinType::NoAssetCall => true,
            CoinType::Cmd => false,
        }
    }

    /// Whether observers may submit inbound votes for this kind.
    pub fn is_observable_inbound(self) -> bool {
        match self {
            CoinType::Gas | CoinType::Erc20 | CoinType::NoAssetCall => true,
            CoinType::Cmd => false,
        }
    }
}

/// Gateway protocol version the inbound was emitted by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProtocolVersion {
    /// Receiver may be overridden by the first 20 bytes of the message.
    #[default]
    V1,
    /// Explicit receiver; message is hex call data; revert options honored.
    V2,
}

impl ProtocolVersion {
    pub const ALL: [ProtocolVersion; 2] = [ProtocolVersion::V1, ProtocolVersion::V2];
}

/// V2 revert options.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevertOptions {
    /// Receiver of reverted funds instead of the sender.
    pub revert_address: Option<String>,
    /// Whether the revert should call the revert address.
    pub call_on_revert: bool,
    /// Payload for the revert call.
    pub revert_message: Vec<u8>,
}

/// CCTX lifecycle state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CctxStatus {
    /// Created, destination effect not yet applied.
    #[default]
    PendingInbound,
    /// Waiting for the outbound to be signed and observed.
    PendingOutbound,
    /// Outbound observed as successful.
    OutboundMined,
    /// Waiting for the revert outbound.
    PendingRevert,
    /// Revert outbound observed as successful.
    Reverted,
    /// Unrecoverable failure.
    Aborted,
}

impl CctxStatus {
    /// Every variant, for exhaustive checks.
    pub const ALL: [CctxStatus; 6] = [
        CctxStatus::PendingInbound,
        CctxStatus::PendingOutbound,
        CctxStatus::OutboundMined,
        CctxStatus::PendingRevert,
        CctxStatus::Reverted,
        CctxStatus::Aborted,
    ];

    /// Check if transition is valid.
    pub fn can_transition_to(&self, next: CctxStatus) -> bool {
        use CctxStatus::*;
        match (self, next) {
            (PendingInbound, PendingOutbound | OutboundMined | PendingRevert | Aborted) => true,
            (PendingOutbound, OutboundMined | PendingRevert | Aborted) => true,
            (PendingRevert, Reverted | Aborted) => true,
            _ => false,
        }
    }

    /// Check if terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            CctxStatus::OutboundMined | CctxStatus::Reverted | CctxStatus::Aborted
        )
    }

    /// States in which the current outbound record awaits a signer.
    pub fn is_pending_outbound(&self) -> bool {
        matches!(self, CctxStatus::PendingOutbound | CctxStatus::PendingRevert)
    }
}

impl fmt::Display for CctxStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Finalization state of one outbound record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxFinalizationStatus {
    /// Not yet observed (or observation not finalized).
    #[default]
    NotFinalized,
    /// Observation finalized; record is immutable.
    Executed,
}

/// Outcome of an outbound as reported by an observer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReceiveStatus {
    Success,
    Failed,
}
