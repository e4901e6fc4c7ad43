//! Cross-chain events
//!
//! Emitted after a transition commits. Signers and indexers consume them; the
//! state machine never reads them back.

use crate::domain::CctxStatus;
use serde::{Deserialize, Serialize};
use shared_types::{ChainId, Hash, U256};
use xc_01_observer::ObservationType;

/// Events published by the cross-chain service
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrossChainEvent {
    /// First vote on a new ballot
    BallotCreated {
        ballot_index: Hash,
        observation_type: ObservationType,
        chain_id: ChainId,
    },
    /// Inbound ballot finalized and a CCTX was created
    InboundFinalized {
        cctx_index: Hash,
        sender_chain_id: ChainId,
        inbound_hash: String,
    },
    /// CCTX status changed
    StatusChanged {
        cctx_index: Hash,
        from: CctxStatus,
        to: CctxStatus,
        message: String,
    },
    /// Nonce reserved for an outbound; the signer picks it up
    NonceReserved {
        cctx_index: Hash,
        signing_key: String,
        chain_id: ChainId,
        nonce: u64,
    },
    /// Fund migration started
    MigrationStarted {
        cctx_index: Hash,
        chain_id: ChainId,
        amount: U256,
    },
    /// Stability pool funding succeeded
    GasPoolFunded {
        cctx_index: Hash,
        chain_id: ChainId,
        amount: U256,
    },
    /// Stability pool funding failed (best-effort, CCTX unaffected)
    GasPoolFundingFailed {
        cctx_index: Hash,
        chain_id: ChainId,
        reason: String,
    },
}
