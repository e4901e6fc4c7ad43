//! Outbound and inbound trackers
//!
//! Trackers are hints from observers and signers. They never move funds; the
//! state machine deletes them once the corresponding vote finalizes.

use super::value_objects::CoinType;
use serde::{Deserialize, Serialize};
use shared_types::ChainId;

/// One reported broadcast hash.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerHash {
    /// Broadcast transaction hash.
    pub tx_hash: String,
    /// Observer that reported it.
    pub reporter: String,
}

/// Broadcast hashes reported for one (signing key, chain, nonce).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundTracker {
    /// Key that signs the outbound; nonces are per key.
    pub signing_key: String,
    /// Outbound chain.
    pub chain_id: ChainId,
    /// Outbound nonce.
    pub nonce: u64,
    /// Reported hashes, first report first.
    pub hash_list: Vec<TrackerHash>,
}

impl OutboundTracker {
    /// Empty tracker.
    pub fn new(signing_key: impl Into<String>, chain_id: ChainId, nonce: u64) -> Self {
        Self {
            signing_key: signing_key.into(),
            chain_id,
            nonce,
            hash_list: Vec::new(),
        }
    }

    /// True if `tx_hash` was already reported (case-insensitive).
    pub fn contains(&self, tx_hash: &str) -> bool {
        self.hash_list
            .iter()
            .any(|h| h.tx_hash.eq_ignore_ascii_case(tx_hash))
    }
}

/// An inbound an observer saw but which has not finalized yet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundTracker {
    /// Sender chain.
    pub chain_id: ChainId,
    /// Inbound transaction hash.
    pub tx_hash: String,
    /// Asset kind.
    pub coin_type: CoinType,
    /// Observer that reported it.
    pub reporter: String,
}

/// Marker that an external event already produced a CCTX.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizedInbound {
    /// Sender chain.
    pub chain_id: ChainId,
    /// Inbound transaction hash.
    pub inbound_hash: String,
    /// Log index.
    pub event_index: u64,
    /// Host height of finalization.
    pub finalized_height: u64,
}
