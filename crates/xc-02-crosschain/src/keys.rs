//! Storage key layout for cross-chain records

use shared_types::{ChainId, Hash};

/// Key prefixes for the cross-chain keyspace
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyPrefix {
    /// CCTX by index
    Cctx,
    /// Outbound tracker by (signing key, chain, nonce)
    OutboundTracker,
    /// Inbound tracker by (chain, tx hash)
    InboundTracker,
    /// Finalized inbound by (chain, tx hash, event index)
    FinalizedInbound,
}

impl KeyPrefix {
    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            KeyPrefix::Cctx => b"xc:cctx:",
            KeyPrefix::OutboundTracker => b"xc:otr:",
            KeyPrefix::InboundTracker => b"xc:itr:",
            KeyPrefix::FinalizedInbound => b"xc:fin:",
        }
    }

    pub fn key(&self, suffix: &[u8]) -> Vec<u8> {
        let mut key = self.as_bytes().to_vec();
        key.extend_from_slice(suffix);
        key
    }
}

pub fn cctx_key(index: &Hash) -> Vec<u8> {
    KeyPrefix::Cctx.key(index)
}

/// Nonces are issued per signing key, so trackers are scoped by key too.
pub fn outbound_tracker_prefix(signing_key: &str, chain_id: ChainId) -> Vec<u8> {
    let mut key = KeyPrefix::OutboundTracker.key(&(signing_key.len() as u32).to_be_bytes());
    key.extend_from_slice(signing_key.as_bytes());
    key.extend_from_slice(&chain_id.to_be_bytes());
    key
}

pub fn outbound_tracker_key(signing_key: &str, chain_id: ChainId, nonce: u64) -> Vec<u8> {
    let mut key = outbound_tracker_prefix(signing_key, chain_id);
    key.extend_from_slice(&nonce.to_be_bytes());
    key
}

pub fn inbound_tracker_key(chain_id: ChainId, tx_hash: &str) -> Vec<u8> {
    let mut key = KeyPrefix::InboundTracker.key(&chain_id.to_be_bytes());
    key.extend_from_slice(tx_hash.to_ascii_lowercase().as_bytes());
    key
}

pub fn finalized_inbound_key(chain_id: ChainId, inbound_hash: &str, event_index: u64) -> Vec<u8> {
    let mut key = KeyPrefix::FinalizedInbound.key(&chain_id.to_be_bytes());
    key.extend_from_slice(&event_index.to_be_bytes());
    key.extend_from_slice(inbound_hash.to_ascii_lowercase().as_bytes());
    key
}
