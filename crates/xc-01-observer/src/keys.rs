//! Storage key layout for observer records
//!
//! Every record lives under a fixed prefix. Multi-part keys use fixed-width
//! big-endian integers and length-prefixed strings so prefix scans stay exact.

use crate::domain::BallotIndex;
use shared_types::ChainId;

/// Key prefixes for the observer keyspace
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyPrefix {
    /// Ballot by index
    Ballot,
    /// Ballot index by creation height (for pruning)
    BallotByHeight,
    ObserverSet,
    Chain,
    ChainParams,
    CrosschainFlags,
    CurrentSigningKey,
    /// Signing keys by keygen height
    SigningKeyHistory,
    /// NonceRecord by (signing key, chain)
    Nonce,
    NonceToCctx,
    FundMigration,
}

impl KeyPrefix {
    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            KeyPrefix::Ballot => b"ob:b:",
            KeyPrefix::BallotByHeight => b"ob:h:",
            KeyPrefix::ObserverSet => b"ob:os",
            KeyPrefix::Chain => b"ob:ch:",
            KeyPrefix::ChainParams => b"ob:cp:",
            KeyPrefix::CrosschainFlags => b"ob:cf",
            KeyPrefix::CurrentSigningKey => b"ob:ck",
            KeyPrefix::SigningKeyHistory => b"ob:skh:",
            KeyPrefix::Nonce => b"ob:n:",
            KeyPrefix::NonceToCctx => b"ob:nc:",
            KeyPrefix::FundMigration => b"ob:fm:",
        }
    }

    /// Prefix followed by `suffix`.
    pub fn key(&self, suffix: &[u8]) -> Vec<u8> {
        let prefix = self.as_bytes();
        let mut key = Vec::with_capacity(prefix.len() + suffix.len());
        key.extend_from_slice(prefix);
        key.extend_from_slice(suffix);
        key
    }
}

fn push_str(key: &mut Vec<u8>, s: &str) {
    key.extend_from_slice(&(s.len() as u32).to_be_bytes());
    key.extend_from_slice(s.as_bytes());
}

pub fn ballot_key(index: &BallotIndex) -> Vec<u8> {
    KeyPrefix::Ballot.key(index)
}

pub fn ballot_height_prefix(height: u64) -> Vec<u8> {
    KeyPrefix::BallotByHeight.key(&height.to_be_bytes())
}

pub fn ballot_height_key(height: u64, index: &BallotIndex) -> Vec<u8> {
    let mut key = ballot_height_prefix(height);
    key.extend_from_slice(index);
    key
}

pub fn observer_set_key() -> Vec<u8> {
    KeyPrefix::ObserverSet.key(&[])
}

pub fn chain_key(chain_id: ChainId) -> Vec<u8> {
    KeyPrefix::Chain.key(&chain_id.to_be_bytes())
}

pub fn chain_params_key(chain_id: ChainId) -> Vec<u8> {
    KeyPrefix::ChainParams.key(&chain_id.to_be_bytes())
}

pub fn crosschain_flags_key() -> Vec<u8> {
    KeyPrefix::CrosschainFlags.key(&[])
}

pub fn current_signing_key_key() -> Vec<u8> {
    KeyPrefix::CurrentSigningKey.key(&[])
}

pub fn signing_key_history_key(keygen_height: u64, pubkey: &str) -> Vec<u8> {
    let mut key = KeyPrefix::SigningKeyHistory.key(&keygen_height.to_be_bytes());
    push_str(&mut key, pubkey);
    key
}

pub fn nonce_key(signing_key: &str, chain_id: ChainId) -> Vec<u8> {
    let mut key = KeyPrefix::Nonce.key(&[]);
    push_str(&mut key, signing_key);
    key.extend_from_slice(&chain_id.to_be_bytes());
    key
}

pub fn nonce_to_cctx_key(signing_key: &str, chain_id: ChainId, nonce: u64) -> Vec<u8> {
    let mut key = KeyPrefix::NonceToCctx.key(&[]);
    push_str(&mut key, signing_key);
    key.extend_from_slice(&chain_id.to_be_bytes());
    key.extend_from_slice(&nonce.to_be_bytes());
    key
}

pub fn fund_migration_key(chain_id: ChainId) -> Vec<u8> {
    KeyPrefix::FundMigration.key(&chain_id.to_be_bytes())
}
