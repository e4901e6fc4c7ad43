//! Custodial signing keys
//!
//! One key is current at a time. Keys produced by later keygen ceremonies are
//! appended to the history; a key newer than the current one is the target of
//! fund migrations.

use super::chain::{Chain, Network};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningKey {
    /// Aggregate public key (hex)
    pub pubkey: String,
    /// Host height the key was generated at
    pub keygen_height: u64,
    /// Host height the key was registered at
    pub finalized_height: u64,
}

impl SigningKey {
    pub fn new(pubkey: impl Into<String>, keygen_height: u64, finalized_height: u64) -> Self {
        Self {
            pubkey: pubkey.into(),
            keygen_height,
            finalized_height,
        }
    }

    /// Deterministic custody address of this key on `chain`.
    ///
    /// EVM-style chains use the last 20 bytes of the key digest; other
    /// networks get a network-tagged encoding of the same digest.
    pub fn address_for(&self, chain: &Chain) -> String {
        let digest = Sha256::digest(self.pubkey.as_bytes());
        match chain.network {
            Network::Evm | Network::Host => format!("0x{}", hex::encode(&digest[12..])),
            Network::Bitcoin => format!("bc1q{}", hex::encode(&digest[..20])),
            Network::Solana => hex::encode(digest),
        }
    }
}
