//! Deterministic SHA-256 digests over structured fields.
//!
//! Every field is length-prefixed so adjacent variable-length fields can never
//! collide (`"ab" + "c"` and `"a" + "bc"` hash differently).

use crate::entities::{ChainId, Hash, U256};
use sha2::{Digest, Sha256};

/// Incremental builder for field-wise digests.
#[derive(Clone)]
pub struct DigestBuilder {
    hasher: Sha256,
}

impl DigestBuilder {
    /// Starts a digest under a domain tag, separating digest families.
    pub fn new(domain: &str) -> Self {
        Self {
            hasher: Sha256::new(),
        }
        .bytes(domain.as_bytes())
    }

    /// Appends a length-prefixed byte field.
    pub fn bytes(mut self, data: &[u8]) -> Self {
        self.hasher.update((data.len() as u64).to_be_bytes());
        self.hasher.update(data);
        self
    }

    /// Appends a string field.
    pub fn str(self, value: &str) -> Self {
        self.bytes(value.as_bytes())
    }

    /// Appends an unsigned integer.
    pub fn u64(mut self, value: u64) -> Self {
        self.hasher.update(value.to_be_bytes());
        self
    }

    /// Appends a chain id.
    pub fn chain(mut self, chain_id: ChainId) -> Self {
        self.hasher.update(chain_id.to_be_bytes());
        self
    }

    /// Appends a 256-bit amount as 32 big-endian bytes.
    pub fn u256(mut self, value: &U256) -> Self {
        let mut buf = [0u8; 32];
        value.to_big_endian(&mut buf);
        self.hasher.update(buf);
        self
    }

    /// Finishes the digest.
    pub fn finish(self) -> Hash {
        self.hasher.finalize().into()
    }
}
