//! # Core Entities
//!
//! Identifiers shared by every settlement subsystem.
//!
//! - **Digests**: `Hash` (SHA-256), used as ballot and CCTX indices
//! - **Chains**: `ChainId`
//! - **Host chain context**: `BlockContext`

use serde::{Deserialize, Serialize};
use std::fmt;

// Re-export U256 from primitive-types for use across all subsystems
pub use primitive_types::U256;

/// A 32-byte SHA-256 digest.
pub type Hash = [u8; 32];

/// Identifier of a chain known to the settlement system.
///
/// Host and external chains share one id space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChainId(pub i64);

impl ChainId {
    /// Big-endian bytes, used when building storage keys and digests.
    pub fn to_be_bytes(self) -> [u8; 8] {
        self.0.to_be_bytes()
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ChainId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// The host chain block a state transition executes in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BlockContext {
    /// Host chain block height.
    pub height: u64,
    /// Block timestamp (unix seconds).
    pub timestamp: u64,
}

impl BlockContext {
    /// Creates a context for the given height and timestamp.
    pub fn new(height: u64, timestamp: u64) -> Self {
        Self { height, timestamp }
    }
}

/// Renders a digest as `0x`-prefixed lowercase hex.
pub fn hash_to_hex(hash: &Hash) -> String {
    format!("0x{}", hex::encode(hash))
}

/// Parses a digest from hex, with or without the `0x` prefix.
pub fn hash_from_hex(s: &str) -> Option<Hash> {
    let raw = s.strip_prefix("0x").unwrap_or(s);
    let bytes = hex::decode(raw).ok()?;
    bytes.try_into().ok()
}
