//! Outbound nonce accounting per (signing key, chain)

use crate::error::{ObserverError, ObserverResult};
use serde::{Deserialize, Serialize};
use shared_types::{ChainId, Hash};
use std::collections::BTreeSet;

/// Nonce counter and pending set for one (signing key, chain).
///
/// Invariant: every pending nonce is `< next_nonce`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonceRecord {
    pub signing_key: String,
    pub chain_id: ChainId,
    pub next_nonce: u64,
    pub pending: BTreeSet<u64>,
}

impl NonceRecord {
    pub fn new(signing_key: impl Into<String>, chain_id: ChainId) -> Self {
        Self {
            signing_key: signing_key.into(),
            chain_id,
            next_nonce: 0,
            pending: BTreeSet::new(),
        }
    }

    /// Hands out the next nonce and marks it pending.
    pub fn reserve(&mut self) -> u64 {
        let nonce = self.next_nonce;
        self.next_nonce += 1;
        self.pending.insert(nonce);
        nonce
    }

    /// Removes `nonce` from the pending set. Returns whether it was pending.
    pub fn release(&mut self, nonce: u64) -> ObserverResult<bool> {
        if nonce >= self.next_nonce {
            return Err(ObserverError::NonceNotIssued {
                signing_key: self.signing_key.clone(),
                chain_id: self.chain_id,
                nonce,
                next_nonce: self.next_nonce,
            });
        }
        Ok(self.pending.remove(&nonce))
    }

    pub fn is_pending(&self, nonce: u64) -> bool {
        self.pending.contains(&nonce)
    }
}

/// Maps a reserved nonce back to the CCTX that owns it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonceToCctx {
    pub signing_key: String,
    pub chain_id: ChainId,
    pub nonce: u64,
    pub cctx_index: Hash,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserve_is_strictly_increasing() {
        let mut record = NonceRecord::new("k", ChainId(1));
        assert_eq!(record.reserve(), 0);
        assert_eq!(record.reserve(), 1);
        assert_eq!(record.reserve(), 2);
        assert_eq!(record.pending.iter().copied().collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn test_release_is_idempotent() {
        let mut record = NonceRecord::new("k", ChainId(1));
        let n = record.reserve();
        assert_eq!(record.release(n), Ok(true));
        assert_eq!(record.release(n), Ok(false));
        assert!(!record.is_pending(n));
        // Released nonces are never reissued
        assert_eq!(record.reserve(), 1);
    }

    #[test]
    fn test_release_of_unissued_nonce_rejected() {
        let mut record = NonceRecord::new("k", ChainId(1));
        record.reserve();
        assert!(matches!(
            record.release(5),
            Err(ObserverError::NonceNotIssued { nonce: 5, next_nonce: 1, .. })
        ));
    }
}
