//! Nonce ledger
//!
//! Nonce records are ordinary entities in the store, so a reservation commits
//! or rolls back together with the transition that made it.

use crate::domain::{NonceRecord, NonceToCctx};
use crate::error::ObserverResult;
use crate::keys;
use shared_types::{ChainId, Hash, KeyValueStore, RecordStore};
use std::collections::BTreeSet;
use tracing::{debug, warn};

pub fn get_nonce_record<S: KeyValueStore + ?Sized>(
    store: &S,
    signing_key: &str,
    chain_id: ChainId,
) -> ObserverResult<Option<NonceRecord>> {
    Ok(store.get_record(&keys::nonce_key(signing_key, chain_id))?)
}

/// Reserves the next nonce for (key, chain), creating the counter on first use.
pub fn reserve_nonce<S: KeyValueStore + ?Sized>(
    store: &mut S,
    signing_key: &str,
    chain_id: ChainId,
) -> ObserverResult<u64> {
    let mut record = get_nonce_record(store, signing_key, chain_id)?
        .unwrap_or_else(|| NonceRecord::new(signing_key, chain_id));
    let nonce = record.reserve();
    store.put_record(&keys::nonce_key(signing_key, chain_id), &record)?;
    debug!(
        "[xc-01] reserved nonce {} for key {} on chain {}",
        nonce, signing_key, chain_id
    );
    Ok(nonce)
}

/// Removes `nonce` from the pending set. Releasing twice is a no-op.
pub fn release_nonce<S: KeyValueStore + ?Sized>(
    store: &mut S,
    signing_key: &str,
    chain_id: ChainId,
    nonce: u64,
) -> ObserverResult<()> {
    let Some(mut record) = get_nonce_record(store, signing_key, chain_id)? else {
        warn!(
            "[xc-01] release of nonce {} for key {} on chain {} with no nonce record",
            nonce, signing_key, chain_id
        );
        return Ok(());
    };
    if record.release(nonce)? {
        store.put_record(&keys::nonce_key(signing_key, chain_id), &record)?;
    }
    Ok(())
}

/// Pending nonces for (key, chain), ascending.
pub fn list_pending<S: KeyValueStore + ?Sized>(
    store: &S,
    signing_key: &str,
    chain_id: ChainId,
) -> ObserverResult<BTreeSet<u64>> {
    Ok(get_nonce_record(store, signing_key, chain_id)?
        .map(|r| r.pending)
        .unwrap_or_default())
}

pub fn set_nonce_to_cctx<S: KeyValueStore + ?Sized>(
    store: &mut S,
    signing_key: &str,
    chain_id: ChainId,
    nonce: u64,
    cctx_index: Hash,
) -> ObserverResult<()> {
    let entry = NonceToCctx {
        signing_key: signing_key.to_string(),
        chain_id,
        nonce,
        cctx_index,
    };
    store.put_record(&keys::nonce_to_cctx_key(signing_key, chain_id, nonce), &entry)?;
    Ok(())
}

pub fn get_nonce_to_cctx<S: KeyValueStore + ?Sized>(
    store: &S,
    signing_key: &str,
    chain_id: ChainId,
    nonce: u64,
) -> ObserverResult<Option<NonceToCctx>> {
    Ok(store.get_record(&keys::nonce_to_cctx_key(signing_key, chain_id, nonce))?)
}
