//! Outbound and inbound trackers

use crate::domain::{CrossChainResult, InboundTracker, OutboundTracker};
use crate::keys;
use shared_types::{ChainId, KeyValueStore, RecordStore};

pub fn get_outbound_tracker<S: KeyValueStore + ?Sized>(
    store: &S,
    signing_key: &str,
    chain_id: ChainId,
    nonce: u64,
) -> CrossChainResult<Option<OutboundTracker>> {
    Ok(store.get_record(&keys::outbound_tracker_key(signing_key, chain_id, nonce))?)
}

pub fn set_outbound_tracker<S: KeyValueStore + ?Sized>(
    store: &mut S,
    tracker: &OutboundTracker,
) -> CrossChainResult<()> {
    let key = keys::outbound_tracker_key(&tracker.signing_key, tracker.chain_id, tracker.nonce);
    store.put_record(&key, tracker)?;
    Ok(())
}

pub fn remove_outbound_tracker<S: KeyValueStore + ?Sized>(
    store: &mut S,
    signing_key: &str,
    chain_id: ChainId,
    nonce: u64,
) -> CrossChainResult<()> {
    store.delete_record(&keys::outbound_tracker_key(signing_key, chain_id, nonce))?;
    Ok(())
}

/// Trackers of one signer on a chain, ascending by nonce.
pub fn list_outbound_trackers<S: KeyValueStore + ?Sized>(
    store: &S,
    signing_key: &str,
    chain_id: ChainId,
) -> CrossChainResult<Vec<OutboundTracker>> {
    Ok(store.scan_records(&keys::outbound_tracker_prefix(signing_key, chain_id))?)
}

pub fn set_inbound_tracker<S: KeyValueStore + ?Sized>(
    store: &mut S,
    tracker: &InboundTracker,
) -> CrossChainResult<()> {
    store.put_record(&keys::inbound_tracker_key(tracker.chain_id, &tracker.tx_hash), tracker)?;
    Ok(())
}

pub fn remove_inbound_tracker<S: KeyValueStore + ?Sized>(
    store: &mut S,
    chain_id: ChainId,
    tx_hash: &str,
) -> CrossChainResult<()> {
    store.delete_record(&keys::inbound_tracker_key(chain_id, tx_hash))?;
    Ok(())
}

pub fn list_inbound_trackers<S: KeyValueStore + ?Sized>(
    store: &S,
    chain_id: ChainId,
) -> CrossChainResult<Vec<InboundTracker>> {
    let prefix = keys::KeyPrefix::InboundTracker.key(&chain_id.to_be_bytes());
    Ok(store.scan_records(&prefix)?)
}
