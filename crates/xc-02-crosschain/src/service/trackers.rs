//! # Cross-Chain Service - Trackers
//!
//! Observers report broadcast outbound hashes and missed inbounds.

use super::helpers::{ensure_observer, supported_chain};
use super::*;
use crate::domain::{TrackerHash, TxFinalizationStatus};
use tracing::debug;
use xc_01_observer::store::{nonces, registry};

impl<S: KeyValueStore> CrossChainService<S> {
    pub(crate) fn apply_add_outbound_tracker<K: KeyValueStore + ?Sized>(
        &self,
        store: &mut K,
        msg: &MsgAddOutboundTracker,
    ) -> CrossChainResult<()> {
        if msg.tx_hash.is_empty() {
            return Err(CrossChainError::InvalidMessage("tx hash is empty".to_string()));
        }
        supported_chain(store, msg.chain_id)?;
        ensure_observer(store, &msg.creator)?;

        // Every key issues its own nonces, so several keys may have used this
        // one. Without an explicit key the newest key with an unsettled
        // outbound at this nonce owns the tracker.
        let candidates: Vec<String> = match &msg.signing_key {
            Some(key) => vec![key.clone()],
            None => registry::signing_key_history(store)?
                .into_iter()
                .rev()
                .map(|k| k.pubkey)
                .collect(),
        };
        let mut owner = None;
        for key in candidates {
            if owns_unsettled_nonce(store, &key, msg.chain_id, msg.nonce)? {
                owner = Some(key);
                break;
            }
        }
        let signing_key = owner.ok_or(CrossChainError::NoPendingOutbound {
            chain_id: msg.chain_id,
            nonce: msg.nonce,
        })?;

        let mut tracker =
            tracker_store::get_outbound_tracker(store, &signing_key, msg.chain_id, msg.nonce)?
                .unwrap_or_else(|| {
                    OutboundTracker::new(signing_key.as_str(), msg.chain_id, msg.nonce)
                });
        if tracker.contains(&msg.tx_hash) {
            debug!(
                "[xc-02] outbound tracker {}/{} already has {}",
                msg.chain_id, msg.nonce, msg.tx_hash
            );
            return Ok(());
        }
        let max = self.config.max_outbound_tracker_hashes;
        if tracker.hash_list.len() >= max {
            return Err(CrossChainError::TrackerFull {
                chain_id: msg.chain_id,
                nonce: msg.nonce,
                max,
            });
        }
        tracker.hash_list.push(TrackerHash {
            tx_hash: msg.tx_hash.clone(),
            reporter: msg.creator.to_string(),
        });
        tracker_store::set_outbound_tracker(store, &tracker)
    }

    pub(crate) fn apply_add_inbound_tracker<K: KeyValueStore + ?Sized>(
        &self,
        store: &mut K,
        msg: &MsgAddInboundTracker,
    ) -> CrossChainResult<()> {
        if msg.tx_hash.is_empty() {
            return Err(CrossChainError::InvalidMessage("tx hash is empty".to_string()));
        }
        supported_chain(store, msg.chain_id)?;
        ensure_observer(store, &msg.creator)?;
        tracker_store::set_inbound_tracker(
            store,
            &InboundTracker {
                chain_id: msg.chain_id,
                tx_hash: msg.tx_hash.clone(),
                coin_type: msg.coin_type,
                reporter: msg.creator.to_string(),
            },
        )
    }
}

/// True if `signing_key` reserved `nonce` on `chain_id` for an outbound that
/// has not settled yet.
fn owns_unsettled_nonce<K: KeyValueStore + ?Sized>(
    store: &K,
    signing_key: &str,
    chain_id: ChainId,
    nonce: u64,
) -> CrossChainResult<bool> {
    let Some(mapping) = nonces::get_nonce_to_cctx(store, signing_key, chain_id, nonce)? else {
        return Ok(false);
    };
    let Some(record) = cctx::get_cctx(store, &mapping.cctx_index)? else {
        return Ok(false);
    };
    let pending = record.outbound_params().any(|o| {
        o.signing_key == signing_key
            && o.receiver_chain_id == chain_id
            && o.nonce == Some(nonce)
            && o.finalization_status == TxFinalizationStatus::NotFinalized
    });
    Ok(pending)
}
