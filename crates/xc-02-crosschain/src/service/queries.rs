//! # Cross-Chain Service - Signer Queries

use super::*;
use xc_01_observer::store::nonces;

/// CCTXs whose current outbound for (key, chain) is still unsettled, by nonce.
pub(crate) fn pending_cctxs<K: KeyValueStore + ?Sized>(
    store: &K,
    signing_key: &str,
    chain_id: ChainId,
) -> CrossChainResult<Vec<CrossChainTx>> {
    let mut pending = Vec::new();
    for nonce in nonces::list_pending(store, signing_key, chain_id)? {
        let Some(mapping) = nonces::get_nonce_to_cctx(store, signing_key, chain_id, nonce)? else {
            continue;
        };
        let Some(record) = cctx::get_cctx(store, &mapping.cctx_index)? else {
            continue;
        };
        let current = record.current_outbound();
        if current.nonce == Some(nonce)
            && current.receiver_chain_id == chain_id
            && !current.is_executed()
        {
            pending.push(record);
        }
    }
    Ok(pending)
}
