//! CCTX records and the finalized-inbound registry

use crate::domain::{CrossChainResult, CrossChainTx, FinalizedInbound};
use crate::keys;
use shared_types::{ChainId, Hash, KeyValueStore, RecordStore, StoreError};

pub fn get_cctx<S: KeyValueStore + ?Sized>(
    store: &S,
    index: &Hash,
) -> CrossChainResult<Option<CrossChainTx>> {
    Ok(store.get_record(&keys::cctx_key(index))?)
}

pub fn set_cctx<S: KeyValueStore + ?Sized>(store: &mut S, cctx: &CrossChainTx) -> CrossChainResult<()> {
    store.put_record(&keys::cctx_key(&cctx.index), cctx)?;
    Ok(())
}

pub fn cctx_exists<S: KeyValueStore + ?Sized>(store: &S, index: &Hash) -> CrossChainResult<bool> {
    Ok(store.exists(&keys::cctx_key(index)).map_err(StoreError::from)?)
}

pub fn list_cctxs<S: KeyValueStore + ?Sized>(store: &S) -> CrossChainResult<Vec<CrossChainTx>> {
    Ok(store.scan_records(keys::KeyPrefix::Cctx.as_bytes())?)
}

pub fn is_inbound_finalized<S: KeyValueStore + ?Sized>(
    store: &S,
    chain_id: ChainId,
    inbound_hash: &str,
    event_index: u64,
) -> CrossChainResult<bool> {
    let key = keys::finalized_inbound_key(chain_id, inbound_hash, event_index);
    Ok(store.exists(&key).map_err(StoreError::from)?)
}

pub fn set_finalized_inbound<S: KeyValueStore + ?Sized>(
    store: &mut S,
    record: &FinalizedInbound,
) -> CrossChainResult<()> {
    let key = keys::finalized_inbound_key(record.chain_id, &record.inbound_hash, record.event_index);
    store.put_record(&key, record)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CoinType, MsgVoteInbound, ProtocolVersion, RevertOptions};
    use shared_types::{BlockContext, InMemoryKVStore, U256};

    fn cctx(hash: &str) -> CrossChainTx {
        let msg = MsgVoteInbound {
            creator: "obs".into(),
            sender: "0xs".into(),
            sender_chain_id: ChainId(1),
            tx_origin: String::new(),
            receiver: "0xr".into(),
            receiver_chain_id: ChainId(56),
            amount: U256::from(100),
            message: String::new(),
            inbound_hash: hash.into(),
            inbound_block_height: 3,
            gas_limit: 21_000,
            coin_type: CoinType::Gas,
            asset: String::new(),
            event_index: 0,
            protocol_version: ProtocolVersion::V1,
            revert_options: RevertOptions::default(),
        };
        CrossChainTx::from_inbound(&msg, msg.digest(), "k", BlockContext::new(1, 1))
    }

    #[test]
    fn test_cctx_round_trip() {
        let mut store = InMemoryKVStore::new();
        let c = cctx("0xa");
        set_cctx(&mut store, &c).unwrap();
        assert!(cctx_exists(&store, &c.index).unwrap());
        assert_eq!(get_cctx(&store, &c.index).unwrap(), Some(c));
    }

    #[test]
    fn test_list_cctxs() {
        let mut store = InMemoryKVStore::new();
        set_cctx(&mut store, &cctx("0xa")).unwrap();
        set_cctx(&mut store, &cctx("0xb")).unwrap();
        assert_eq!(list_cctxs(&store).unwrap().len(), 2);
    }

    #[test]
    fn test_finalized_inbound_is_case_insensitive() {
        let mut store = InMemoryKVStore::new();
        let record = FinalizedInbound {
            chain_id: ChainId(1),
            inbound_hash: "0xABC".into(),
            event_index: 2,
            finalized_height: 9,
        };
        set_finalized_inbound(&mut store, &record).unwrap();
        assert!(is_inbound_finalized(&store, ChainId(1), "0xabc", 2).unwrap());
        assert!(!is_inbound_finalized(&store, ChainId(1), "0xabc", 3).unwrap());
        assert!(!is_inbound_finalized(&store, ChainId(2), "0xabc", 2).unwrap());
    }
}
