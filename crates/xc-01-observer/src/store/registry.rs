//! Observer set, chain registry, crosschain flags and signing keys

use crate::domain::{Chain, ChainParams, CrosschainFlags, ObserverSet, SigningKey};
use crate::error::{ObserverError, ObserverResult};
use crate::keys;
use shared_types::{ChainId, KeyValueStore, RecordStore};

pub fn get_observer_set<S: KeyValueStore + ?Sized>(store: &S) -> ObserverResult<ObserverSet> {
    Ok(store
        .get_record(&keys::observer_set_key())?
        .unwrap_or_default())
}

pub fn set_observer_set<S: KeyValueStore + ?Sized>(
    store: &mut S,
    set: &ObserverSet,
) -> ObserverResult<()> {
    store.put_record(&keys::observer_set_key(), set)?;
    Ok(())
}

pub fn get_chain<S: KeyValueStore + ?Sized>(
    store: &S,
    chain_id: ChainId,
) -> ObserverResult<Option<Chain>> {
    Ok(store.get_record(&keys::chain_key(chain_id))?)
}

pub fn set_chain<S: KeyValueStore + ?Sized>(store: &mut S, chain: &Chain) -> ObserverResult<()> {
    store.put_record(&keys::chain_key(chain.chain_id), chain)?;
    Ok(())
}

pub fn list_chains<S: KeyValueStore + ?Sized>(store: &S) -> ObserverResult<Vec<Chain>> {
    Ok(store.scan_records(keys::KeyPrefix::Chain.as_bytes())?)
}

pub fn get_chain_params<S: KeyValueStore + ?Sized>(
    store: &S,
    chain_id: ChainId,
) -> ObserverResult<Option<ChainParams>> {
    Ok(store.get_record(&keys::chain_params_key(chain_id))?)
}

pub fn set_chain_params<S: KeyValueStore + ?Sized>(
    store: &mut S,
    params: &ChainParams,
) -> ObserverResult<()> {
    if params.ballot_threshold_percent == 0 || params.ballot_threshold_percent > 100 {
        return Err(ObserverError::InvalidThreshold(params.ballot_threshold_percent));
    }
    store.put_record(&keys::chain_params_key(params.chain_id), params)?;
    Ok(())
}

/// The chain and its params, if the chain is registered and supported.
pub fn supported_chain<S: KeyValueStore + ?Sized>(
    store: &S,
    chain_id: ChainId,
) -> ObserverResult<(Chain, ChainParams)> {
    let chain = get_chain(store, chain_id)?.ok_or(ObserverError::UnsupportedChain(chain_id))?;
    let params = get_chain_params(store, chain_id)?
        .filter(|p| p.is_supported)
        .ok_or(ObserverError::UnsupportedChain(chain_id))?;
    Ok((chain, params))
}

pub fn get_crosschain_flags<S: KeyValueStore + ?Sized>(store: &S) -> ObserverResult<CrosschainFlags> {
    Ok(store
        .get_record(&keys::crosschain_flags_key())?
        .unwrap_or_default())
}

pub fn set_crosschain_flags<S: KeyValueStore + ?Sized>(
    store: &mut S,
    flags: &CrosschainFlags,
) -> ObserverResult<()> {
    store.put_record(&keys::crosschain_flags_key(), flags)?;
    Ok(())
}

pub fn get_current_signing_key<S: KeyValueStore + ?Sized>(
    store: &S,
) -> ObserverResult<Option<SigningKey>> {
    Ok(store.get_record(&keys::current_signing_key_key())?)
}

pub fn current_signing_key<S: KeyValueStore + ?Sized>(store: &S) -> ObserverResult<SigningKey> {
    get_current_signing_key(store)?.ok_or(ObserverError::SigningKeyNotFound)
}

pub fn set_current_signing_key<S: KeyValueStore + ?Sized>(
    store: &mut S,
    key: &SigningKey,
) -> ObserverResult<()> {
    store.put_record(&keys::current_signing_key_key(), key)?;
    Ok(())
}

/// Appends a key to the history. Keys are unique by public key.
pub fn append_signing_key_history<S: KeyValueStore + ?Sized>(
    store: &mut S,
    key: &SigningKey,
) -> ObserverResult<()> {
    if signing_key_history(store)?.iter().any(|k| k.pubkey == key.pubkey) {
        return Err(ObserverError::SigningKeyExists(key.pubkey.clone()));
    }
    store.put_record(
        &keys::signing_key_history_key(key.keygen_height, &key.pubkey),
        key,
    )?;
    Ok(())
}

/// All known keys, oldest keygen first.
pub fn signing_key_history<S: KeyValueStore + ?Sized>(store: &S) -> ObserverResult<Vec<SigningKey>> {
    Ok(store.scan_records(keys::KeyPrefix::SigningKeyHistory.as_bytes())?)
}

/// The most recently generated key, if it differs from the current one.
pub fn newer_signing_key<S: KeyValueStore + ?Sized>(store: &S) -> ObserverResult<Option<SigningKey>> {
    let current = current_signing_key(store)?;
    Ok(signing_key_history(store)?
        .into_iter()
        .last()
        .filter(|latest| latest.pubkey != current.pubkey && latest.keygen_height > current.keygen_height))
}
