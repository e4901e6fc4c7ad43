//! Ballot store: ballots by index plus a per-height index for pruning

use crate::domain::{Ballot, BallotIndex};
use crate::error::ObserverResult;
use crate::keys;
use shared_types::{KeyValueStore, RecordStore, StoreError};
use tracing::debug;

pub fn get_ballot<S: KeyValueStore + ?Sized>(
    store: &S,
    index: &BallotIndex,
) -> ObserverResult<Option<Ballot>> {
    Ok(store.get_record(&keys::ballot_key(index))?)
}

pub fn set_ballot<S: KeyValueStore + ?Sized>(store: &mut S, ballot: &Ballot) -> ObserverResult<()> {
    store.put_record(&keys::ballot_key(&ballot.index), ballot)?;
    Ok(())
}

/// Records `index` under its creation height.
pub fn add_ballot_to_height_list<S: KeyValueStore + ?Sized>(
    store: &mut S,
    height: u64,
    index: &BallotIndex,
) -> ObserverResult<()> {
    store.put_record(&keys::ballot_height_key(height, index), index)?;
    Ok(())
}

pub fn ballots_created_at<S: KeyValueStore + ?Sized>(
    store: &S,
    height: u64,
) -> ObserverResult<Vec<BallotIndex>> {
    Ok(store.scan_records(&keys::ballot_height_prefix(height))?)
}

/// Deletes finalized ballots created at or below `max_height`.
///
/// Pending ballots stay, along with their height entries. Returns the number
/// of ballots removed.
pub fn prune_ballots<S: KeyValueStore + ?Sized>(store: &mut S, max_height: u64) -> ObserverResult<usize> {
    let entries = store
        .prefix_scan(keys::KeyPrefix::BallotByHeight.as_bytes())
        .map_err(StoreError::from)?;
    let mut pruned = 0;
    for (height_key, _) in entries {
        let Some(index) = index_from_height_key(&height_key) else {
            continue;
        };
        if height_from_height_key(&height_key).is_some_and(|h| h > max_height) {
            // Sorted by height: nothing further is old enough
            break;
        }
        match get_ballot(store, &index)? {
            Some(ballot) if !ballot.is_finalized() => continue,
            Some(_) => {
                store.delete_record(&keys::ballot_key(&index))?;
                pruned += 1;
            }
            None => {}
        }
        store.delete_record(&height_key)?;
    }
    if pruned > 0 {
        debug!("[xc-01] pruned {} finalized ballots up to height {}", pruned, max_height);
    }
    Ok(pruned)
}

fn height_from_height_key(key: &[u8]) -> Option<u64> {
    let prefix_len = keys::KeyPrefix::BallotByHeight.as_bytes().len();
    let raw = key.get(prefix_len..prefix_len + 8)?;
    Some(u64::from_be_bytes(raw.try_into().ok()?))
}

fn index_from_height_key(key: &[u8]) -> Option<BallotIndex> {
    let start = keys::KeyPrefix::BallotByHeight.as_bytes().len() + 8;
    key.get(start..start + 32)?.try_into().ok()
}
