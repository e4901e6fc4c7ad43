//! Driving Ports (API - Inbound)

use crate::domain::{
    Ballot, BallotIndex, Chain, ChainParams, CrosschainFlags, FundMigrationRecord, ObserverId,
    ObserverSet, SigningKey,
};
use crate::engine::{CastVote, VoteOutcome};
use crate::error::ObserverResult;
use shared_types::{BlockContext, ChainId};
use std::collections::BTreeSet;

/// Primary Observer API
///
/// Governance operations mutate the observer set, chain registry, flags and
/// signing keys. Each call is one atomic transition.
pub trait ObserverApi: Send + Sync {
    /// Cast a standalone vote (outside any cross-chain message)
    fn cast_vote(&self, request: CastVote, ctx: BlockContext) -> ObserverResult<VoteOutcome>;

    /// Replace the whole observer set
    fn set_observer_set(&self, observers: Vec<ObserverId>) -> ObserverResult<()>;

    fn add_observer(&self, observer: ObserverId) -> ObserverResult<()>;

    /// Swap one observer for another, keeping its position
    fn replace_observer(&self, old: ObserverId, new: ObserverId) -> ObserverResult<()>;

    /// Register a chain with its initial params
    fn register_chain(&self, chain: Chain, params: ChainParams) -> ObserverResult<()>;

    fn update_chain_params(&self, params: ChainParams) -> ObserverResult<()>;

    fn set_crosschain_flags(&self, flags: CrosschainFlags) -> ObserverResult<()>;

    /// Add a key to the history; `make_current` also makes it the active key
    fn register_signing_key(&self, key: SigningKey, make_current: bool) -> ObserverResult<()>;

    /// Promote a key from the history to current
    fn activate_signing_key(&self, pubkey: &str) -> ObserverResult<()>;

    /// Drop finalized ballots outside the retention window
    fn prune_ballots(&self, current_height: u64) -> ObserverResult<usize>;

    fn get_ballot(&self, index: &BallotIndex) -> ObserverResult<Option<Ballot>>;

    fn observer_set(&self) -> ObserverResult<ObserverSet>;

    fn chain_params(&self, chain_id: ChainId) -> ObserverResult<Option<ChainParams>>;

    fn current_signing_key(&self) -> ObserverResult<Option<SigningKey>>;

    fn pending_nonces(&self, signing_key: &str, chain_id: ChainId) -> ObserverResult<BTreeSet<u64>>;

    fn fund_migration(&self, chain_id: ChainId) -> ObserverResult<Option<FundMigrationRecord>>;
}
