//! # Cross-Chain Service
//!
//! The CCTX state machine behind `CrossChainApi`.
//!
//! ## Architecture
//!
//! Every message is one transition:
//! 1. `Ledger::transact` opens a write overlay under the ledger lock
//! 2. The handler validates, votes and mutates records in the overlay,
//!    collecting events and the stability pool hook into `Effects`
//! 3. On `Ok` the overlay commits in one batch; on `Err` nothing is written
//! 4. After commit the pool is funded (best effort) and events are published

mod helpers;
mod inbound;
mod migration;
mod outbound;
mod queries;
mod trackers;

use crate::adapters::TracingEventPublisher;
use crate::config::CrossChainConfig;
use crate::domain::{
    CrossChainError, CrossChainResult, CrossChainTx, InboundTracker, MsgAddInboundTracker,
    MsgAddOutboundTracker, MsgVoteInbound, MsgVoteOutbound, OutboundTracker,
};
use crate::ports::inbound::{CrossChainApi, VoteReceipt};
use crate::ports::outbound::{EventPublisher, FungibleGateway, GasStabilityPool};
use crate::store::{cctx, trackers as tracker_store};
use helpers::Effects;
use shared_types::{BlockContext, ChainId, Hash, KeyValueStore, Ledger, StoreOverlay, U256};
use std::sync::Arc;
use xc_01_observer::BallotEngine;

/// Dependencies of `CrossChainService`
pub struct CrossChainDependencies<S: KeyValueStore> {
    /// Ledger shared with the observer service.
    pub ledger: Arc<Ledger<S>>,
    /// Ballot engine configured from the observer config.
    pub engine: BallotEngine,
    pub fungible: Arc<dyn FungibleGateway>,
    pub stability_pool: Arc<dyn GasStabilityPool>,
    /// Event sink; `None` logs events through `tracing`.
    pub events: Option<Arc<dyn EventPublisher>>,
}

/// The cross-chain service.
pub struct CrossChainService<S: KeyValueStore> {
    pub(crate) config: CrossChainConfig,
    pub(crate) engine: BallotEngine,
    pub(crate) ledger: Arc<Ledger<S>>,
    pub(crate) fungible: Arc<dyn FungibleGateway>,
    pub(crate) stability_pool: Arc<dyn GasStabilityPool>,
    pub(crate) events: Arc<dyn EventPublisher>,
}

impl<S: KeyValueStore> CrossChainService<S> {
    /// Create the service, rejecting an invalid configuration.
    pub fn new(deps: CrossChainDependencies<S>, config: CrossChainConfig) -> CrossChainResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            engine: deps.engine,
            ledger: deps.ledger,
            fungible: deps.fungible,
            stability_pool: deps.stability_pool,
            events: deps
                .events
                .unwrap_or_else(|| Arc::new(TracingEventPublisher)),
        })
    }

    pub fn config(&self) -> &CrossChainConfig {
        &self.config
    }

    pub fn ledger(&self) -> &Arc<Ledger<S>> {
        &self.ledger
    }

    /// Runs `f` as one transition and releases its effects after commit.
    pub(crate) fn run<T>(
        &self,
        f: impl FnOnce(&mut StoreOverlay<'_, S>, &mut Effects) -> CrossChainResult<T>,
    ) -> CrossChainResult<T> {
        let (value, effects) = self.ledger.transact(|store| {
            let mut effects = Effects::default();
            let value = f(store, &mut effects)?;
            Ok::<_, CrossChainError>((value, effects))
        })?;
        self.release_effects(effects);
        Ok(value)
    }
}

impl<S: KeyValueStore> CrossChainApi for CrossChainService<S> {
    fn vote_inbound(
        &self,
        ctx: BlockContext,
        msg: MsgVoteInbound,
    ) -> CrossChainResult<VoteReceipt> {
        self.run(|store, effects| self.apply_vote_inbound(store, effects, ctx, &msg))
    }

    fn vote_outbound(
        &self,
        ctx: BlockContext,
        msg: MsgVoteOutbound,
    ) -> CrossChainResult<VoteReceipt> {
        self.run(|store, effects| self.apply_vote_outbound(store, effects, ctx, &msg))
    }

    fn migrate_funds(
        &self,
        ctx: BlockContext,
        chain_id: ChainId,
        amount: U256,
    ) -> CrossChainResult<Hash> {
        self.run(|store, effects| self.apply_migrate_funds(store, effects, ctx, chain_id, amount))
    }

    fn add_outbound_tracker(&self, msg: MsgAddOutboundTracker) -> CrossChainResult<()> {
        self.run(|store, _| self.apply_add_outbound_tracker(store, &msg))
    }

    fn add_inbound_tracker(&self, msg: MsgAddInboundTracker) -> CrossChainResult<()> {
        self.run(|store, _| self.apply_add_inbound_tracker(store, &msg))
    }

    fn get_cctx(&self, index: &Hash) -> CrossChainResult<Option<CrossChainTx>> {
        self.ledger.read(|store| cctx::get_cctx(store, index))
    }

    fn list_cctxs(&self) -> CrossChainResult<Vec<CrossChainTx>> {
        self.ledger.read(|store| cctx::list_cctxs(store))
    }

    fn list_pending_cctxs(
        &self,
        signing_key: &str,
        chain_id: ChainId,
    ) -> CrossChainResult<Vec<CrossChainTx>> {
        self.ledger
            .read(|store| queries::pending_cctxs(store, signing_key, chain_id))
    }

    fn get_outbound_tracker(
        &self,
        signing_key: &str,
        chain_id: ChainId,
        nonce: u64,
    ) -> CrossChainResult<Option<OutboundTracker>> {
        self.ledger.read(|store| {
            tracker_store::get_outbound_tracker(store, signing_key, chain_id, nonce)
        })
    }

    fn list_outbound_trackers(
        &self,
        signing_key: &str,
        chain_id: ChainId,
    ) -> CrossChainResult<Vec<OutboundTracker>> {
        self.ledger
            .read(|store| tracker_store::list_outbound_trackers(store, signing_key, chain_id))
    }

    fn list_inbound_trackers(&self, chain_id: ChainId) -> CrossChainResult<Vec<InboundTracker>> {
        self.ledger
            .read(|store| tracker_store::list_inbound_trackers(store, chain_id))
    }

    fn is_inbound_finalized(
        &self,
        chain_id: ChainId,
        inbound_hash: &str,
        event_index: u64,
    ) -> CrossChainResult<bool> {
        self.ledger.read(|store| {
            cctx::is_inbound_finalized(store, chain_id, inbound_hash, event_index)
        })
    }
}
