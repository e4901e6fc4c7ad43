//! # Inbound Ports
//!
//! API trait defining what the cross-chain subsystem can do.

use crate::domain::{
    CctxStatus, CrossChainResult, CrossChainTx, InboundTracker, MsgAddInboundTracker,
    MsgAddOutboundTracker, MsgVoteInbound, MsgVoteOutbound, OutboundTracker,
};
use shared_types::{BlockContext, ChainId, Hash, U256};

/// Outcome of an inbound or outbound vote.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoteReceipt {
    /// Ballot the vote went to.
    pub ballot_index: Hash,
    /// True if this vote created the ballot.
    pub is_new_ballot: bool,
    /// True only for the vote that finalized the ballot.
    pub finalized: bool,
    /// CCTX touched by the vote, if any.
    pub cctx_index: Option<Hash>,
    /// CCTX status after the vote, if a CCTX was touched.
    pub cctx_status: Option<CctxStatus>,
}

/// Cross-chain API - inbound port.
///
/// Every mutating call is one atomic transition: an `Err` leaves no trace.
pub trait CrossChainApi: Send + Sync {
    /// Observer vote on an external deposit.
    fn vote_inbound(&self, ctx: BlockContext, msg: MsgVoteInbound)
        -> CrossChainResult<VoteReceipt>;

    /// Observer vote on the result of an outbound.
    fn vote_outbound(
        &self,
        ctx: BlockContext,
        msg: MsgVoteOutbound,
    ) -> CrossChainResult<VoteReceipt>;

    /// Move a chain's funds from the current signing key to the newer one.
    fn migrate_funds(&self, ctx: BlockContext, chain_id: ChainId, amount: U256)
        -> CrossChainResult<Hash>;

    /// Record a broadcast hash for a pending outbound.
    fn add_outbound_tracker(&self, msg: MsgAddOutboundTracker) -> CrossChainResult<()>;

    /// Record an inbound an observer saw but the network has not voted on.
    fn add_inbound_tracker(&self, msg: MsgAddInboundTracker) -> CrossChainResult<()>;

    /// Get CCTX by index.
    fn get_cctx(&self, index: &Hash) -> CrossChainResult<Option<CrossChainTx>>;

    /// All CCTXs, ordered by index.
    fn list_cctxs(&self) -> CrossChainResult<Vec<CrossChainTx>>;

    /// CCTXs the signer for (key, chain) still has to broadcast, by nonce.
    fn list_pending_cctxs(
        &self,
        signing_key: &str,
        chain_id: ChainId,
    ) -> CrossChainResult<Vec<CrossChainTx>>;

    /// Outbound tracker for (signing key, chain, nonce).
    fn get_outbound_tracker(
        &self,
        signing_key: &str,
        chain_id: ChainId,
        nonce: u64,
    ) -> CrossChainResult<Option<OutboundTracker>>;

    /// Outbound trackers the signer for (key, chain) has open, by nonce.
    fn list_outbound_trackers(
        &self,
        signing_key: &str,
        chain_id: ChainId,
    ) -> CrossChainResult<Vec<OutboundTracker>>;

    /// Inbound trackers for a chain.
    fn list_inbound_trackers(&self, chain_id: ChainId) -> CrossChainResult<Vec<InboundTracker>>;

    /// True if the external event already produced a CCTX.
    fn is_inbound_finalized(
        &self,
        chain_id: ChainId,
        inbound_hash: &str,
        event_index: u64,
    ) -> CrossChainResult<bool>;
}
