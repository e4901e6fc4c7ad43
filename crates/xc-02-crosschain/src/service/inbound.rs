//! # Cross-Chain Service - Inbound Votes
//!
//! Observer votes on external deposits. The finalizing vote creates the CCTX
//! and executes the deposit on the host chain.

use super::helpers::{assign_nonce, external_chain, mark_current_executed, transition};
use super::*;
use crate::algorithms::resolve_destination;
use crate::domain::{validate_cctx, CctxStatus, FinalizedInbound, TxFinalizationStatus};
use crate::events::CrossChainEvent;
use crate::ports::outbound::DepositRequest;
use tracing::{info, warn};
use xc_01_observer::store::registry;
use xc_01_observer::{BallotStatus, CastVote, ObservationType, Vote};

impl<S: KeyValueStore> CrossChainService<S> {
    pub(crate) fn apply_vote_inbound<K: KeyValueStore + ?Sized>(
        &self,
        store: &mut K,
        effects: &mut Effects,
        ctx: BlockContext,
        msg: &MsgVoteInbound,
    ) -> CrossChainResult<VoteReceipt> {
        msg.validate_basic()?;
        if !registry::get_crosschain_flags(store)?.is_inbound_enabled {
            return Err(CrossChainError::InboundDisabled);
        }
        external_chain(store, msg.sender_chain_id)?;
        if msg.receiver_chain_id != self.config.host_chain_id {
            external_chain(store, msg.receiver_chain_id)?;
        }
        let signing_key = registry::current_signing_key(store)?;
        let finalized =
            cctx::is_inbound_finalized(store, msg.sender_chain_id, &msg.inbound_hash, msg.event_index)?;
        if finalized {
            return Err(CrossChainError::InboundAlreadyFinalized {
                chain_id: msg.sender_chain_id,
                inbound_hash: msg.inbound_hash.clone(),
            });
        }

        let ballot_index = msg.digest();
        let outcome = self.engine.cast_vote(
            store,
            CastVote {
                ballot_index,
                observation_type: ObservationType::Inbound,
                chain_id: msg.sender_chain_id,
                voter: msg.creator.clone(),
                vote: Vote::Yes,
            },
            ctx.height,
        )?;
        if outcome.is_new {
            effects.emit(CrossChainEvent::BallotCreated {
                ballot_index,
                observation_type: ObservationType::Inbound,
                chain_id: msg.sender_chain_id,
            });
        }
        let mut receipt = VoteReceipt {
            ballot_index,
            is_new_ballot: outcome.is_new,
            finalized: outcome.finalized,
            cctx_index: None,
            cctx_status: None,
        };
        if !outcome.finalized {
            return Ok(receipt);
        }

        cctx::set_finalized_inbound(
            store,
            &FinalizedInbound {
                chain_id: msg.sender_chain_id,
                inbound_hash: msg.inbound_hash.clone(),
                event_index: msg.event_index,
                finalized_height: ctx.height,
            },
        )?;
        tracker_store::remove_inbound_tracker(store, msg.sender_chain_id, &msg.inbound_hash)?;

        if outcome.ballot.status == BallotStatus::FinalizedFailure {
            warn!(
                "[xc-02] inbound ballot {} finalized as failure, no cctx created",
                outcome.ballot.index_hex()
            );
            return Ok(receipt);
        }
        if cctx::cctx_exists(store, &ballot_index)? {
            return Err(CrossChainError::CctxAlreadyExists(
                shared_types::hash_to_hex(&ballot_index),
            ));
        }

        let mut record = CrossChainTx::from_inbound(msg, ballot_index, &signing_key.pubkey, ctx);
        effects.emit(CrossChainEvent::InboundFinalized {
            cctx_index: record.index,
            sender_chain_id: msg.sender_chain_id,
            inbound_hash: msg.inbound_hash.clone(),
        });
        self.execute_inbound(store, effects, ctx, &mut record)?;

        validate_cctx(&record)?;
        cctx::set_cctx(store, &record)?;
        receipt.cctx_index = Some(record.index);
        receipt.cctx_status = Some(record.cctx_status());
        Ok(receipt)
    }

    /// Deposits the inbound value and settles the first status of `record`.
    fn execute_inbound<K: KeyValueStore + ?Sized>(
        &self,
        store: &mut K,
        effects: &mut Effects,
        ctx: BlockContext,
        record: &mut CrossChainTx,
    ) -> CrossChainResult<()> {
        let to_host = record.outbound.receiver_chain_id == self.config.host_chain_id;
        let (receiver, payload) = if to_host {
            match resolve_destination(record) {
                Ok(dest) => (dest.receiver, dest.payload),
                Err(e) => {
                    mark_current_executed(record);
                    return transition(record, effects, CctxStatus::Aborted, e.to_string(), ctx);
                }
            }
        } else {
            (record.outbound.receiver.clone(), Vec::new())
        };

        let request = DepositRequest {
            cctx_index: record.index,
            sender: record.inbound.sender.clone(),
            sender_chain_id: record.inbound.sender_chain_id,
            receiver: receiver.clone(),
            amount: record.inbound.amount,
            coin_type: record.inbound.coin_type,
            asset: record.inbound.asset.clone(),
            payload,
            protocol_version: record.protocol_version,
        };

        match self.fungible.deposit_and_call(&request) {
            Ok(deposit) if to_host => {
                let outbound = &mut record.outbound;
                outbound.receiver = receiver;
                outbound.hash = deposit.tx_hash;
                outbound.observed_external_height = ctx.height;
                outbound.finalization_status = TxFinalizationStatus::Executed;
                transition(
                    record,
                    effects,
                    CctxStatus::OutboundMined,
                    "deposit executed on host chain",
                    ctx,
                )
            }
            Ok(_) => {
                assign_nonce(store, effects, record)?;
                transition(
                    record,
                    effects,
                    CctxStatus::PendingOutbound,
                    "awaiting outbound",
                    ctx,
                )
            }
            Err(e) if e.kind.should_revert() => {
                if let Err(revert_err) = record.add_revert_outbound(self.config.revert_gas_limit) {
                    mark_current_executed(record);
                    return transition(
                        record,
                        effects,
                        CctxStatus::Aborted,
                        format!("{e}; {revert_err}"),
                        ctx,
                    );
                }
                assign_nonce(store, effects, record)?;
                info!(
                    "[xc-02] deposit for cctx {} reverted to {}",
                    record.index_hex(),
                    record.revert_receiver()
                );
                transition(record, effects, CctxStatus::PendingRevert, e.to_string(), ctx)
            }
            Err(e) => {
                mark_current_executed(record);
                transition(record, effects, CctxStatus::Aborted, e.to_string(), ctx)
            }
        }
    }
}
