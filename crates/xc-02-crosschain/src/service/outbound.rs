//! # Cross-Chain Service - Outbound Votes
//!
//! Observer votes on the result of the current outbound record. The
//! finalizing vote settles the record and moves the CCTX on.

use super::helpers::{assign_nonce, mark_current_executed, transition, PoolFunding};
use super::*;
use crate::algorithms::remaining_gas_fees;
use crate::domain::{validate_cctx, CctxStatus};
use crate::events::CrossChainEvent;
use tracing::{info, warn};
use xc_01_observer::store::{migrations, nonces};
use xc_01_observer::{BallotStatus, CastVote, ObservationType};

impl<S: KeyValueStore> CrossChainService<S> {
    pub(crate) fn apply_vote_outbound<K: KeyValueStore + ?Sized>(
        &self,
        store: &mut K,
        effects: &mut Effects,
        ctx: BlockContext,
        msg: &MsgVoteOutbound,
    ) -> CrossChainResult<VoteReceipt> {
        msg.validate_basic()?;
        let mut record = cctx::get_cctx(store, &msg.cctx_index)?.ok_or_else(|| {
            CrossChainError::CctxNotFound(shared_types::hash_to_hex(&msg.cctx_index))
        })?;

        let current = record.current_outbound();
        let awaiting = record.cctx_status().is_pending_outbound() && !current.is_executed();
        if !awaiting || current.nonce != Some(msg.outbound_nonce) {
            return Err(CrossChainError::NonceMismatch {
                expected: current.nonce.filter(|_| awaiting),
                got: msg.outbound_nonce,
            });
        }
        if current.receiver_chain_id != msg.outbound_chain_id {
            return Err(CrossChainError::ChainMismatch {
                expected: current.receiver_chain_id,
                got: msg.outbound_chain_id,
            });
        }

        let ballot_index = msg.digest();
        let outcome = self.engine.cast_vote(
            store,
            CastVote {
                ballot_index,
                observation_type: ObservationType::Outbound,
                chain_id: msg.outbound_chain_id,
                voter: msg.creator.clone(),
                vote: msg.vote(),
            },
            ctx.height,
        )?;
        if outcome.is_new {
            effects.emit(CrossChainEvent::BallotCreated {
                ballot_index,
                observation_type: ObservationType::Outbound,
                chain_id: msg.outbound_chain_id,
            });
        }
        let mut receipt = VoteReceipt {
            ballot_index,
            is_new_ballot: outcome.is_new,
            finalized: outcome.finalized,
            cctx_index: Some(record.index),
            cctx_status: Some(record.cctx_status()),
        };
        if !outcome.finalized {
            return Ok(receipt);
        }

        let finalized = record.current_outbound().clone();
        record.current_outbound_mut().ballot_index = Some(ballot_index);
        record.record_outbound_observation(msg, outcome.ballot.status)?;

        match outcome.ballot.status {
            BallotStatus::FinalizedSuccess => self.settle_success(effects, ctx, &mut record)?,
            BallotStatus::FinalizedFailure => self.settle_failure(store, effects, ctx, &mut record)?,
            BallotStatus::Pending => {
                return Err(CrossChainError::InvariantViolation(format!(
                    "ballot {} reported finalized while pending",
                    outcome.ballot.index_hex()
                )))
            }
        }

        // The settled record's nonce is done; a fresh revert nonce stays pending.
        if let Some(nonce) = finalized.nonce {
            nonces::release_nonce(store, &finalized.signing_key, finalized.receiver_chain_id, nonce)?;
            tracker_store::remove_outbound_tracker(
                store,
                &finalized.signing_key,
                finalized.receiver_chain_id,
                nonce,
            )?;
        }
        if record.cctx_status().is_terminal() {
            self.clear_migration(store, &record)?;
        }

        validate_cctx(&record)?;
        cctx::set_cctx(store, &record)?;
        receipt.cctx_status = Some(record.cctx_status());
        Ok(receipt)
    }

    fn settle_success(
        &self,
        effects: &mut Effects,
        ctx: BlockContext,
        record: &mut CrossChainTx,
    ) -> CrossChainResult<()> {
        mark_current_executed(record);
        let current = record.current_outbound();
        if let Some(amount) = remaining_gas_fees(current, self.config.stability_pool_percent) {
            effects.pool_funding = Some(PoolFunding {
                cctx_index: record.index,
                chain_id: current.receiver_chain_id,
                amount,
            });
        }
        if record.is_current_outbound_revert() {
            transition(record, effects, CctxStatus::Reverted, "revert outbound mined", ctx)
        } else {
            transition(record, effects, CctxStatus::OutboundMined, "outbound mined", ctx)
        }
    }

    fn settle_failure<K: KeyValueStore + ?Sized>(
        &self,
        store: &mut K,
        effects: &mut Effects,
        ctx: BlockContext,
        record: &mut CrossChainTx,
    ) -> CrossChainResult<()> {
        match record.cctx_status() {
            CctxStatus::PendingOutbound => {
                if !record.inbound.coin_type.is_revertible() {
                    mark_current_executed(record);
                    let message =
                        format!("outbound failed, {:?} cctx cannot revert", record.inbound.coin_type);
                    return transition(record, effects, CctxStatus::Aborted, message, ctx);
                }
                if let Err(e) = record.add_revert_outbound(self.config.revert_gas_limit) {
                    mark_current_executed(record);
                    let message = format!("outbound failed; {e}");
                    return transition(record, effects, CctxStatus::Aborted, message, ctx);
                }
                assign_nonce(store, effects, record)?;
                info!(
                    "[xc-02] outbound of cctx {} failed, reverting to {}",
                    record.index_hex(),
                    record.revert_receiver()
                );
                transition(
                    record,
                    effects,
                    CctxStatus::PendingRevert,
                    "outbound failed, revert pending",
                    ctx,
                )
            }
            CctxStatus::PendingRevert => {
                mark_current_executed(record);
                warn!("[xc-02] revert outbound of cctx {} failed", record.index_hex());
                transition(
                    record,
                    effects,
                    CctxStatus::Aborted,
                    "outbound failed, revert failed",
                    ctx,
                )
            }
            status => Err(CrossChainError::InvalidStatusTransition {
                from: status,
                to: CctxStatus::PendingRevert,
            }),
        }
    }

    /// Drops the migration marker once its CCTX is settled.
    fn clear_migration<K: KeyValueStore + ?Sized>(
        &self,
        store: &mut K,
        record: &CrossChainTx,
    ) -> CrossChainResult<()> {
        let chain_id = record.outbound.receiver_chain_id;
        let Some(migration) = migrations::get_fund_migration(store, chain_id)? else {
            return Ok(());
        };
        if migration.migration_cctx_index == record.index {
            migrations::remove_fund_migration(store, chain_id)?;
            info!(
                "[xc-02] fund migration on chain {} settled as {}",
                chain_id,
                record.cctx_status()
            );
        }
        Ok(())
    }
}

