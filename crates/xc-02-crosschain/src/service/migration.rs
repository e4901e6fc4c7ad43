//! # Cross-Chain Service - Fund Migration
//!
//! Moves a chain's custody funds from the current signing key to the newer
//! one through an ordinary `Cmd` CCTX, so the outbound path settles it.

use super::helpers::{assign_nonce, external_chain, transition};
use super::*;
use crate::domain::{
    validate_cctx, CctxStatus, CoinType, InboundParams, OutboundParams, ProtocolVersion,
    RevertOptions, Status,
};
use crate::events::CrossChainEvent;
use shared_types::DigestBuilder;
use tracing::info;
use xc_01_observer::store::{migrations, nonces, registry};
use xc_01_observer::{Chain, FundMigrationRecord, Network};

impl<S: KeyValueStore> CrossChainService<S> {
    pub(crate) fn apply_migrate_funds<K: KeyValueStore + ?Sized>(
        &self,
        store: &mut K,
        effects: &mut Effects,
        ctx: BlockContext,
        chain_id: ChainId,
        amount: U256,
    ) -> CrossChainResult<Hash> {
        if !registry::get_crosschain_flags(store)?.is_outbound_enabled {
            return Err(CrossChainError::OutboundDisabled);
        }
        let (chain, _) = external_chain(store, chain_id)?;
        if amount.is_zero() {
            return Err(CrossChainError::InvalidMessage(
                "migration amount must be positive".to_string(),
            ));
        }
        if migrations::get_fund_migration(store, chain_id)?.is_some() {
            return Err(CrossChainError::MigrationInProgress(chain_id));
        }
        let current = registry::current_signing_key(store)?;
        let newer = registry::newer_signing_key(store)?.ok_or(CrossChainError::NoNewSigningKey)?;
        let pending = nonces::list_pending(store, &current.pubkey, chain_id)?;
        if !pending.is_empty() {
            return Err(CrossChainError::PendingOutboundsExist {
                chain_id,
                count: pending.len(),
            });
        }

        let index = DigestBuilder::new("xc/migration")
            .chain(chain_id)
            .u256(&amount)
            .str(&current.pubkey)
            .str(&newer.pubkey)
            .u64(ctx.height)
            .finish();
        if cctx::cctx_exists(store, &index)? {
            return Err(CrossChainError::CctxAlreadyExists(shared_types::hash_to_hex(&index)));
        }

        let host = Chain::new(self.config.host_chain_id, "host", Network::Host);
        let sender = current.address_for(&host);
        let mut record = CrossChainTx {
            index,
            creator: String::new(),
            relayed_message: String::new(),
            inbound: InboundParams {
                sender: sender.clone(),
                sender_chain_id: self.config.host_chain_id,
                tx_origin: sender,
                asset: String::new(),
                amount,
                coin_type: CoinType::Cmd,
                observed_hash: String::new(),
                observed_external_height: 0,
                event_index: 0,
                finalized_height: ctx.height,
                ballot_index: index,
            },
            outbound: OutboundParams::new(
                newer.address_for(&chain),
                chain_id,
                amount,
                self.config.migration_gas_limit,
                current.pubkey.clone(),
            ),
            revert_outbound: None,
            status: Status {
                status: CctxStatus::PendingInbound,
                status_message: String::new(),
                created_timestamp: ctx.timestamp,
                last_update_timestamp: ctx.timestamp,
            },
            protocol_version: ProtocolVersion::V2,
            revert_options: RevertOptions::default(),
        };

        assign_nonce(store, effects, &mut record)?;
        transition(
            &mut record,
            effects,
            CctxStatus::PendingOutbound,
            "fund migration to new signing key",
            ctx,
        )?;
        validate_cctx(&record)?;
        cctx::set_cctx(store, &record)?;
        migrations::set_fund_migration(
            store,
            &FundMigrationRecord {
                chain_id,
                migration_cctx_index: index,
                created_height: ctx.height,
            },
        )?;

        info!(
            "[xc-02] fund migration of {} on chain {} started ({} -> {})",
            amount, chain_id, current.pubkey, newer.pubkey
        );
        effects.emit(CrossChainEvent::MigrationStarted {
            cctx_index: index,
            chain_id,
            amount,
        });
        Ok(index)
    }
}
