//! # Cross-Chain Service - Helper Methods
//!
//! Effects collected during a transition and steps shared by the handlers.

use super::*;
use crate::domain::{CctxStatus, TxFinalizationStatus};
use crate::events::CrossChainEvent;
use tracing::{debug, info, warn};
use xc_01_observer::store::{nonces, registry};
use xc_01_observer::{Chain, ChainParams, ObserverError, ObserverId};

/// Stability pool credit owed by a finalized outbound.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct PoolFunding {
    pub cctx_index: Hash,
    pub chain_id: ChainId,
    pub amount: U256,
}

/// Side effects of one transition, released only after commit.
#[derive(Debug, Default)]
pub(crate) struct Effects {
    pub events: Vec<CrossChainEvent>,
    pub pool_funding: Option<PoolFunding>,
}

impl Effects {
    pub fn emit(&mut self, event: CrossChainEvent) {
        self.events.push(event);
    }
}

/// Moves `cctx` to `next` and records the change.
pub(crate) fn transition(
    cctx: &mut CrossChainTx,
    effects: &mut Effects,
    next: CctxStatus,
    message: impl Into<String>,
    ctx: BlockContext,
) -> CrossChainResult<()> {
    let from = cctx.cctx_status();
    let message = message.into();
    cctx.set_status(next, message.clone(), ctx.timestamp)?;
    info!(
        "[xc-02] cctx {} {} -> {} ({})",
        cctx.index_hex(),
        from,
        next,
        message
    );
    effects.emit(CrossChainEvent::StatusChanged {
        cctx_index: cctx.index,
        from,
        to: next,
        message,
    });
    Ok(())
}

/// Marks the current outbound executed; used on every abort after an attempt.
pub(crate) fn mark_current_executed(cctx: &mut CrossChainTx) {
    cctx.current_outbound_mut().finalization_status = TxFinalizationStatus::Executed;
}

/// Reserves a nonce for the current outbound of `cctx` and maps it back.
pub(crate) fn assign_nonce<K: KeyValueStore + ?Sized>(
    store: &mut K,
    effects: &mut Effects,
    cctx: &mut CrossChainTx,
) -> CrossChainResult<u64> {
    let current = cctx.current_outbound();
    let signing_key = current.signing_key.clone();
    let chain_id = current.receiver_chain_id;

    let nonce = nonces::reserve_nonce(store, &signing_key, chain_id)?;
    nonces::set_nonce_to_cctx(store, &signing_key, chain_id, nonce, cctx.index)?;
    cctx.current_outbound_mut().nonce = Some(nonce);

    debug!(
        "[xc-02] cctx {} assigned nonce {} on chain {}",
        cctx.index_hex(),
        nonce,
        chain_id
    );
    effects.emit(CrossChainEvent::NonceReserved {
        cctx_index: cctx.index,
        signing_key,
        chain_id,
        nonce,
    });
    Ok(nonce)
}

/// Registered, supported chain; registry misses surface as `UnsupportedChain`.
pub(crate) fn supported_chain<K: KeyValueStore + ?Sized>(
    store: &K,
    chain_id: ChainId,
) -> CrossChainResult<(Chain, ChainParams)> {
    registry::supported_chain(store, chain_id).map_err(|e| match e {
        ObserverError::UnsupportedChain(id) => CrossChainError::UnsupportedChain(id),
        other => other.into(),
    })
}

/// Supported chain that is not the host.
pub(crate) fn external_chain<K: KeyValueStore + ?Sized>(
    store: &K,
    chain_id: ChainId,
) -> CrossChainResult<(Chain, ChainParams)> {
    let (chain, params) = supported_chain(store, chain_id)?;
    if !chain.is_external() {
        return Err(CrossChainError::UnsupportedChain(chain_id));
    }
    Ok((chain, params))
}

pub(crate) fn ensure_observer<K: KeyValueStore + ?Sized>(
    store: &K,
    reporter: &ObserverId,
) -> CrossChainResult<()> {
    if !registry::get_observer_set(store)?.contains(reporter) {
        return Err(CrossChainError::NotAnObserver(reporter.to_string()));
    }
    Ok(())
}

impl<S: KeyValueStore> CrossChainService<S> {
    /// Runs the post-commit hook and publishes events.
    pub(crate) fn release_effects(&self, mut effects: Effects) {
        if let Some(funding) = effects.pool_funding.take() {
            match self.stability_pool.fund(funding.chain_id, funding.amount) {
                Ok(()) => {
                    debug!(
                        "[xc-02] funded stability pool of chain {} with {}",
                        funding.chain_id, funding.amount
                    );
                    effects.emit(CrossChainEvent::GasPoolFunded {
                        cctx_index: funding.cctx_index,
                        chain_id: funding.chain_id,
                        amount: funding.amount,
                    });
                }
                Err(e) => {
                    warn!(
                        "[xc-02] stability pool funding for cctx {} failed: {}",
                        shared_types::hash_to_hex(&funding.cctx_index),
                        e
                    );
                    effects.emit(CrossChainEvent::GasPoolFundingFailed {
                        cctx_index: funding.cctx_index,
                        chain_id: funding.chain_id,
                        reason: e.to_string(),
                    });
                }
            }
        }
        for event in effects.events {
            self.events.publish(event);
        }
    }
}
