//! # Domain Invariants
//!
//! Rules every persisted CCTX satisfies. The state machine checks them before
//! writing a record.

use super::entities::CrossChainTx;
use super::errors::{CrossChainError, CrossChainResult};
use super::value_objects::CctxStatus;

/// Invariant: a revert exists only after the original outbound executed.
pub fn invariant_revert_follows_executed(cctx: &CrossChainTx) -> bool {
    cctx.revert_outbound.is_none() || cctx.outbound.is_executed()
}

/// Invariant: the revert goes back to the sender chain.
pub fn invariant_revert_targets_sender_chain(cctx: &CrossChainTx) -> bool {
    cctx.revert_outbound
        .as_ref()
        .map_or(true, |r| r.receiver_chain_id == cctx.inbound.sender_chain_id)
}

/// Invariant: a pending outbound state has a reserved nonce on its current record.
pub fn invariant_pending_outbound_has_nonce(cctx: &CrossChainTx) -> bool {
    !cctx.cctx_status().is_pending_outbound() || cctx.current_outbound().nonce.is_some()
}

/// Invariant: success states have an executed current record.
pub fn invariant_success_is_executed(cctx: &CrossChainTx) -> bool {
    match cctx.cctx_status() {
        CctxStatus::OutboundMined | CctxStatus::Reverted => cctx.current_outbound().is_executed(),
        CctxStatus::PendingInbound
        | CctxStatus::PendingOutbound
        | CctxStatus::PendingRevert
        | CctxStatus::Aborted => true,
    }
}

/// Invariant: terminal records explain themselves.
pub fn invariant_terminal_has_message(cctx: &CrossChainTx) -> bool {
    !cctx.cctx_status().is_terminal() || !cctx.status.status_message.is_empty()
}

/// Checks every invariant, naming the first one violated.
pub fn validate_cctx(cctx: &CrossChainTx) -> CrossChainResult<()> {
    let checks: [(&str, fn(&CrossChainTx) -> bool); 5] = [
        ("revert before original executed", invariant_revert_follows_executed),
        ("revert not aimed at sender chain", invariant_revert_targets_sender_chain),
        ("pending outbound without nonce", invariant_pending_outbound_has_nonce),
        ("success state with unexecuted outbound", invariant_success_is_executed),
        ("terminal state without status message", invariant_terminal_has_message),
    ];
    for (name, check) in checks {
        if !check(cctx) {
            return Err(CrossChainError::InvariantViolation(format!(
                "cctx {}: {}",
                cctx.index_hex(),
                name
            )));
        }
    }
    Ok(())
}
