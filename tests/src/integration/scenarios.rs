//! # End-to-End CCTX Scenarios
//!
//! Four observers at a 66% threshold: quorum is three votes.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use shared_types::U256;
    use xc_01_observer::{ObserverApi, SigningKey};
    use xc_02_crosschain::{
        CctxStatus, CrossChainApi, CrossChainError, CrossChainEvent, ReceiveStatus,
    };

    // =============================================================================
    // SCENARIO A: inbound quorum
    // =============================================================================

    #[test]
    fn test_scenario_a_inbound_quorum_reserves_nonce() {
        let mut net = TestNetwork::new(4, 66);
        let msg = inbound_msg("0xa1", ETH, 1_000);
        let voters = net.observers.clone();

        assert_eq!(net.vote_inbound_by(&msg, &voters[..2]), None);
        assert!(net.crosschain.list_cctxs().unwrap().is_empty());

        let index = net
            .vote_inbound_by(&msg, &voters[2..3])
            .expect("third vote reaches quorum");
        let cctx = net.cctx(&index);
        assert_eq!(cctx.cctx_status(), CctxStatus::PendingOutbound);
        assert_eq!(cctx.outbound.nonce, Some(0));
        assert_eq!(net.pending_nonces(ETH), vec![0]);

        let signer_view = net.crosschain.list_pending_cctxs(SIGNING_KEY, ETH).unwrap();
        assert_eq!(signer_view.len(), 1);
        assert_eq!(signer_view[0].index, index);
    }

    // =============================================================================
    // SCENARIO B + C: failed outbound reverts, failed revert aborts
    // =============================================================================

    #[test]
    fn test_scenario_b_and_c_revert_then_abort() {
        let mut net = TestNetwork::new(4, 66);
        let voters = net.observers.clone();
        let index = net
            .vote_inbound_by(&inbound_msg("0xb1", ETH, 1_000), &voters[..3])
            .unwrap();
        let cctx = net.cctx(&index);
        let n = cctx.outbound.nonce.unwrap();

        net.vote_outbound_by(
            &outbound_msg(&cctx, ReceiveStatus::Failed, U256::zero()),
            &voters[..3],
        );
        let reverting = net.cctx(&index);
        assert_eq!(reverting.cctx_status(), CctxStatus::PendingRevert);
        let revert = reverting.revert_outbound.as_ref().unwrap();
        assert_eq!(revert.receiver, reverting.inbound.sender);
        assert_eq!(revert.nonce, Some(n + 1));
        assert_eq!(net.pending_nonces(ETH), vec![n + 1]);

        net.vote_outbound_by(
            &outbound_msg(&reverting, ReceiveStatus::Failed, U256::zero()),
            &voters[..3],
        );
        let aborted = net.cctx(&index);
        assert_eq!(aborted.cctx_status(), CctxStatus::Aborted);
        assert!(!aborted.status.status_message.is_empty());
        assert!(net.pending_nonces(ETH).is_empty());
        assert_eq!(aborted.outbound_params().count(), 2);
    }

    // =============================================================================
    // SCENARIO D: value mismatch
    // =============================================================================

    #[test]
    fn test_scenario_d_value_mismatch_keeps_pending_outbound() {
        let mut net = TestNetwork::new(4, 66);
        let voters = net.observers.clone();
        let index = net
            .vote_inbound_by(&inbound_msg("0xd1", ETH, 1_000), &voters[..3])
            .unwrap();
        let cctx = net.cctx(&index);
        let msg = outbound_msg(&cctx, ReceiveStatus::Success, U256::from(999u64));

        net.vote_outbound_by(&msg, &voters[..2]);
        let mut last = msg.clone();
        last.creator = voters[2].clone();
        let ctx = net.next_block();
        let err = net.crosschain.vote_outbound(ctx, last).unwrap_err();
        assert!(matches!(err, CrossChainError::ValueMismatch { .. }));

        let after = net.cctx(&index);
        assert_eq!(after.cctx_status(), CctxStatus::PendingOutbound);
        assert_eq!(after, cctx);
        assert_eq!(net.pending_nonces(ETH), vec![0]);
    }

    // =============================================================================
    // SCENARIO E: concurrent migrations
    // =============================================================================

    #[test]
    fn test_scenario_e_second_migration_rejected() {
        let mut net = TestNetwork::new(4, 66);
        net.observer
            .register_signing_key(SigningKey::new("tss-key-2", 500, 510), false)
            .unwrap();

        let ctx = net.next_block();
        let first = net
            .crosschain
            .migrate_funds(ctx, BTC, U256::from(50_000_000u64))
            .unwrap();
        let ctx = net.next_block();
        assert_eq!(
            net.crosschain.migrate_funds(ctx, BTC, U256::from(1u64)),
            Err(CrossChainError::MigrationInProgress(BTC))
        );

        // Once mined the record clears; the old key has nothing pending.
        let voters = net.observers.clone();
        let cctx = net.cctx(&first);
        net.vote_outbound_by(
            &outbound_msg(&cctx, ReceiveStatus::Success, U256::from(50_000_000u64)),
            &voters[..3],
        );
        assert_eq!(net.cctx(&first).cctx_status(), CctxStatus::OutboundMined);
        assert!(net.observer.fund_migration(BTC).unwrap().is_none());
        assert!(net.pending_nonces(BTC).is_empty());
    }

    // =============================================================================
    // HAPPY PATH + SIDE EFFECTS
    // =============================================================================

    #[test]
    fn test_mined_outbound_funds_pool_and_publishes_events() {
        let mut net = TestNetwork::new(4, 66);
        let voters = net.observers.clone();
        let index = net
            .vote_inbound_by(&inbound_msg("0xf1", ETH, 1_000), &voters[..3])
            .unwrap();
        let cctx = net.cctx(&index);
        net.vote_outbound_by(
            &outbound_msg(&cctx, ReceiveStatus::Success, U256::from(1_000u64)),
            &voters[..3],
        );

        assert_eq!(net.cctx(&index).cctx_status(), CctxStatus::OutboundMined);
        // (50_000 - 21_000) * 30 * 95 / 100
        assert_eq!(net.pool.balance(ETH), U256::from(826_500u64));

        let transitions: Vec<CctxStatus> = net
            .events
            .events()
            .into_iter()
            .filter_map(|e| match e {
                CrossChainEvent::StatusChanged { to, .. } => Some(to),
                _ => None,
            })
            .collect();
        assert_eq!(
            transitions,
            vec![CctxStatus::PendingOutbound, CctxStatus::OutboundMined]
        );
    }

    #[test]
    fn test_late_outbound_vote_is_rejected() {
        let mut net = TestNetwork::new(4, 66);
        let voters = net.observers.clone();
        let index = net
            .vote_inbound_by(&inbound_msg("0xg1", ETH, 1_000), &voters[..3])
            .unwrap();
        let cctx = net.cctx(&index);
        let msg = outbound_msg(&cctx, ReceiveStatus::Success, U256::from(1_000u64));
        net.vote_outbound_by(&msg, &voters[..3]);

        let mut late = msg;
        late.creator = voters[3].clone();
        let ctx = net.next_block();
        assert!(matches!(
            net.crosschain.vote_outbound(ctx, late),
            Err(CrossChainError::NonceMismatch { .. })
        ));
    }
}
