//! # Randomized Property Checks
//!
//! Seeded so failures reproduce.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};
    use shared_types::{decode_record, encode_record, ChainId, U256};
    use xc_01_observer::{CastVote, ObservationType, ObserverApi, Vote};
    use xc_02_crosschain::{
        validate_cctx, CctxStatus, CrossChainApi, CrossChainError, CrossChainTx, ReceiveStatus,
    };

    #[test]
    fn test_reserved_nonces_strictly_increase_per_chain() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut net = TestNetwork::new(3, 66);
        let voters = net.observers.clone();
        let mut seen: Vec<(ChainId, u64)> = Vec::new();

        for i in 0..40 {
            let chain = if rng.gen_bool(0.5) { ETH } else { BTC };
            let msg = inbound_msg(&format!("0xnonce-{i}"), chain, rng.gen_range(1..1_000_000));
            let index = net.vote_inbound_by(&msg, &voters[..2]).unwrap();
            let nonce = net.cctx(&index).outbound.nonce.unwrap();
            seen.push((chain, nonce));
        }

        for chain in [ETH, BTC] {
            let nonces: Vec<u64> = seen
                .iter()
                .filter(|(c, _)| *c == chain)
                .map(|(_, n)| *n)
                .collect();
            let expected: Vec<u64> = (0..nonces.len() as u64).collect();
            assert_eq!(nonces, expected, "chain {chain}");
        }
    }

    #[test]
    fn test_vote_order_does_not_change_outcome() {
        let mut rng = StdRng::seed_from_u64(11);
        for round in 0..20 {
            let mut net = TestNetwork::new(7, 66);
            let mut voters = net.observers.clone();
            voters.shuffle(&mut rng);
            // ceil(7 * 66 / 100) = 5
            let msg = inbound_msg(&format!("0xorder-{round}"), ETH, 10);
            assert_eq!(net.vote_inbound_by(&msg, &voters[..4]), None);
            let index = net.vote_inbound_by(&msg, &voters[4..5]).unwrap();
            assert_eq!(net.cctx(&index).cctx_status(), CctxStatus::PendingOutbound);
        }
    }

    #[test]
    fn test_outbound_history_is_bounded() {
        let mut rng = StdRng::seed_from_u64(23);
        let mut net = TestNetwork::new(3, 66);
        let voters = net.observers.clone();

        for i in 0..25 {
            let index = net
                .vote_inbound_by(&inbound_msg(&format!("0xhist-{i}"), ETH, 500), &voters[..2])
                .unwrap();
            loop {
                let cctx = net.cctx(&index);
                check_record(&cctx);
                if cctx.cctx_status().is_terminal() {
                    break;
                }
                let (status, value) = if rng.gen_bool(0.5) {
                    (ReceiveStatus::Success, cctx.current_outbound().amount)
                } else {
                    (ReceiveStatus::Failed, U256::zero())
                };
                net.vote_outbound_by(&outbound_msg(&cctx, status, value), &voters[..2]);
            }
        }
        assert!(net.pending_nonces(ETH).is_empty());
    }

    fn check_record(cctx: &CrossChainTx) {
        let count = cctx.outbound_params().count();
        assert!(count <= 2);
        if count == 2 {
            assert!(cctx.outbound.is_executed());
        }
        validate_cctx(cctx).unwrap();
    }

    #[test]
    fn test_finalized_ballot_never_changes() {
        let mut net = TestNetwork::new(5, 51);
        let voters = net.observers.clone();
        let ballot_index = [0x42; 32];
        let cast = |voter: usize, vote: Vote| CastVote {
            ballot_index,
            observation_type: ObservationType::Outbound,
            chain_id: ETH,
            voter: voters[voter].clone(),
            vote,
        };

        for voter in 0..3 {
            let ctx = net.next_block();
            net.observer.cast_vote(cast(voter, Vote::Yes), ctx).unwrap();
        }
        let finalized = net.observer.get_ballot(&ballot_index).unwrap().unwrap();
        assert!(finalized.is_finalized());

        for voter in 3..5 {
            let ctx = net.next_block();
            let outcome = net.observer.cast_vote(cast(voter, Vote::No), ctx).unwrap();
            assert!(!outcome.finalized);
        }
        let ctx = net.next_block();
        assert!(net.observer.cast_vote(cast(0, Vote::No), ctx).is_err());
        assert_eq!(net.observer.get_ballot(&ballot_index).unwrap().unwrap(), finalized);
    }

    #[test]
    fn test_persisted_cctx_round_trips() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut net = TestNetwork::new(3, 66);
        let voters = net.observers.clone();
        let amount = rng.gen_range(1..u64::MAX);
        let index = net
            .vote_inbound_by(&inbound_msg("0xround", BTC, amount), &voters[..2])
            .unwrap();
        let cctx = net.cctx(&index);
        net.vote_outbound_by(
            &outbound_msg(&cctx, ReceiveStatus::Failed, U256::zero()),
            &voters[..2],
        );

        let reverting = net.cctx(&index);
        let bytes = encode_record(&reverting).unwrap();
        let decoded: CrossChainTx = decode_record(&bytes).unwrap();
        assert_eq!(decoded, reverting);
    }

    #[test]
    fn test_storage_failures_are_all_or_nothing() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut net = TestNetwork::new(3, 66);
        let voters = net.observers.clone();

        for i in 0..15 {
            let msg = inbound_msg(&format!("0xfail-{i}"), ETH, 77);
            let fail = rng.gen_bool(0.4);
            net.vote_inbound_by(&msg, &voters[..1]);

            let before = net.crosschain.list_cctxs().unwrap().len();
            let nonces_before = net.pending_nonces(ETH);
            net.crosschain
                .ledger()
                .with_store_mut(|s| s.set_fail_writes(fail));

            let mut vote = msg.clone();
            vote.creator = voters[1].clone();
            let ctx = net.next_block();
            let result = net.crosschain.vote_inbound(ctx, vote.clone());
            net.crosschain
                .ledger()
                .with_store_mut(|s| s.set_fail_writes(false));

            if fail {
                assert!(matches!(result, Err(CrossChainError::Store(_))));
                assert_eq!(net.crosschain.list_cctxs().unwrap().len(), before);
                assert_eq!(net.pending_nonces(ETH), nonces_before);
                let ctx = net.next_block();
                assert!(net.crosschain.vote_inbound(ctx, vote).unwrap().finalized);
            } else {
                assert!(result.unwrap().finalized);
            }
            assert_eq!(net.crosschain.list_cctxs().unwrap().len(), before + 1);
        }
    }
}
