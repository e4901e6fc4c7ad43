//! # Domain Entities
//!
//! The cross-chain transaction (CCTX) record.
//!
//! A CCTX carries one original outbound and at most one revert outbound. The
//! two-slot layout makes "at most two outbound records" and "never revert a
//! revert" structural.

use super::errors::{CrossChainError, CrossChainResult};
use super::messages::{MsgVoteInbound, MsgVoteOutbound};
use super::value_objects::{
    CctxStatus, CoinType, ProtocolVersion, RevertOptions, TxFinalizationStatus,
};
use serde::{Deserialize, Serialize};
use shared_types::{hash_to_hex, BlockContext, ChainId, Hash, U256};
use xc_01_observer::BallotStatus;

/// Where the value came from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundParams {
    /// Sender on the sender chain.
    pub sender: String,
    /// Sender chain.
    pub sender_chain_id: ChainId,
    /// Originating account (defaults to the sender).
    pub tx_origin: String,
    /// Asset contract on the sender chain (empty for gas).
    pub asset: String,
    /// Amount deposited.
    pub amount: U256,
    /// Asset kind.
    pub coin_type: CoinType,
    /// Observed inbound transaction hash.
    pub observed_hash: String,
    /// External block height of the inbound.
    pub observed_external_height: u64,
    /// Log index of the inbound event.
    pub event_index: u64,
    /// Host height at which the inbound ballot finalized.
    pub finalized_height: u64,
    /// Inbound ballot.
    pub ballot_index: Hash,
}

/// One outbound attempt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundParams {
    /// Destination address.
    pub receiver: String,
    /// Destination chain.
    pub receiver_chain_id: ChainId,
    /// Amount to deliver.
    pub amount: U256,
    /// Gas limit granted to the signer.
    pub gas_limit: u64,
    /// Reserved nonce; `None` until reserved.
    pub nonce: Option<u64>,
    /// Signing key that owns the nonce.
    pub signing_key: String,
    /// Observed outbound hash.
    pub hash: String,
    /// Outbound ballot, once finalized.
    pub ballot_index: Option<Hash>,
    /// Gas consumed.
    pub gas_used: u64,
    /// Effective gas price paid.
    pub effective_gas_price: U256,
    /// Effective gas limit of the mined transaction.
    pub effective_gas_limit: u64,
    /// External block height of the outbound.
    pub observed_external_height: u64,
    /// Observation finalization.
    pub finalization_status: TxFinalizationStatus,
}

impl OutboundParams {
    /// A fresh, unobserved outbound.
    pub fn new(
        receiver: impl Into<String>,
        receiver_chain_id: ChainId,
        amount: U256,
        gas_limit: u64,
        signing_key: impl Into<String>,
    ) -> Self {
        Self {
            receiver: receiver.into(),
            receiver_chain_id,
            amount,
            gas_limit,
            nonce: None,
            signing_key: signing_key.into(),
            hash: String::new(),
            ballot_index: None,
            gas_used: 0,
            effective_gas_price: U256::zero(),
            effective_gas_limit: 0,
            observed_external_height: 0,
            finalization_status: TxFinalizationStatus::NotFinalized,
        }
    }

    /// True once the outbound observation finalized.
    pub fn is_executed(&self) -> bool {
        self.finalization_status == TxFinalizationStatus::Executed
    }
}

/// Status with audit message and timestamps.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    /// Lifecycle state.
    pub status: CctxStatus,
    /// Human-readable reason for the latest change.
    pub status_message: String,
    /// Creation timestamp.
    pub created_timestamp: u64,
    /// Last change timestamp.
    pub last_update_timestamp: u64,
}

/// Cross-chain transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossChainTx {
    /// Content-addressed index (inbound ballot digest).
    pub index: Hash,
    /// Observer whose vote created the record.
    pub creator: String,
    /// Message relayed to the destination.
    pub relayed_message: String,
    /// Inbound side.
    pub inbound: InboundParams,
    /// Original outbound.
    pub outbound: OutboundParams,
    /// Revert outbound, if the original failed.
    pub revert_outbound: Option<OutboundParams>,
    /// Lifecycle status.
    pub status: Status,
    /// Gateway protocol version.
    pub protocol_version: ProtocolVersion,
    /// V2 revert options.
    pub revert_options: RevertOptions,
}

impl CrossChainTx {
    /// Builds a `PendingInbound` CCTX from a finalized inbound vote.
    pub fn from_inbound(
        msg: &MsgVoteInbound,
        index: Hash,
        signing_key: &str,
        ctx: BlockContext,
    ) -> Self {
        let tx_origin = if msg.tx_origin.is_empty() {
            msg.sender.clone()
        } else {
            msg.tx_origin.clone()
        };
        Self {
            index,
            creator: msg.creator.to_string(),
            relayed_message: msg.message.clone(),
            inbound: InboundParams {
                sender: msg.sender.clone(),
                sender_chain_id: msg.sender_chain_id,
                tx_origin,
                asset: msg.asset.clone(),
                amount: msg.amount,
                coin_type: msg.coin_type,
                observed_hash: msg.inbound_hash.clone(),
                observed_external_height: msg.inbound_block_height,
                event_index: msg.event_index,
                finalized_height: ctx.height,
                ballot_index: index,
            },
            outbound: OutboundParams::new(
                msg.receiver.clone(),
                msg.receiver_chain_id,
                msg.amount,
                msg.gas_limit,
                signing_key,
            ),
            revert_outbound: None,
            status: Status {
                status: CctxStatus::PendingInbound,
                status_message: String::new(),
                created_timestamp: ctx.timestamp,
                last_update_timestamp: ctx.timestamp,
            },
            protocol_version: msg.protocol_version,
            revert_options: msg.revert_options.clone(),
        }
    }

    /// `0x`-prefixed hex index.
    pub fn index_hex(&self) -> String {
        hash_to_hex(&self.index)
    }

    /// Current lifecycle state.
    pub fn cctx_status(&self) -> CctxStatus {
        self.status.status
    }

    /// The outbound currently in flight (revert if present).
    pub fn current_outbound(&self) -> &OutboundParams {
        self.revert_outbound.as_ref().unwrap_or(&self.outbound)
    }

    /// Mutable access to the outbound currently in flight.
    pub fn current_outbound_mut(&mut self) -> &mut OutboundParams {
        match &mut self.revert_outbound {
            Some(revert) => revert,
            None => &mut self.outbound,
        }
    }

    /// True if the current outbound is the revert.
    pub fn is_current_outbound_revert(&self) -> bool {
        self.revert_outbound.is_some()
    }

    /// All outbound records, original first.
    pub fn outbound_params(&self) -> impl Iterator<Item = &OutboundParams> {
        std::iter::once(&self.outbound).chain(self.revert_outbound.as_ref())
    }

    /// Receiver of reverted funds: the V2 revert address if set, else the sender.
    pub fn revert_receiver(&self) -> String {
        match (self.protocol_version, &self.revert_options.revert_address) {
            (ProtocolVersion::V2, Some(addr)) if !addr.is_empty() => addr.clone(),
            _ => self.inbound.sender.clone(),
        }
    }

    /// Appends the revert outbound and marks the original `Executed`.
    ///
    /// The revert goes to the sender chain with the current amount, the given
    /// gas limit and the current signing key. Its nonce is unassigned.
    pub fn add_revert_outbound(&mut self, gas_limit: u64) -> CrossChainResult<()> {
        if self.is_current_outbound_revert() {
            return Err(CrossChainError::CannotRevert(
                "cannot revert a revert tx".to_string(),
            ));
        }
        let revert = OutboundParams::new(
            self.revert_receiver(),
            self.inbound.sender_chain_id,
            self.outbound.amount,
            gas_limit,
            self.outbound.signing_key.clone(),
        );
        self.outbound.finalization_status = TxFinalizationStatus::Executed;
        self.revert_outbound = Some(revert);
        Ok(())
    }

    /// Copies an outbound observation onto the current record.
    ///
    /// Unless the ballot finalized as failure, the observed value must equal
    /// the amount sent.
    pub fn record_outbound_observation(
        &mut self,
        msg: &MsgVoteOutbound,
        ballot_status: BallotStatus,
    ) -> CrossChainResult<()> {
        let current = self.current_outbound_mut();
        if ballot_status != BallotStatus::FinalizedFailure && msg.value_received != current.amount {
            return Err(CrossChainError::ValueMismatch {
                expected: current.amount,
                received: msg.value_received,
            });
        }
        current.hash = msg.observed_outbound_hash.clone();
        current.gas_used = msg.observed_outbound_gas_used;
        current.effective_gas_price = msg.observed_outbound_effective_gas_price;
        current.effective_gas_limit = msg.observed_outbound_effective_gas_limit;
        current.observed_external_height = msg.observed_outbound_block_height;
        Ok(())
    }

    /// Moves to `next`, recording the reason.
    pub fn set_status(
        &mut self,
        next: CctxStatus,
        message: impl Into<String>,
        timestamp: u64,
    ) -> CrossChainResult<()> {
        let from = self.status.status;
        if !from.can_transition_to(next) {
            return Err(CrossChainError::InvalidStatusTransition { from, to: next });
        }
        self.status.status = next;
        self.status.status_message = message.into();
        self.status.last_update_timestamp = timestamp;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::ReceiveStatus;

    fn sample() -> CrossChainTx {
        let msg = MsgVoteInbound {
            creator: "obs-0".into(),
            sender: "0xsender".into(),
            sender_chain_id: ChainId(1),
            tx_origin: String::new(),
            receiver: "0xreceiver".into(),
            receiver_chain_id: ChainId(56),
            amount: U256::from(1_000u64),
            message: String::new(),
            inbound_hash: "0xin".into(),
            inbound_block_height: 100,
            gas_limit: 21_000,
            coin_type: CoinType::Gas,
            asset: String::new(),
            event_index: 0,
            protocol_version: ProtocolVersion::V1,
            revert_options: RevertOptions::default(),
        };
        CrossChainTx::from_inbound(&msg, msg.digest(), "key-1", BlockContext::new(10, 1_000))
    }

    fn outbound_vote(value: u64) -> MsgVoteOutbound {
        MsgVoteOutbound {
            creator: "obs-0".into(),
            cctx_index: [0; 32],
            observed_outbound_hash: "0xout".into(),
            observed_outbound_block_height: 77,
            observed_outbound_gas_used: 20_000,
            observed_outbound_effective_gas_price: U256::from(5),
            observed_outbound_effective_gas_limit: 21_000,
            value_received: U256::from(value),
            status: ReceiveStatus::Success,
            outbound_chain_id: ChainId(56),
            outbound_nonce: 0,
            coin_type: CoinType::Gas,
        }
    }

    #[test]
    fn test_from_inbound_defaults_tx_origin_to_sender() {
        let cctx = sample();
        assert_eq!(cctx.inbound.tx_origin, "0xsender");
        assert_eq!(cctx.cctx_status(), CctxStatus::PendingInbound);
        assert_eq!(cctx.outbound.nonce, None);
        assert_eq!(cctx.outbound.amount, U256::from(1_000u64));
        assert_eq!(cctx.inbound.ballot_index, cctx.index);
    }

    #[test]
    fn test_add_revert_outbound() {
        let mut cctx = sample();
        cctx.add_revert_outbound(50_000).unwrap();
        let revert = cctx.current_outbound();
        assert_eq!(revert.receiver, "0xsender");
        assert_eq!(revert.receiver_chain_id, ChainId(1));
        assert_eq!(revert.amount, U256::from(1_000u64));
        assert_eq!(revert.gas_limit, 50_000);
        assert_eq!(revert.signing_key, "key-1");
        assert!(cctx.outbound.is_executed());
        assert_eq!(cctx.outbound_params().count(), 2);
    }

    #[test]
    fn test_cannot_revert_a_revert() {
        let mut cctx = sample();
        cctx.add_revert_outbound(1).unwrap();
        assert!(matches!(
            cctx.add_revert_outbound(1),
            Err(CrossChainError::CannotRevert(_))
        ));
        assert_eq!(cctx.outbound_params().count(), 2);
    }

    #[test]
    fn test_v2_revert_address_used() {
        let mut cctx = sample();
        cctx.protocol_version = ProtocolVersion::V2;
        cctx.revert_options.revert_address = Some("0xrefund".into());
        cctx.add_revert_outbound(1).unwrap();
        assert_eq!(cctx.current_outbound().receiver, "0xrefund");

        // Ignored under V1
        let mut v1 = sample();
        v1.revert_options.revert_address = Some("0xrefund".into());
        assert_eq!(v1.revert_receiver(), "0xsender");
    }

    #[test]
    fn test_record_observation_checks_value_unless_failed() {
        let mut cctx = sample();
        assert!(matches!(
            cctx.record_outbound_observation(&outbound_vote(999), BallotStatus::FinalizedSuccess),
            Err(CrossChainError::ValueMismatch { .. })
        ));
        assert_eq!(cctx.outbound.hash, "");

        cctx.record_outbound_observation(&outbound_vote(0), BallotStatus::FinalizedFailure)
            .unwrap();
        assert_eq!(cctx.outbound.hash, "0xout");
        assert_eq!(cctx.outbound.gas_used, 20_000);
        assert_eq!(cctx.outbound.observed_external_height, 77);
    }

    #[test]
    fn test_set_status_rejects_illegal_transition() {
        let mut cctx = sample();
        cctx.set_status(CctxStatus::PendingOutbound, "", 2).unwrap();
        cctx.set_status(CctxStatus::OutboundMined, "done", 3).unwrap();
        let err = cctx.set_status(CctxStatus::Aborted, "late", 4).unwrap_err();
        assert_eq!(
            err,
            CrossChainError::InvalidStatusTransition {
                from: CctxStatus::OutboundMined,
                to: CctxStatus::Aborted
            }
        );
        assert_eq!(cctx.status.status_message, "done");
        assert_eq!(cctx.status.last_update_timestamp, 3);
    }

    #[test]
    fn test_persisted_record_round_trips() {
        let mut cctx = sample();
        cctx.add_revert_outbound(9).unwrap();
        let bytes = shared_types::encode_record(&cctx).unwrap();
        let decoded: CrossChainTx = shared_types::decode_record(&bytes).unwrap();
        assert_eq!(decoded, cctx);
    }
}
