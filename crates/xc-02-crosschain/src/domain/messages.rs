//! # Messages
//!
//! Observer and signer submissions. Vote digests cover every observed field
//! except the submitting observer, so honest observers of the same event land
//! on the same ballot.

use super::errors::{CrossChainError, CrossChainResult};
use super::value_objects::{CoinType, ProtocolVersion, ReceiveStatus, RevertOptions};
use serde::{Deserialize, Serialize};
use shared_types::{ChainId, DigestBuilder, Hash, U256};
use xc_01_observer::{ObserverId, Vote};

/// Observer vote on an inbound deposit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgVoteInbound {
    /// Voting observer.
    pub creator: ObserverId,
    /// Sender on the sender chain.
    pub sender: String,
    /// Sender chain.
    pub sender_chain_id: ChainId,
    /// Originating account; empty means the sender.
    pub tx_origin: String,
    /// Receiver (V1: may be overridden by the message).
    pub receiver: String,
    /// Destination chain.
    pub receiver_chain_id: ChainId,
    /// Deposited amount.
    pub amount: U256,
    /// Hex payload.
    pub message: String,
    /// Observed inbound hash.
    pub inbound_hash: String,
    /// External block height.
    pub inbound_block_height: u64,
    /// Gas limit for the outbound.
    pub gas_limit: u64,
    /// Asset kind.
    pub coin_type: CoinType,
    /// Asset contract (empty for gas).
    pub asset: String,
    /// Log index of the event.
    pub event_index: u64,
    /// Gateway version.
    pub protocol_version: ProtocolVersion,
    /// V2 revert options.
    pub revert_options: RevertOptions,
}

impl MsgVoteInbound {
    /// Ballot / CCTX index.
    pub fn digest(&self) -> Hash {
        let revert_address = self.revert_options.revert_address.as_deref().unwrap_or("");
        DigestBuilder::new("xc/vote-inbound")
            .str(&self.sender)
            .chain(self.sender_chain_id)
            .str(&self.tx_origin)
            .str(&self.receiver)
            .chain(self.receiver_chain_id)
            .u256(&self.amount)
            .str(&self.message)
            .str(&self.inbound_hash)
            .u64(self.inbound_block_height)
            .u64(self.gas_limit)
            .u64(self.coin_type as u64)
            .str(&self.asset)
            .u64(self.event_index)
            .u64(self.protocol_version as u64)
            .str(revert_address)
            .u64(self.revert_options.call_on_revert as u64)
            .bytes(&self.revert_options.revert_message)
            .finish()
    }

    /// Stateless checks.
    pub fn validate_basic(&self) -> CrossChainResult<()> {
        if self.creator.as_str().is_empty() {
            return Err(invalid("creator is empty"));
        }
        if self.sender.is_empty() {
            return Err(invalid("sender is empty"));
        }
        if self.inbound_hash.is_empty() {
            return Err(invalid("inbound hash is empty"));
        }
        if !self.coin_type.is_observable_inbound() {
            return Err(invalid(format!(
                "coin type {:?} cannot be observed inbound",
                self.coin_type
            )));
        }
        if self.coin_type == CoinType::Erc20 && self.asset.is_empty() {
            return Err(invalid("erc20 inbound without asset"));
        }
        if self.protocol_version == ProtocolVersion::V2 && self.receiver.is_empty() {
            return Err(invalid("v2 inbound without receiver"));
        }
        if self.protocol_version == ProtocolVersion::V1 && self.revert_options != RevertOptions::default() {
            return Err(invalid("revert options require protocol v2"));
        }
        Ok(())
    }
}

/// Observer vote on an outbound result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgVoteOutbound {
    /// Voting observer.
    pub creator: ObserverId,
    /// CCTX the outbound belongs to.
    pub cctx_index: Hash,
    /// Observed outbound hash.
    pub observed_outbound_hash: String,
    /// External block height.
    pub observed_outbound_block_height: u64,
    /// Gas consumed.
    pub observed_outbound_gas_used: u64,
    /// Effective gas price.
    pub observed_outbound_effective_gas_price: U256,
    /// Effective gas limit.
    pub observed_outbound_effective_gas_limit: u64,
    /// Value delivered.
    pub value_received: U256,
    /// Observed outcome; decides the vote.
    pub status: ReceiveStatus,
    /// Outbound chain.
    pub outbound_chain_id: ChainId,
    /// Outbound nonce.
    pub outbound_nonce: u64,
    /// Asset kind.
    pub coin_type: CoinType,
}

impl MsgVoteOutbound {
    /// Ballot index. The observed status is the vote, not part of the digest.
    pub fn digest(&self) -> Hash {
        DigestBuilder::new("xc/vote-outbound")
            .bytes(&self.cctx_index)
            .str(&self.observed_outbound_hash)
            .u64(self.observed_outbound_block_height)
            .u64(self.observed_outbound_gas_used)
            .u256(&self.observed_outbound_effective_gas_price)
            .u64(self.observed_outbound_effective_gas_limit)
            .u256(&self.value_received)
            .chain(self.outbound_chain_id)
            .u64(self.outbound_nonce)
            .u64(self.coin_type as u64)
            .finish()
    }

    /// The ballot vote this report casts.
    pub fn vote(&self) -> Vote {
        match self.status {
            ReceiveStatus::Success => Vote::Yes,
            ReceiveStatus::Failed => Vote::No,
        }
    }

    /// Stateless checks.
    pub fn validate_basic(&self) -> CrossChainResult<()> {
        if self.creator.as_str().is_empty() {
            return Err(invalid("creator is empty"));
        }
        if self.observed_outbound_hash.is_empty() {
            return Err(invalid("observed outbound hash is empty"));
        }
        Ok(())
    }
}

/// Signer report of a broadcast outbound hash.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgAddOutboundTracker {
    /// Reporting observer.
    pub creator: ObserverId,
    /// Outbound chain.
    pub chain_id: ChainId,
    /// Outbound nonce.
    pub nonce: u64,
    /// Broadcast transaction hash.
    pub tx_hash: String,
    /// Key that signed the outbound; `None` picks the newest key with this
    /// nonce still pending.
    #[serde(default)]
    pub signing_key: Option<String>,
}

/// Observer report of an inbound not yet voted on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgAddInboundTracker {
    /// Reporting observer.
    pub creator: ObserverId,
    /// Sender chain.
    pub chain_id: ChainId,
    /// Inbound transaction hash.
    pub tx_hash: String,
    /// Asset kind.
    pub coin_type: CoinType,
}

fn invalid(reason: impl Into<String>) -> CrossChainError {
    CrossChainError::InvalidMessage(reason.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inbound() -> MsgVoteInbound {
        MsgVoteInbound {
            creator: "obs-0".into(),
            sender: "0xsender".into(),
            sender_chain_id: ChainId(1),
            tx_origin: String::new(),
            receiver: "0xreceiver".into(),
            receiver_chain_id: ChainId(7000),
            amount: U256::from(10),
            message: String::new(),
            inbound_hash: "0xhash".into(),
            inbound_block_height: 5,
            gas_limit: 100,
            coin_type: CoinType::Gas,
            asset: String::new(),
            event_index: 0,
            protocol_version: ProtocolVersion::V1,
            revert_options: RevertOptions::default(),
        }
    }

    #[test]
    fn test_inbound_digest_ignores_creator() {
        let a = inbound();
        let mut b = inbound();
        b.creator = "obs-1".into();
        assert_eq!(a.digest(), b.digest());
    }

    #[test]
    fn test_inbound_digest_covers_observed_fields() {
        let a = inbound();
        let mut b = inbound();
        b.event_index = 1;
        assert_ne!(a.digest(), b.digest());
        let mut c = inbound();
        c.amount = U256::from(11);
        assert_ne!(a.digest(), c.digest());
    }

    #[test]
    fn test_inbound_validate_basic() {
        assert!(inbound().validate_basic().is_ok());

        let mut cmd = inbound();
        cmd.coin_type = CoinType::Cmd;
        assert!(matches!(cmd.validate_basic(), Err(CrossChainError::InvalidMessage(_))));

        let mut erc20 = inbound();
        erc20.coin_type = CoinType::Erc20;
        assert!(erc20.validate_basic().is_err());
        erc20.asset = "0xtoken".into();
        assert!(erc20.validate_basic().is_ok());

        let mut v1_revert = inbound();
        v1_revert.revert_options.revert_address = Some("0xr".into());
        assert!(v1_revert.validate_basic().is_err());
        v1_revert.protocol_version = ProtocolVersion::V2;
        assert!(v1_revert.validate_basic().is_ok());
    }

    #[test]
    fn test_outbound_digest_shared_by_success_and_failure_reports() {
        let success = MsgVoteOutbound {
            creator: "obs-0".into(),
            cctx_index: [1; 32],
            observed_outbound_hash: "0xout".into(),
            observed_outbound_block_height: 9,
            observed_outbound_gas_used: 1,
            observed_outbound_effective_gas_price: U256::from(1),
            observed_outbound_effective_gas_limit: 2,
            value_received: U256::from(10),
            status: ReceiveStatus::Success,
            outbound_chain_id: ChainId(1),
            outbound_nonce: 3,
            coin_type: CoinType::Gas,
        };
        let mut failure = success.clone();
        failure.status = ReceiveStatus::Failed;
        failure.creator = "obs-1".into();
        assert_eq!(success.digest(), failure.digest());
        assert_eq!(success.vote(), Vote::Yes);
        assert_eq!(failure.vote(), Vote::No);

        let mut other_nonce = success.clone();
        other_nonce.outbound_nonce = 4;
        assert_ne!(success.digest(), other_nonce.digest());
    }
}
