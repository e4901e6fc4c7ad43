//! # Domain Errors
//!
//! Error types for cross-chain settlement.

use super::value_objects::CctxStatus;
use shared_types::{ChainId, StoreError, U256};
use thiserror::Error;
use xc_01_observer::ObserverError;

/// Cross-chain error types.
///
/// Any error returned from a message handler means the message was rejected
/// and no state was written.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CrossChainError {
    /// Message failed stateless validation.
    #[error("Invalid message: {0}")]
    InvalidMessage(String),

    /// Chain unknown, unsupported, or of the wrong kind for this operation.
    #[error("Unsupported chain: {0}")]
    UnsupportedChain(ChainId),

    /// Inbound processing disabled by the crosschain flags.
    #[error("Inbound processing is disabled")]
    InboundDisabled,

    /// Outbound processing disabled by the crosschain flags.
    #[error("Outbound processing is disabled")]
    OutboundDisabled,

    /// External event already produced a CCTX.
    #[error("Inbound {inbound_hash} on chain {chain_id} already finalized")]
    InboundAlreadyFinalized {
        /// Sender chain
        chain_id: ChainId,
        /// Observed inbound hash
        inbound_hash: String,
    },

    /// A CCTX with this index exists.
    #[error("CCTX already exists: {0}")]
    CctxAlreadyExists(String),

    /// No CCTX with this index.
    #[error("CCTX not found: {0}")]
    CctxNotFound(String),

    /// Outbound vote does not match the current outbound record.
    #[error("Nonce mismatch: expected {expected:?}, got {got}")]
    NonceMismatch {
        /// Current record nonce (None if unassigned)
        expected: Option<u64>,
        /// Nonce in the message
        got: u64,
    },

    /// Outbound vote is for a different chain than the current record.
    #[error("Chain mismatch: expected {expected}, got {got}")]
    ChainMismatch {
        /// Current record chain
        expected: ChainId,
        /// Chain in the message
        got: ChainId,
    },

    /// Observed value differs from the amount sent.
    #[error("Value received {received} does not match sent value {expected}")]
    ValueMismatch {
        /// Outbound amount
        expected: U256,
        /// Observed value
        received: U256,
    },

    /// Illegal status change.
    #[error("Invalid CCTX transition: {from} -> {to}")]
    InvalidStatusTransition {
        /// Current status
        from: CctxStatus,
        /// Attempted status
        to: CctxStatus,
    },

    /// Revert outbound could not be added.
    #[error("Cannot revert: {0}")]
    CannotRevert(String),

    /// A migration for this chain is in flight.
    #[error("Fund migration already in progress for chain {0}")]
    MigrationInProgress(ChainId),

    /// Pending outbounds still use the current key on this chain.
    #[error("{count} pending nonces for the current signing key on chain {chain_id}")]
    PendingOutboundsExist {
        /// Chain
        chain_id: ChainId,
        /// Number of pending nonces
        count: usize,
    },

    /// No signing key newer than the current one.
    #[error("No new signing key to migrate funds to")]
    NoNewSigningKey,

    /// Outbound tracker already holds the maximum number of hashes.
    #[error("Outbound tracker for chain {chain_id} nonce {nonce} is full ({max} hashes)")]
    TrackerFull {
        /// Chain
        chain_id: ChainId,
        /// Nonce
        nonce: u64,
        /// Configured maximum
        max: usize,
    },

    /// Reporter is not in the observer set.
    #[error("{0} is not an observer")]
    NotAnObserver(String),

    /// No pending outbound owns this nonce.
    #[error("No pending outbound for chain {chain_id} nonce {nonce}")]
    NoPendingOutbound {
        /// Chain
        chain_id: ChainId,
        /// Nonce
        nonce: u64,
    },

    /// A record would violate a CCTX invariant.
    #[error("Invariant violated: {0}")]
    InvariantViolation(String),

    /// Configuration rejected.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Observer subsystem error.
    #[error(transparent)]
    Observer(#[from] ObserverError),

    /// Storage error.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for cross-chain operations.
pub type CrossChainResult<T> = Result<T, CrossChainError>;

/// Why a deposit on the host chain failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DepositErrorKind {
    /// Destination contract execution reverted.
    ContractReverted,
    /// Call targeted an address without code.
    CallNonContract,
    /// Foreign asset supply cap reached.
    AssetCapReached,
    /// Foreign asset paused.
    AssetPaused,
    /// Receiver or message could not be decoded.
    InvalidDestination,
    /// Anything else.
    Internal,
}

impl DepositErrorKind {
    /// Errors after which funds go back to the sender instead of aborting.
    pub fn should_revert(self) -> bool {
        match self {
            DepositErrorKind::ContractReverted
            | DepositErrorKind::CallNonContract
            | DepositErrorKind::AssetCapReached
            | DepositErrorKind::AssetPaused => true,
            DepositErrorKind::InvalidDestination | DepositErrorKind::Internal => false,
        }
    }
}

/// Deposit failure reported by the fungible gateway.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("deposit failed ({kind:?}): {message}")]
pub struct DepositError {
    /// Failure class
    pub kind: DepositErrorKind,
    /// Detail for the status message
    pub message: String,
}

impl DepositError {
    /// Creates a deposit error.
    pub fn new(kind: DepositErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}
