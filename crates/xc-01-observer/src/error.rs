//! Error types for the observer subsystem

use crate::domain::ObserverId;
use shared_types::{ChainId, StoreError};
use thiserror::Error;

/// Observer subsystem errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ObserverError {
    /// Voter is not in the current observer set
    #[error("Observer {voter} is not authorized to vote")]
    NotAuthorizedVoter { voter: ObserverId },

    /// Voter already has a vote recorded on this ballot
    #[error("Observer {voter} already voted on ballot {ballot}")]
    DuplicateVote { voter: ObserverId, ballot: String },

    /// `NotYetVoted` cannot be cast
    #[error("Vote type {0} cannot be cast")]
    InvalidVote(String),

    /// Chain is unknown or its params mark it unsupported
    #[error("Chain {0} is not supported")]
    UnsupportedChain(ChainId),

    /// Chain already registered
    #[error("Chain {0} already registered")]
    ChainAlreadyRegistered(ChainId),

    /// Ballot threshold outside 1..=100
    #[error("Invalid ballot threshold {0}%")]
    InvalidThreshold(u8),

    /// Observer already a member
    #[error("Observer {0} already in the observer set")]
    ObserverAlreadyExists(ObserverId),

    /// Observer not a member
    #[error("Observer {0} not found in the observer set")]
    ObserverNotFound(ObserverId),

    /// No current signing key registered
    #[error("Signing key not found")]
    SigningKeyNotFound,

    /// Key already present in the key history
    #[error("Signing key {0} already registered")]
    SigningKeyExists(String),

    /// Release of a nonce that was never reserved
    #[error("Nonce {nonce} was never issued for key {signing_key} on chain {chain_id} (next {next_nonce})")]
    NonceNotIssued {
        signing_key: String,
        chain_id: ChainId,
        nonce: u64,
        next_nonce: u64,
    },

    /// Configuration rejected by `validate()`
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Storage error
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for observer operations
pub type ObserverResult<T> = Result<T, ObserverError>;
