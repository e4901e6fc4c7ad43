//! Domain layer for the observer subsystem

pub mod ballot;
pub mod chain;
pub mod migration;
pub mod nonce;
pub mod observer;
pub mod signing_key;

pub use ballot::{Ballot, BallotIndex, BallotStatus, ObservationType, Tally, Vote, VoterVote};
pub use chain::{Chain, ChainParams, CrosschainFlags, Network};
pub use migration::FundMigrationRecord;
pub use nonce::{NonceRecord, NonceToCctx};
pub use observer::{ObserverId, ObserverSet};
pub use signing_key::SigningKey;
