//! # Domain Layer
//!
//! CCTX entities, lifecycle value objects, messages, trackers and invariants.

pub mod entities;
pub mod errors;
pub mod invariants;
pub mod messages;
pub mod trackers;
pub mod value_objects;

pub use entities::{CrossChainTx, InboundParams, OutboundParams, Status};
pub use errors::{CrossChainError, CrossChainResult, DepositError, DepositErrorKind};
pub use invariants::validate_cctx;
pub use messages::{MsgAddInboundTracker, MsgAddOutboundTracker, MsgVoteInbound, MsgVoteOutbound};
pub use trackers::{FinalizedInbound, InboundTracker, OutboundTracker, TrackerHash};
pub use value_objects::{
    CctxStatus, CoinType, ProtocolVersion, ReceiveStatus, RevertOptions, TxFinalizationStatus,
};
