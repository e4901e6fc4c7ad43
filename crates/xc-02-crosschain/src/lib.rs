//! # XC-02 Cross-Chain Settlement
//!
//! The cross-chain transaction (CCTX) state machine.
//!
//! **Subsystem ID:** 02  
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)  
//! **Depends on:** `xc-01-observer` for ballots, nonces and signing keys
//!
//! ## Purpose
//!
//! Turn observer votes into value movement between chains:
//! - Inbound votes finalize into a CCTX and a deposit on the host chain
//! - Outbound votes settle the signed transaction on the destination chain
//! - Failed outbounds revert to the sender, or abort when they cannot
//! - Fund migrations move custody to a newly generated signing key
//!
//! ## Lifecycle
//!
//! ```text
//! PendingInbound ──► PendingOutbound ──► OutboundMined
//!       │                  │
//!       │                  └──► PendingRevert ──► Reverted
//!       │                             │
//!       └──────────► any ─────────────┴──► Aborted
//! ```
//!
//! | Status | Terminal | Current outbound |
//! |--------|----------|------------------|
//! | PendingInbound | no | not yet executed |
//! | PendingOutbound | no | original, nonce reserved |
//! | PendingRevert | no | revert, nonce reserved |
//! | OutboundMined | yes | original, executed |
//! | Reverted | yes | revert, executed |
//! | Aborted | yes | executed |
//!
//! ## Atomicity
//!
//! Each message runs inside one ledger transaction. A rejected message leaves
//! no trace, including its vote. Stability pool funding and event publication
//! happen only after the transaction committed.
//!
//! ## Module Structure
//!
//! ```text
//! xc-02-crosschain/
//! ├── domain/          # CCTX, messages, trackers, errors, invariants
//! ├── algorithms/      # Destination resolution, gas pool accounting
//! ├── ports/           # CrossChainApi, FungibleGateway, GasStabilityPool, EventPublisher
//! ├── adapters/        # In-memory and recording port implementations
//! ├── store/           # CCTX, tracker and finalized-inbound records
//! └── service/         # CrossChainService
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod config;
pub mod domain;
pub mod events;
pub mod keys;
pub mod ports;
pub mod service;
pub mod store;

// Re-exports
pub use adapters::{
    MockFungibleGateway, RecordingEventPublisher, RecordingGasStabilityPool, TracingEventPublisher,
};
pub use algorithms::{remaining_gas_fees, resolve_destination, Destination};
pub use config::CrossChainConfig;
pub use domain::{
    validate_cctx, CctxStatus, CoinType, CrossChainError, CrossChainResult, CrossChainTx,
    DepositError, DepositErrorKind, FinalizedInbound, InboundParams, InboundTracker,
    MsgAddInboundTracker, MsgAddOutboundTracker, MsgVoteInbound, MsgVoteOutbound,
    OutboundParams, OutboundTracker, ProtocolVersion, ReceiveStatus, RevertOptions, Status,
    TrackerHash, TxFinalizationStatus,
};
pub use events::CrossChainEvent;
pub use ports::{
    CrossChainApi, DepositReceipt, DepositRequest, EventPublisher, FungibleGateway,
    GasStabilityPool, PoolFundingError, VoteReceipt,
};
pub use service::{CrossChainDependencies, CrossChainService};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
