//! # Shared Types Crate
//!
//! Types and storage plumbing shared by the observer registry (`xc-01`) and the
//! cross-chain settlement module (`xc-02`).
//!
//! ## Contents
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `entities` | `Hash`, `ChainId`, `BlockContext`, `U256` re-export |
//! | `digest` | Length-prefixed SHA-256 digests for deterministic indices |
//! | `codec` | Versioned bincode envelope for persisted records |
//! | `storage` | `KeyValueStore` port, in-memory adapter, write overlay |
//! | `ledger` | Atomic transition wrapper around a store |
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: identifiers used by both modules live here.
//! - **All-or-nothing transitions**: a state transition writes through a
//!   `StoreOverlay` and is committed as one `atomic_batch_write`, or not at all.

pub mod codec;
pub mod digest;
pub mod entities;
pub mod errors;
pub mod ledger;
pub mod storage;

pub use codec::{decode_record, encode_record, RECORD_VERSION};
pub use digest::DigestBuilder;
pub use entities::*;
pub use errors::*;
pub use ledger::Ledger;
pub use storage::{BatchOperation, InMemoryKVStore, KeyValueStore, RecordStore, StoreOverlay};
