//! Keeper functions over the cross-chain keyspace.
//!
//! Generic over the store so the same code runs against committed state and
//! inside a transition overlay.

pub mod cctx;
pub mod trackers;
