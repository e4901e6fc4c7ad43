//! Keeper functions over a `KeyValueStore`
//!
//! All functions are generic over the store so they run unchanged against the
//! committed store or a transition's `StoreOverlay`.

pub mod ballots;
pub mod migrations;
pub mod nonces;
pub mod registry;
