//! # Cross-Chain Settlement Test Suite
//!
//! Unified test crate driving the observer and cross-chain services together
//! over one shared ledger.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs        # TestNetwork harness, message builders, tracing setup
//! └── integration/
//!     ├── scenarios.rs   # End-to-end CCTX lifecycles
//!     └── properties.rs  # Randomized invariant checks
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p xc-tests
//! RUST_LOG=debug cargo test -p xc-tests integration::scenarios::
//! ```

#![allow(dead_code)]

pub mod fixtures;
pub mod integration;
