//! # Algorithms Module
//!
//! Pure computations used by the CCTX state machine.

pub mod destination;
pub mod gas;

pub use destination::{resolve_destination, Destination, ADDRESS_LEN};
pub use gas::remaining_gas_fees;
