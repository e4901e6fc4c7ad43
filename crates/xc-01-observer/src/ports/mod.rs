//! Ports layer (hexagonal architecture)
//!
//! Persistence goes through `shared_types::KeyValueStore`, so this subsystem
//! has no outbound ports of its own.

pub mod inbound;

pub use inbound::ObserverApi;
