//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implementations of the outbound ports for tests and embedding hosts.

mod events;
mod fungible;
mod stability_pool;

pub use events::{RecordingEventPublisher, TracingEventPublisher};
pub use fungible::MockFungibleGateway;
pub use stability_pool::RecordingGasStabilityPool;
