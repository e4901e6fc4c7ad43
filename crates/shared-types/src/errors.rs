//! # Error Types
//!
//! Storage and codec errors shared by every subsystem that persists records.

use thiserror::Error;

/// Errors raised by a `KeyValueStore` backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KVStoreError {
    /// Backend I/O failed.
    #[error("I/O error: {message}")]
    IoError { message: String },

    /// Stored data could not be interpreted.
    #[error("Store corrupted: {message}")]
    Corruption { message: String },
}

/// Errors raised while encoding or decoding a persisted record.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CodecError {
    /// Serialization failed.
    #[error("Encoding failed: {0}")]
    Encode(String),

    /// Payload did not decode to the expected type.
    #[error("Decoding failed: {0}")]
    Decode(String),

    /// Record was written by an unknown schema version.
    #[error("Unsupported record version {found}, expected {expected}")]
    UnsupportedVersion { found: u8, expected: u8 },

    /// Zero-length record.
    #[error("Empty record")]
    Empty,
}

/// Any failure reading or writing typed records.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error(transparent)]
    Backend(#[from] KVStoreError),

    #[error(transparent)]
    Codec(#[from] CodecError),
}
