//! Versioned record encoding.
//!
//! Layout: `[version: u8][bincode payload]`. Readers reject versions they do
//! not understand instead of misinterpreting the payload.

use crate::errors::CodecError;
use serde::{de::DeserializeOwned, Serialize};

/// Current schema version written by `encode_record`.
pub const RECORD_VERSION: u8 = 1;

/// Serializes a record behind the version byte.
pub fn encode_record<T: Serialize>(value: &T) -> Result<Vec<u8>, CodecError> {
    let payload = bincode::serialize(value).map_err(|e| CodecError::Encode(e.to_string()))?;
    let mut out = Vec::with_capacity(payload.len() + 1);
    out.push(RECORD_VERSION);
    out.extend_from_slice(&payload);
    Ok(out)
}

/// Decodes a record, checking the version byte first.
pub fn decode_record<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CodecError> {
    let (&version, payload) = bytes.split_first().ok_or(CodecError::Empty)?;
    if version != RECORD_VERSION {
        return Err(CodecError::UnsupportedVersion {
            found: version,
            expected: RECORD_VERSION,
        });
    }
    bincode::deserialize(payload).map_err(|e| CodecError::Decode(e.to_string()))
}
