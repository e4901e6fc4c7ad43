//! Deposit destination resolution
//!
//! V1 inbounds carry the destination inside the message: a non-empty message
//! starts with a 20-byte address that overrides the declared receiver, and
//! the rest is call data. V2 inbounds name the receiver explicitly and the
//! whole message is call data.

use crate::domain::{CrossChainTx, DepositError, DepositErrorKind, ProtocolVersion};

/// Length of a host-chain address in bytes.
pub const ADDRESS_LEN: usize = 20;

/// Resolved deposit target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Destination {
    /// `0x`-prefixed receiver on the host chain.
    pub receiver: String,
    /// Call data passed to the receiver (empty for a plain deposit).
    pub payload: Vec<u8>,
}

/// Resolves where the deposit of `cctx` goes.
pub fn resolve_destination(cctx: &CrossChainTx) -> Result<Destination, DepositError> {
    let message = decode_message(&cctx.relayed_message)?;
    let declared = cctx.outbound.receiver.clone();

    match cctx.protocol_version {
        ProtocolVersion::V1 => {
            if message.is_empty() {
                return Ok(Destination {
                    receiver: declared,
                    payload: Vec::new(),
                });
            }
            if message.len() < ADDRESS_LEN {
                return Err(DepositError::new(
                    DepositErrorKind::InvalidDestination,
                    format!(
                        "message of {} bytes is too short to hold an address",
                        message.len()
                    ),
                ));
            }
            let (address, payload) = message.split_at(ADDRESS_LEN);
            let receiver = if address.iter().all(|b| *b == 0) {
                declared
            } else {
                format!("0x{}", hex::encode(address))
            };
            Ok(Destination {
                receiver,
                payload: payload.to_vec(),
            })
        }
        ProtocolVersion::V2 => Ok(Destination {
            receiver: declared,
            payload: message,
        }),
    }
}

fn decode_message(message: &str) -> Result<Vec<u8>, DepositError> {
    let trimmed = message.strip_prefix("0x").unwrap_or(message);
    hex::decode(trimmed).map_err(|e| {
        DepositError::new(
            DepositErrorKind::InvalidDestination,
            format!("unable to decode message: {e}"),
        )
    })
}
