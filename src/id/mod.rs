//! # ID Generation
//!
//! Generates K-sortable, collision-resistant identifiers in the KSUID layout:
//! a 4-byte big-endian timestamp (seconds since [`ID_EPOCH_MS`]) followed by
//! 16 bytes from the operating system's CSPRNG, encoded as 27 base-62
//! characters (e.g., `2YBXZHqCHEdmhp5sdLmoTEW73NQ`).
//!
//! Because every identifier has the same width and the alphabet is in ASCII
//! order, identifiers created in later seconds compare greater as plain strings.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

pub mod base62;

use chrono::{DateTime, Utc};
use rand::{rngs::OsRng, TryRngCore};
use thiserror::Error;

use crate::constants::{ID_BYTES, ID_EPOCH_MS, ID_LENGTH, ID_PAYLOAD_BYTES, ID_TIMESTAMP_BYTES};

/// Errors produced while creating or parsing identifiers
#[derive(Debug, Error)]
pub enum IdError {
    /// The operating system could not provide random bytes
    #[error("random source unavailable: {0}")]
    Entropy(String),

    /// The timestamp lies before the epoch or past the 32-bit range
    #[error("timestamp {0} is outside the identifier range")]
    OutOfRange(DateTime<Utc>),

    /// The string is not a valid identifier
    #[error("invalid identifier '{id}': {reason}")]
    Invalid { id: String, reason: String },
}

/// The decoded parts of an identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedId {
    /// Creation time, truncated to whole seconds
    pub timestamp: DateTime<Utc>,

    /// Random payload bytes
    pub payload: [u8; ID_PAYLOAD_BYTES],
}

/// Creates a new identifier for the current time.
pub fn create_id() -> Result<String, IdError> {
    create_id_at(Utc::now())
}

/// Creates a new identifier for the given creation time.
pub fn create_id_at(time: DateTime<Utc>) -> Result<String, IdError> {
    let mut payload = [0u8; ID_PAYLOAD_BYTES];
    OsRng
        .try_fill_bytes(&mut payload)
        .map_err(|e| IdError::Entropy(e.to_string()))?;

    encode_id(time, &payload)
}

/// Encodes a timestamp and payload into an identifier string.
pub fn encode_id(time: DateTime<Utc>, payload: &[u8; ID_PAYLOAD_BYTES]) -> Result<String, IdError> {
    let seconds = epoch_seconds(time)?;

    let mut raw = [0u8; ID_BYTES];
    raw[..ID_TIMESTAMP_BYTES].copy_from_slice(&seconds.to_be_bytes());
    raw[ID_TIMESTAMP_BYTES..].copy_from_slice(payload);

    Ok(base62::encode(&raw, ID_LENGTH))
}

/// Parses an identifier into its creation time and random payload.
pub fn parse_id(id: &str) -> Result<ParsedId, IdError> {
    if id.is_empty() {
        return Err(IdError::Invalid {
            id: String::new(),
            reason: "empty string".to_string(),
        });
    }

    let raw = base62::decode(id, ID_BYTES)?;

    let mut seconds = [0u8; ID_TIMESTAMP_BYTES];
    seconds.copy_from_slice(&raw[..ID_TIMESTAMP_BYTES]);
    let millis = ID_EPOCH_MS + i64::from(u32::from_be_bytes(seconds)) * 1000;
    let timestamp = DateTime::from_timestamp_millis(millis).ok_or_else(|| IdError::Invalid {
        id: id.to_string(),
        reason: "timestamp out of range".to_string(),
    })?;

    let mut payload = [0u8; ID_PAYLOAD_BYTES];
    payload.copy_from_slice(&raw[ID_TIMESTAMP_BYTES..]);

    Ok(ParsedId { timestamp, payload })
}

/// Whole seconds between the identifier epoch and `time`.
///
/// Times before the epoch are rejected rather than wrapped.
fn epoch_seconds(time: DateTime<Utc>) -> Result<u32, IdError> {
    let offset_ms = time.timestamp_millis() - ID_EPOCH_MS;
    if offset_ms < 0 {
        return Err(IdError::OutOfRange(time));
    }
    u32::try_from(offset_ms / 1000).map_err(|_| IdError::OutOfRange(time))
}
