//! # Base62 Encoding
//!
//! Big-integer base-62 conversion for identifiers.
//! Uses alphabet: 0-9, A-Z, a-z (62 characters, in ASCII order so that
//! fixed-width encodings sort like the numbers they represent).
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use super::IdError;

/// Base62 alphabet in ascending ASCII order
const BASE62_ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Encodes a big-endian byte string into a fixed-width base-62 string.
///
/// # Arguments
/// * `bytes` - The number to encode, most significant byte first
/// * `width` - The minimum output width (left-padded with '0')
///
/// # Returns
/// A `String` of at least `width` characters
#[allow(clippy::cast_possible_truncation)] // quotient of a 14-bit value by 62 fits in u8
pub fn encode(bytes: &[u8], width: usize) -> String {
    let mut number = bytes.to_vec();
    let mut digits = Vec::with_capacity(width);

    while number.iter().any(|&b| b != 0) {
        let mut remainder: u32 = 0;
        for byte in &mut number {
            let acc = (remainder << 8) | u32::from(*byte);
            *byte = (acc / 62) as u8;
            remainder = acc % 62;
        }
        digits.push(BASE62_ALPHABET[remainder as usize]);
    }

    while digits.len() < width {
        digits.push(b'0');
    }

    digits.reverse();
    // SAFETY: BASE62_ALPHABET contains only ASCII characters
    String::from_utf8(digits).expect("Base62 alphabet is valid UTF-8")
}

/// Decodes a base-62 string into exactly `len` big-endian bytes.
///
/// Values shorter than `len` bytes are right-aligned (zero-padded on the left).
/// Fails on characters outside the alphabet or values that do not fit.
#[allow(clippy::cast_possible_truncation)] // masked to the low byte
pub fn decode(input: &str, len: usize) -> Result<Vec<u8>, IdError> {
    let mut number = vec![0u8; len];

    for c in input.bytes() {
        let digit = value_of(c).ok_or_else(|| IdError::Invalid {
            id: input.to_string(),
            reason: format!("'{}' is not a base-62 character", char::from(c)),
        })?;

        let mut carry = u32::from(digit);
        for byte in number.iter_mut().rev() {
            let acc = u32::from(*byte) * 62 + carry;
            *byte = (acc & 0xff) as u8;
            carry = acc >> 8;
        }

        if carry != 0 {
            return Err(IdError::Invalid {
                id: input.to_string(),
                reason: format!("value does not fit in {len} bytes"),
            });
        }
    }

    Ok(number)
}

/// Returns the numeric value of an alphabet character.
const fn value_of(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'A'..=b'Z' => Some(c - b'A' + 10),
        b'a'..=b'z' => Some(c - b'a' + 36),
        _ => None,
    }
}
