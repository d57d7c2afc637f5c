//! Input normalisation helpers.
//!
//! Captured PDUs arrive in many textual shapes: plain hex, hex with commas,
//! whitespace or `0x` prefixes, dotted groups such as `a4.9.0.19`, or
//! base64. These helpers turn all of them into the byte sequence the
//! dissector consumes.

use alloc::string::String;
use alloc::vec::Vec;

use base64::Engine;

#[derive(Debug, PartialEq)]
pub enum Error {
    /// The cleaned-up hex string has an odd number of digits.
    OddLength,
    Hex(hex::FromHexError),
    Base64(base64::DecodeError),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::OddLength => write!(f, "the length of the hex string is not even"),
            Error::Hex(e) => write!(f, "invalid hex string: {e}"),
            Error::Base64(e) => write!(f, "invalid base64 string: {e}"),
        }
    }
}

/// Normalises a hex string into bytes.
///
/// Accepted shapes: plain hex, hex separated by commas or whitespace,
/// `0x`-prefixed octets, and dotted groups where each group is one octet
/// with its leading zero elided (`a4.9.0.19`).
pub fn normalize_hex(input: &str) -> Result<Vec<u8>, Error> {
    let cleaned = if input.contains('.') {
        let mut out = String::with_capacity(input.len());
        for group in input.split('.') {
            for _ in group.len()..2 {
                out.push('0');
            }
            out.push_str(group);
        }
        out
    } else {
        input.replace("0x", "").replace(|c: char| c == ',' || c.is_ascii_whitespace(), "")
    };
    if cleaned.len() % 2 == 1 {
        return Err(Error::OddLength);
    }
    hex::decode(&cleaned).map_err(Error::Hex)
}

/// Decodes a standard base64 string into bytes.
pub fn normalize_base64(input: &str) -> Result<Vec<u8>, Error> {
    base64::engine::general_purpose::STANDARD.decode(input.trim()).map_err(Error::Base64)
}
