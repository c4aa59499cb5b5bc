//! Base32 normalization and decoding for OTP shared secrets
//!
//! Provisioning tools hand out secrets in inconsistent shapes: grouped
//! with spaces, lowercased, or stripped of padding. Decoding therefore
//! runs in three steps:
//! 1. Remove all space characters
//! 2. Re-pad to 8-character boundaries
//! 3. Decode case-insensitively

use crate::error::OtpError;

/// Remove spaces from grouped secrets like "JBSW Y3DP EHPK 3PXP"
fn clean(input: &str) -> String {
    input.replace(' ', "")
}

/// Pad input string to 8-character boundaries
///
/// Formula: padding_length = (8 - (len % 8)) % 8
fn pad(input: &str) -> String {
    let padding_len = (8 - (input.len() % 8)) % 8;
    format!("{}{}", input, "=".repeat(padding_len))
}

/// Decode a Base32 secret to bytes, tolerating spacing, missing padding
/// and lowercase input
pub fn decode_base32(input: &str) -> Result<Vec<u8>, OtpError> {
    let cleaned = clean(input);
    let padded = pad(&cleaned);

    use data_encoding::BASE32;

    BASE32
        .decode(padded.to_uppercase().as_bytes())
        .map_err(|_| OtpError::InvalidBase32)
}
