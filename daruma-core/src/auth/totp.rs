//! TOTP (Time-based One-Time Password) passcode generation
//!
//! Implements RFC 6238 with the parameters the VPN concentrator expects:
//! SHA-1, 30-second time step, 6 decimal digits. The concentrator accepts
//! a skew of one step either side, so a passcode minted here stays valid
//! across a window boundary crossed mid-connect.

use std::time::{SystemTime, UNIX_EPOCH};

use totp_lite::Sha1;

use crate::auth::base32::decode_base32;
use crate::error::OtpError;
use crate::types::{OtpSecret, Passcode};

/// RFC 6238 time step in seconds
pub const PERIOD_SECS: u64 = 30;

/// Passcode length in decimal digits
pub const DIGITS: u32 = 6;

/// Generate a passcode for the current time window
///
/// Every call re-derives from the wall clock; nothing is cached, so two
/// attempts in different windows always produce different passcodes.
pub fn generate_passcode(secret: &OtpSecret) -> Result<Passcode, OtpError> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|_| OtpError::TimeError)?
        .as_secs();

    passcode_at(secret, now)
}

/// Generate a passcode for an explicit Unix timestamp
///
/// Same derivation as [`generate_passcode`] with the clock pinned, which
/// makes the output deterministic.
pub fn passcode_at(secret: &OtpSecret, unix_seconds: u64) -> Result<Passcode, OtpError> {
    let key = decode_secret(secret)?;
    let code = totp_lite::totp_custom::<Sha1>(PERIOD_SECS, DIGITS, &key, unix_seconds);

    Ok(Passcode::new(code))
}

/// Check that a secret is non-empty and Base32-decodable
///
/// Called once at startup so a mistyped secret fails before the keeper
/// starts instead of on the first reconnect.
pub fn validate_secret(secret: &OtpSecret) -> Result<(), OtpError> {
    decode_secret(secret).map(|_| ())
}

fn decode_secret(secret: &OtpSecret) -> Result<Vec<u8>, OtpError> {
    let raw = secret.expose();
    if raw.trim().is_empty() {
        return Err(OtpError::EmptySecret);
    }

    decode_base32(raw)
}
