//! Authentication module
//!
//! Handles parameter storage in the keyring, Base32 secret decoding and
//! TOTP passcode generation.

pub mod base32;

// Use mock keyring in test mode or CI environment
#[cfg(any(test, feature = "mock-keyring"))]
#[path = "keyring_mock.rs"]
pub mod keyring;

// Use real keyring in production
#[cfg(not(any(test, feature = "mock-keyring")))]
pub mod keyring;

pub mod totp;
