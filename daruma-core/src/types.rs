//! Type definitions and wrappers for secure data handling
//!
//! This module provides type-safe wrappers for sensitive data using the
//! secrecy crate to prevent accidental exposure in logs or debug output.

use secrecy::{ExposeSecret, Secret};

/// Wrapper for the static component of the VPN password
///
/// This type ensures the stored account password is never accidentally
/// logged or exposed in debug output.
#[derive(Clone, Debug)]
pub struct StaticPassword(Secret<String>);

impl StaticPassword {
    /// Create a new StaticPassword from a plain string
    pub fn new(password: String) -> Self {
        Self(Secret::new(password))
    }

    /// Expose the password value (use with caution!)
    ///
    /// This should only be called when composing the combined secret
    /// handed to NetworkManager.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl From<String> for StaticPassword {
    fn from(password: String) -> Self {
        Self::new(password)
    }
}

/// Wrapper for the Base32-encoded OTP shared secret
#[derive(Clone, Debug)]
pub struct OtpSecret(Secret<String>);

impl OtpSecret {
    /// Create a new OtpSecret from a Base32-encoded string
    pub fn new(secret: String) -> Self {
        Self(Secret::new(secret))
    }

    /// Expose the secret value (use with caution!)
    ///
    /// This should only be called when passing to cryptographic functions.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl From<String> for OtpSecret {
    fn from(secret: String) -> Self {
        Self::new(secret)
    }
}

/// Wrapper for a generated TOTP passcode
///
/// Generated passcodes should also be treated as sensitive data and never
/// logged, even though each one only lives for a single connect attempt.
#[derive(Clone, Debug)]
pub struct Passcode(Secret<String>);

impl Passcode {
    /// Create a new Passcode from a generated digit string
    pub fn new(code: String) -> Self {
        Self(Secret::new(code))
    }

    /// Expose the passcode value (use with caution!)
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl From<String> for Passcode {
    fn from(code: String) -> Self {
        Self::new(code)
    }
}

/// Wrapper for the complete VPN secret (static password + passcode)
///
/// This type represents the concatenation of the stored account password
/// and a freshly generated passcode, with no separator in between. It is
/// the only value ever handed to nmcli as `vpn.secrets`.
#[derive(Clone, Debug)]
pub struct CombinedSecret(Secret<String>);

impl CombinedSecret {
    /// Compose the combined secret from its two components
    pub fn from_parts(password: &StaticPassword, passcode: &Passcode) -> Self {
        let combined = format!("{}{}", password.expose(), passcode.expose());
        Self(Secret::new(combined))
    }

    /// Create a combined secret from a raw string (for testing)
    pub fn new(combined: String) -> Self {
        Self(Secret::new(combined))
    }

    /// Expose the combined value (use with caution!)
    ///
    /// This should only be called at the nmcli boundary.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

/// Secret visibility policy of a NetworkManager connection profile
///
/// NetworkManager stores this as the numeric `password-flags` property on
/// the profile's `vpn.data`. The keeper toggles it around every connect so
/// the profile cannot silently auto-reconnect with stale credentials.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PasswordFlag {
    /// Secrets are stored per user and handed over without prompting (1)
    PerUserStored,
    /// Secrets are always requested interactively (2)
    AlwaysPrompt,
}

impl PasswordFlag {
    /// The numeric value nmcli expects for this policy
    pub fn nmcli_value(self) -> u8 {
        match self {
            PasswordFlag::PerUserStored => 1,
            PasswordFlag::AlwaysPrompt => 2,
        }
    }
}

/// The credential pair resolved once at startup
///
/// Both components are read from flags, the keyring or an interactive
/// prompt before the keeper starts, then held in memory for the process
/// lifetime. Passcodes are minted from the OTP secret per attempt and are
/// deliberately not part of this struct.
#[derive(Clone, Debug)]
pub struct Credential {
    pub password: StaticPassword,
    pub otp_secret: OtpSecret,
}

/// Service namespace for all keyring entries
pub const KEYRING_SERVICE: &str = "daruma-vpn";

/// The parameters cached under the daruma keyring service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKey {
    /// Target connection name
    Config,
    /// Static component of the VPN password
    Password,
    /// Base32-encoded OTP shared secret
    OtpSecret,
}

impl ParamKey {
    /// Keyring account name for this parameter
    pub fn as_str(self) -> &'static str {
        match self {
            ParamKey::Config => "config",
            ParamKey::Password => "password",
            ParamKey::OtpSecret => "otpSecret",
        }
    }
}
