//! Error types for the daruma VPN keeper
//!
//! This module defines all error types used throughout the application,
//! providing consistent error handling and user-friendly error messages.

use thiserror::Error;

/// Main error type for the daruma application
#[derive(Error, Debug)]
pub enum DarumaError {
    /// Errors related to configuration and parameter acquisition
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Errors related to keyring operations
    #[error("Keyring error: {0}")]
    Keyring(#[from] KeyringError),

    /// Errors related to driving NetworkManager through nmcli
    #[error("NetworkManager error: {0}")]
    Nm(#[from] NmError),

    /// Errors related to OTP/TOTP operations
    #[error("OTP error: {0}")]
    Otp(#[from] OtpError),

    /// Generic I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Connection name must not be empty")]
    EmptyConnectionName,

    #[error("Poll interval must be at least one second")]
    ZeroPollInterval,

    #[error("Missing required parameter: {parameter}")]
    MissingParameter { parameter: String },
}

/// Secret-service keyring operation errors
#[derive(Error, Debug)]
pub enum KeyringError {
    #[error("Keyring service unavailable")]
    ServiceUnavailable,

    #[error("Failed to store '{key}' in keyring")]
    StoreFailed { key: String },

    #[error("Failed to retrieve '{key}' from keyring")]
    RetrieveFailed { key: String },

    #[error("No stored value for '{key}'")]
    NotFound { key: String },
}

/// nmcli invocation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NmError {
    #[error("Required program not found in PATH: {program}")]
    MissingBinary { program: String },

    #[error("Failed to spawn nmcli: {reason}")]
    SpawnFailed { reason: String },

    #[error("`{command}` exited with status {code}: {stderr}")]
    CommandFailed {
        command: String,
        code: i32,
        stderr: String,
    },
}

/// OTP/TOTP operation errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum OtpError {
    #[error("OTP secret must not be empty")]
    EmptySecret,

    #[error("Invalid Base32 secret")]
    InvalidBase32,

    #[error("System time error")]
    TimeError,
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, DarumaError>;
