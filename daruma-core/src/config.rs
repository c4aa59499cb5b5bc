//! Runtime settings for the keeper
//!
//! All non-sensitive parameters live here. Sensitive data (the account
//! password and the OTP secret) is wrapped in the types module and stored
//! in the keyring, never in a settings struct.

use std::time::Duration;

use crate::error::ConfigError;

/// How the combined secret reaches nmcli during a connect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectStrategy {
    /// Write the secret into the profile via `vpn.secrets`, then bring the
    /// connection up. This is the default path.
    #[default]
    ModifySecrets,
    /// Hand the secret over through a one-shot `passwd-file` consumed by a
    /// single `connection up` invocation.
    PasswdFile,
}

/// Keeper settings resolved from CLI flags and the keyring
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Name of the NetworkManager connection profile to keep up
    pub connection: String,

    /// Pause between reconcile ticks
    pub poll_interval: Duration,

    /// Secret delivery mechanism
    pub strategy: ConnectStrategy,
}

impl Settings {
    /// Create settings with the default cadence and strategy
    pub fn new(connection: String) -> Self {
        Self {
            connection,
            poll_interval: Duration::from_secs(5),
            strategy: ConnectStrategy::default(),
        }
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.connection.trim().is_empty() {
            return Err(ConfigError::EmptyConnectionName);
        }

        if self.poll_interval < Duration::from_secs(1) {
            return Err(ConfigError::ZeroPollInterval);
        }

        Ok(())
    }
}
