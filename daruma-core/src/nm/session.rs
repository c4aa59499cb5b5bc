//! Connect, rotate and disconnect operations on the target profile
//!
//! All writes to the NetworkManager profile happen here. The central
//! piece is the rotation sequence: park the profile's secret policy on
//! per-user storage, hand over a freshly combined secret, bring the
//! connection up, then flip the policy back to always-prompt so the
//! profile can never silently reconnect with a stale passcode.

use std::path::{Path, PathBuf};

use crate::auth::totp;
use crate::config::ConnectStrategy;
use crate::error::{DarumaError, NmError};
use crate::nm::command::{CommandRunner, NmCommand};
use crate::types::{CombinedSecret, Credential, PasswordFlag};

/// Mutating operations on one NetworkManager connection profile
///
/// Callers are expected to serialize access (the keeper wraps a session
/// in a `tokio::sync::Mutex`); the rotation sequence is multi-step and
/// the profile offers no transactions.
pub struct Session<R: CommandRunner> {
    runner: R,
    passwd_file: PathBuf,
}

impl<R: CommandRunner> Session<R> {
    pub fn new(runner: R) -> Self {
        Self {
            runner,
            passwd_file: std::env::temp_dir().join("daruma.nmcli.passwd"),
        }
    }

    /// Override the one-shot passwd-file location
    pub fn with_passwd_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.passwd_file = path.into();
        self
    }

    /// Bring the connection up without touching any secrets
    pub async fn connect_plain(&self, id: &str) -> Result<(), NmError> {
        self.runner.run(&NmCommand::up(id)).await?;
        tracing::info!(connection = id, "connection established");
        Ok(())
    }

    /// Full rotation sequence around a connect
    ///
    /// Any failure aborts immediately and propagates; there is no
    /// rollback. An abort between the two flag writes leaves the profile
    /// on per-user storage until the next successful pass fixes it.
    pub async fn connect_with_rotation(
        &self,
        id: &str,
        credential: &Credential,
        strategy: ConnectStrategy,
    ) -> Result<(), DarumaError> {
        self.runner
            .run(&NmCommand::set_password_flag(id, PasswordFlag::PerUserStored))
            .await?;

        let passcode = totp::generate_passcode(&credential.otp_secret)?;
        tracing::debug!(connection = id, "minted a fresh passcode");
        let combined = CombinedSecret::from_parts(&credential.password, &passcode);

        match strategy {
            ConnectStrategy::ModifySecrets => {
                self.runner
                    .run(&NmCommand::inject_secret(id, &combined))
                    .await?;
                self.runner.run(&NmCommand::up(id)).await?;
            }
            ConnectStrategy::PasswdFile => {
                self.up_with_passwd_file(id, &combined).await?;
            }
        }

        self.runner
            .run(&NmCommand::set_password_flag(id, PasswordFlag::AlwaysPrompt))
            .await?;

        tracing::info!(connection = id, "connection established");
        Ok(())
    }

    /// Bring the connection down
    pub async fn disconnect(&self, id: &str) -> Result<(), NmError> {
        self.runner.run(&NmCommand::down(id)).await?;
        tracing::info!(connection = id, "connection closed");
        Ok(())
    }

    /// Connect via a one-shot passwd-file instead of modifying the profile
    ///
    /// The file only exists for the duration of the `connection up` call
    /// and is removed again whether or not the connect succeeds.
    async fn up_with_passwd_file(
        &self,
        id: &str,
        secret: &CombinedSecret,
    ) -> Result<(), DarumaError> {
        write_passwd_file(&self.passwd_file, secret).await?;

        let path = self.passwd_file.to_string_lossy();
        let result = self
            .runner
            .run(&NmCommand::up_with_passwd_file(id, &path))
            .await;

        if let Err(e) = tokio::fs::remove_file(&self.passwd_file).await {
            tracing::warn!(
                path = %self.passwd_file.display(),
                error = %e,
                "failed to remove passwd-file"
            );
        }

        result?;
        Ok(())
    }
}

/// Write the secret in nmcli passwd-file syntax, readable only by the
/// owner
async fn write_passwd_file(path: &Path, secret: &CombinedSecret) -> std::io::Result<()> {
    use tokio::io::AsyncWriteExt;

    // Remove any stale file first so create_new below cannot be pointed
    // at somebody else's inode
    match tokio::fs::remove_file(path).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }

    let mut options = tokio::fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(path).await?;
    file.write_all(format!("vpn.secrets.password:\"{}\"", secret.expose()).as_bytes())
        .await?;
    file.flush().await?;

    Ok(())
}
