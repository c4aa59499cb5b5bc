//! nmcli command construction and execution
//!
//! Every interaction with NetworkManager goes through an [`NmCommand`]
//! (a plain argv, never a shell line) executed by a [`CommandRunner`].
//! Commands that carry a secret know about it, so every diagnostic
//! surface (debug logging, error text) can redact it.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::NmError;
use crate::types::{CombinedSecret, PasswordFlag};

/// Name of the NetworkManager CLI binary
pub const NMCLI: &str = "nmcli";

/// Placeholder substituted for secret values in diagnostics
pub const REDACTED: &str = "*****";

/// One nmcli invocation: argument vector plus an optional sensitive value
/// that must never appear in logs or error messages
pub struct NmCommand {
    args: Vec<String>,
    sensitive: Option<String>,
}

impl NmCommand {
    fn new(args: Vec<String>) -> Self {
        Self {
            args,
            sensitive: None,
        }
    }

    /// `nmcli -f NAME,TYPE,STATE -t connection show --active`
    pub fn list_active() -> Self {
        Self::new(
            ["-f", "NAME,TYPE,STATE", "-t", "connection", "show", "--active"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        )
    }

    /// `nmcli connection up <id>`
    pub fn up(id: &str) -> Self {
        Self::new(vec![
            "connection".to_string(),
            "up".to_string(),
            id.to_string(),
        ])
    }

    /// `nmcli connection up <id> passwd-file <path>`
    ///
    /// The file referenced here holds the combined secret, so its path is
    /// loggable but its content never is.
    pub fn up_with_passwd_file(id: &str, path: &str) -> Self {
        Self::new(vec![
            "connection".to_string(),
            "up".to_string(),
            id.to_string(),
            "passwd-file".to_string(),
            path.to_string(),
        ])
    }

    /// `nmcli connection down <id>`
    pub fn down(id: &str) -> Self {
        Self::new(vec![
            "connection".to_string(),
            "down".to_string(),
            id.to_string(),
        ])
    }

    /// `nmcli connection modify <id> +vpn.data password-flags=<n>`
    pub fn set_password_flag(id: &str, flag: PasswordFlag) -> Self {
        Self::new(vec![
            "connection".to_string(),
            "modify".to_string(),
            id.to_string(),
            "+vpn.data".to_string(),
            format!("password-flags={}", flag.nmcli_value()),
        ])
    }

    /// `nmcli connection modify <id> vpn.secrets password=<secret>`
    pub fn inject_secret(id: &str, secret: &CombinedSecret) -> Self {
        let value = secret.expose().to_string();
        Self {
            args: vec![
                "connection".to_string(),
                "modify".to_string(),
                id.to_string(),
                "vpn.secrets".to_string(),
                format!("password={}", value),
            ],
            sensitive: Some(value),
        }
    }

    /// The raw argument vector handed to the process
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Replace the sensitive value in arbitrary text
    pub fn redact(&self, text: &str) -> String {
        match &self.sensitive {
            Some(value) if !value.is_empty() => text.replace(value, REDACTED),
            _ => text.to_string(),
        }
    }

    /// The full command line with the sensitive value masked, safe to log
    pub fn redacted_line(&self) -> String {
        let line = format!("{} {}", NMCLI, self.args.join(" "));
        self.redact(&line)
    }
}

/// Execution seam for nmcli commands
///
/// Production code uses [`SystemRunner`]; tests substitute a scripted
/// runner that records argument vectors instead of spawning processes.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run the command, returning captured stdout on exit code zero
    async fn run(&self, command: &NmCommand) -> Result<String, NmError>;
}

// Observer and session share one runner through an Arc
#[async_trait]
impl<T: CommandRunner + ?Sized> CommandRunner for Arc<T> {
    async fn run(&self, command: &NmCommand) -> Result<String, NmError> {
        self.as_ref().run(command).await
    }
}

/// Runs nmcli as a child process on the system
pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, command: &NmCommand) -> Result<String, NmError> {
        tracing::debug!(command = %command.redacted_line(), "running nmcli");

        let output = Command::new(NMCLI)
            .args(command.args())
            .output()
            .await
            .map_err(|e| NmError::SpawnFailed {
                reason: e.to_string(),
            })?;

        if output.status.success() {
            return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
        }

        let code = output.status.code().unwrap_or(-1);
        let stderr = command.redact(String::from_utf8_lossy(&output.stderr).trim());
        tracing::warn!(
            command = %command.redacted_line(),
            code,
            stderr = %stderr,
            "nmcli reported failure"
        );

        Err(NmError::CommandFailed {
            command: command.redacted_line(),
            code,
            stderr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Passcode, StaticPassword};

    #[test]
    fn test_list_active_argv() {
        let command = NmCommand::list_active();
        assert_eq!(
            command.args(),
            ["-f", "NAME,TYPE,STATE", "-t", "connection", "show", "--active"]
        );
    }

    #[test]
    fn test_flag_argv_carries_numeric_value() {
        let stored = NmCommand::set_password_flag("Work VPN", PasswordFlag::PerUserStored);
        assert_eq!(
            stored.args(),
            ["connection", "modify", "Work VPN", "+vpn.data", "password-flags=1"]
        );

        let prompt = NmCommand::set_password_flag("Work VPN", PasswordFlag::AlwaysPrompt);
        assert_eq!(prompt.args().last().unwrap(), "password-flags=2");
    }

    #[test]
    fn test_connection_name_is_a_single_argument() {
        // Names with spaces or shell metacharacters must stay one argv entry
        let command = NmCommand::up("Office VPN; rm -rf /");
        assert_eq!(
            command.args(),
            ["connection", "up", "Office VPN; rm -rf /"]
        );
    }

    #[test]
    fn test_inject_secret_redacts_value() {
        let password = StaticPassword::new("Secr3t".to_string());
        let passcode = Passcode::new("123456".to_string());
        let secret = CombinedSecret::from_parts(&password, &passcode);

        let command = NmCommand::inject_secret("Work VPN", &secret);

        assert!(
            command.args().iter().any(|a| a == "password=Secr3t123456"),
            "The real value must reach the argument vector"
        );
        let line = command.redacted_line();
        assert!(!line.contains("Secr3t123456"), "Log line leaked the secret");
        assert!(line.contains(REDACTED));
    }

    #[test]
    fn test_redact_covers_error_text() {
        let password = StaticPassword::new("Secr3t".to_string());
        let passcode = Passcode::new("123456".to_string());
        let secret = CombinedSecret::from_parts(&password, &passcode);
        let command = NmCommand::inject_secret("Work VPN", &secret);

        let scrubbed = command.redact("invalid secret 'Secr3t123456' rejected");
        assert_eq!(scrubbed, format!("invalid secret '{}' rejected", REDACTED));
    }

    #[test]
    fn test_plain_commands_redact_nothing() {
        let command = NmCommand::down("Work VPN");
        assert_eq!(command.redacted_line(), "nmcli connection down Work VPN");
    }
}
