//! Shared helpers for the integration suites
//!
//! The suites talk to a scripted stand-in for nmcli instead of the real
//! binary, so every test runs without NetworkManager present.

// Not every suite uses every helper
#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use daruma_core::auth::totp;
use daruma_core::error::NmError;
use daruma_core::nm::{CommandRunner, NmCommand};
use daruma_core::types::OtpSecret;

type Responder = Box<dyn Fn(&[String]) -> Result<String, NmError> + Send + Sync>;

/// Scripted stand-in for nmcli
///
/// Answers through a responder closure and records every argument
/// vector it was asked to run, in order.
pub struct FakeRunner {
    responder: Responder,
    calls: Mutex<Vec<Vec<String>>>,
}

impl FakeRunner {
    pub fn with_responder(
        responder: impl Fn(&[String]) -> Result<String, NmError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Serve the given listing for every query; accept every mutation
    ///
    /// The listing is shared, so a test can change what nmcli "reports"
    /// between ticks.
    pub fn serving(listing: Arc<Mutex<String>>) -> Self {
        Self::with_responder(move |args| {
            if is_query(args) {
                Ok(listing.lock().unwrap().clone())
            } else {
                Ok(String::new())
            }
        })
    }

    /// Every argument vector seen so far, in call order
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    /// The recorded calls that would modify system state
    pub fn mutating_calls(&self) -> Vec<Vec<String>> {
        self.calls().into_iter().filter(|c| !is_query(c)).collect()
    }
}

#[async_trait]
impl CommandRunner for FakeRunner {
    async fn run(&self, command: &NmCommand) -> Result<String, NmError> {
        // Mirror the production runner's diagnostic logging so the
        // logging suite exercises redaction end to end
        tracing::debug!(command = %command.redacted_line(), "running nmcli");

        self.calls.lock().unwrap().push(command.args().to_vec());
        (self.responder)(command.args())
    }
}

/// Whether an argument vector is a read-only listing query
pub fn is_query(args: &[String]) -> bool {
    args.iter().any(|a| a == "show")
}

/// A command failure as nmcli would report it
pub fn command_failure(detail: &str) -> NmError {
    NmError::CommandFailed {
        command: "nmcli".to_string(),
        code: 4,
        stderr: detail.to_string(),
    }
}

pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_secs()
}

/// All passcodes valid between two instants bracketing a connect call
///
/// A connect can cross a 30-second window boundary mid-flight, so an
/// assertion on the injected secret has to accept either window's code.
pub fn passcode_candidates(secret: &str, before: u64, after: u64) -> Vec<String> {
    let secret = OtpSecret::new(secret.to_string());
    let mut codes = Vec::new();

    for t in [before, after] {
        let code = totp::passcode_at(&secret, t)
            .expect("valid secret")
            .expose()
            .to_string();
        if !codes.contains(&code) {
            codes.push(code);
        }
    }

    codes
}
