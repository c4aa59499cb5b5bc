//! The reconcile loop that keeps the target connection up
//!
//! Once per poll interval the keeper compares the observed state of the
//! target connection with the desired state ("activated") and, when they
//! differ and a physical link is available, runs one connect sequence.
//! Work and cadence are sequential: the next pause starts only after the
//! current tick has finished, so ticks never overlap.

use std::sync::Arc;

use tokio::sync::{watch, Mutex};
use tracing::{debug, info};

use crate::config::Settings;
use crate::error::Result;
use crate::nm::command::CommandRunner;
use crate::nm::observer::Observer;
use crate::nm::session::Session;
use crate::types::Credential;

/// How the keeper connects when the target is down
pub enum ConnectMode {
    /// Bring the profile up as-is, leaving its secrets untouched
    Plain,
    /// Run the full credential rotation on every connect
    Rotate(Credential),
}

/// What a single reconcile tick decided to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Target already activated, nothing to do
    AlreadyActive,
    /// No physical link to carry the VPN, waiting for the next tick
    Postponed,
    /// A connect sequence ran to completion
    Connected,
}

/// Owns the reconcile loop for one target connection
///
/// Exactly one keeper runs per process. The session lives behind a
/// `Mutex` shared with the shutdown path, so a connect sequence and the
/// final teardown can never mutate the profile at the same time.
pub struct Keeper<R: CommandRunner> {
    settings: Settings,
    mode: ConnectMode,
    observer: Observer<R>,
    session: Arc<Mutex<Session<R>>>,
}

impl<R: CommandRunner> Keeper<R> {
    pub fn new(
        settings: Settings,
        mode: ConnectMode,
        observer: Observer<R>,
        session: Arc<Mutex<Session<R>>>,
    ) -> Self {
        Self {
            settings,
            mode,
            observer,
            session,
        }
    }

    /// The observer backing this keeper, shared with the shutdown path
    pub fn observer(&self) -> &Observer<R> {
        &self.observer
    }

    /// Handle on the session mutex, shared with the shutdown path
    pub fn session(&self) -> Arc<Mutex<Session<R>>> {
        Arc::clone(&self.session)
    }

    /// Run one reconcile pass
    ///
    /// Errors out of the connect sequence propagate unchanged; expected
    /// idle states are outcomes, not errors.
    pub async fn tick(&self) -> Result<TickOutcome> {
        let target = self.settings.connection.as_str();

        if self.observer.is_active(target).await? {
            debug!(connection = target, "target already active");
            return Ok(TickOutcome::AlreadyActive);
        }

        let physical = self.observer.list_active(true).await?;
        if physical.is_empty() {
            info!(
                connection = target,
                "no active physical connection, postponing reconnect"
            );
            return Ok(TickOutcome::Postponed);
        }
        debug!(links = ?physical, "physical connectivity present");

        info!(connection = target, "target is down, reconnecting");
        let session = self.session.lock().await;
        match &self.mode {
            ConnectMode::Plain => session.connect_plain(target).await?,
            ConnectMode::Rotate(credential) => {
                session
                    .connect_with_rotation(target, credential, self.settings.strategy)
                    .await?
            }
        }

        Ok(TickOutcome::Connected)
    }

    /// Tick until the shutdown channel flips, then return
    ///
    /// Cancellation is cooperative: the shutdown flip only interrupts the
    /// pause between ticks, never a connect sequence already in flight.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> Result<()> {
        info!(
            connection = %self.settings.connection,
            interval = ?self.settings.poll_interval,
            "keeper started"
        );

        loop {
            self.tick().await?;

            tokio::select! {
                _ = tokio::time::sleep(self.settings.poll_interval) => {}
                _ = shutdown.changed() => {
                    info!("shutdown requested, leaving the reconcile loop");
                    return Ok(());
                }
            }
        }
    }
}
