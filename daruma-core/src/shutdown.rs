//! Signal handling and final teardown
//!
//! A background task turns SIGTERM/SIGINT into a watch-channel flip; the
//! keeper observes the flip and leaves its loop, after which the main
//! task calls [`teardown`] exactly once. No exit happens here; the
//! process exits through `main` so destructors run.

use tokio::sync::{watch, Mutex};
use tracing::{debug, error, info};

use crate::error::Result;
use crate::nm::command::CommandRunner;
use crate::nm::observer::Observer;
use crate::nm::session::Session;

/// Resolve to the name of the first termination signal delivered
pub async fn wait_for_termination() -> std::io::Result<&'static str> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = signal(SignalKind::terminate())?;
    let mut interrupt = signal(SignalKind::interrupt())?;

    tokio::select! {
        _ = terminate.recv() => Ok("SIGTERM"),
        _ = interrupt.recv() => Ok("SIGINT"),
    }
}

/// Spawn the listener task that flips the shutdown channel on signal
///
/// If signal registration fails the channel flips immediately; a keeper
/// that cannot be interrupted must not keep running.
pub fn spawn_listener(tx: watch::Sender<bool>) {
    tokio::spawn(async move {
        match wait_for_termination().await {
            Ok(signal) => info!(signal, "termination signal received"),
            Err(e) => error!(error = %e, "signal listener failed"),
        }
        let _ = tx.send(true);
    });
}

/// Disconnect the target if it is still up
///
/// Returns whether a disconnect was actually issued. Called once per
/// process lifetime, on the graceful path only.
pub async fn teardown<R: CommandRunner>(
    observer: &Observer<R>,
    session: &Mutex<Session<R>>,
    id: &str,
) -> Result<bool> {
    if observer.is_active(id).await? {
        info!(connection = id, "closing connection before exit");
        let session = session.lock().await;
        session.disconnect(id).await?;
        Ok(true)
    } else {
        debug!(connection = id, "target already down, nothing to tear down");
        Ok(false)
    }
}
