//! daruma - self-righting VPN keeper for NetworkManager
//!
//! Keeps a named NetworkManager VPN connection continuously established.
//! Every reconnect combines the stored account password with a freshly
//! minted TOTP passcode and restores the profile's always-prompt secret
//! policy afterwards.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::sync::{watch, Mutex};

use daruma_core::auth::totp;
use daruma_core::config::{ConnectStrategy, Settings};
use daruma_core::error::{DarumaError, NmError};
use daruma_core::keeper::{ConnectMode, Keeper};
use daruma_core::nm::{Observer, Session, SystemRunner, NMCLI};
use daruma_core::types::{Credential, OtpSecret, ParamKey, StaticPassword};
use daruma_core::{init_logging, shutdown};

mod params;

#[derive(Parser)]
#[command(name = "daruma", version)]
#[command(about = "Keeps a 2FA NetworkManager VPN connection up with fresh TOTP passcodes")]
struct Cli {
    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Name of the NetworkManager connection to keep alive
    /// (see 'nmcli connection' for the available names)
    #[arg(long)]
    config: Option<String>,

    /// Static component of the VPN password
    #[arg(long)]
    password: Option<String>,

    /// Base32-encoded TOTP shared secret
    #[arg(long)]
    otp_secret: Option<String>,

    /// Seconds between reconcile ticks
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u64).range(1..))]
    interval: u64,

    /// Bring the connection up as-is, without rotating any secrets
    #[arg(long)]
    no_secrets: bool,

    /// How the combined secret is handed to nmcli
    #[arg(long, value_enum, default_value_t = StrategyArg::ModifySecrets)]
    strategy: StrategyArg,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum StrategyArg {
    /// Write the secret into the profile, then bring it up
    ModifySecrets,
    /// Pass the secret through a one-shot passwd-file
    PasswdFile,
}

impl From<StrategyArg> for ConnectStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::ModifySecrets => ConnectStrategy::ModifySecrets,
            StrategyArg::PasswdFile => ConnectStrategy::PasswdFile,
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    if let Err(e) = init_logging(cli.debug) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(2);
    }

    match run(cli).await {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            let exit_code = match e {
                // Configuration and credential problems (exit code 2)
                DarumaError::Config(_) | DarumaError::Keyring(_) | DarumaError::Otp(_) => 2,
                // Runtime failures talking to NetworkManager (exit code 1)
                DarumaError::Nm(_) | DarumaError::Io(_) => 1,
            };

            eprintln!("{}", e);
            std::process::exit(exit_code);
        }
    }
}

async fn run(cli: Cli) -> Result<(), DarumaError> {
    let nmcli_path = which::which(NMCLI).map_err(|_| NmError::MissingBinary {
        program: NMCLI.to_string(),
    })?;
    tracing::debug!(path = %nmcli_path.display(), "found nmcli");

    let connection = params::resolve(
        ParamKey::Config,
        cli.config,
        "VPN connection name (use 'nmcli connection' to find out)",
        false,
    )?;

    let mut settings = Settings::new(connection);
    settings.poll_interval = Duration::from_secs(cli.interval);
    settings.strategy = cli.strategy.into();
    settings.validate()?;

    let mode = if cli.no_secrets {
        ConnectMode::Plain
    } else {
        let password = params::resolve(
            ParamKey::Password,
            cli.password,
            "VPN password (static part)",
            true,
        )?;
        let otp_secret = params::resolve(
            ParamKey::OtpSecret,
            cli.otp_secret,
            "TOTP secret (Base32)",
            true,
        )?;

        let credential = Credential {
            password: StaticPassword::new(password),
            otp_secret: OtpSecret::new(otp_secret),
        };
        // Fail on a malformed secret now, not on the first reconnect
        totp::validate_secret(&credential.otp_secret)?;

        ConnectMode::Rotate(credential)
    };

    let runner = Arc::new(SystemRunner);
    let observer = Observer::new(Arc::clone(&runner));
    let session = Arc::new(Mutex::new(Session::new(runner)));
    let keeper = Keeper::new(settings.clone(), mode, observer, session);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    shutdown::spawn_listener(shutdown_tx);

    keeper.run(shutdown_rx).await?;

    // Graceful path: the loop has stopped, close the connection once
    let session = keeper.session();
    shutdown::teardown(keeper.observer(), &session, &settings.connection).await?;

    Ok(())
}
