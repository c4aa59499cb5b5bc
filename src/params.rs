//! Startup parameter acquisition
//!
//! Every parameter resolves the same way: command-line flag first, then
//! the keyring, then an interactive prompt. Values that did not come
//! from the keyring are written back to it, so after one interactive
//! run the keeper starts unattended.

use std::io::{self, Write};

use daruma_core::auth::keyring;
use daruma_core::error::{ConfigError, DarumaError, KeyringError};
use daruma_core::types::ParamKey;
use tracing::{debug, info, warn};

/// Where a parameter value came from
enum Source {
    /// Supplied on the command line; must be persisted
    Flag(String),
    /// Already cached in the keyring; used as-is
    Keyring(String),
    /// Nowhere yet; the user has to be asked
    NeedsPrompt,
}

/// Pick the value source given the flag and the keyring lookup result
///
/// Flags always win. A keyring hit is only consulted when no flag was
/// given; an empty stored value or any lookup failure falls through to
/// prompting, so a locked or absent keyring never blocks startup on its
/// own.
fn decide(flag: Option<String>, stored: Result<String, KeyringError>) -> Source {
    let from_flag = flag
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    if let Some(value) = from_flag {
        return Source::Flag(value);
    }

    match stored {
        Ok(value) if !value.trim().is_empty() => Source::Keyring(value),
        _ => Source::NeedsPrompt,
    }
}

/// Resolve one parameter through flag, keyring and prompt
///
/// `hide` selects no-echo input for secrets. The resolved value is
/// guaranteed non-empty; persisting a freshly obtained value is
/// mandatory, so a keyring write failure is fatal.
pub fn resolve(
    key: ParamKey,
    flag_value: Option<String>,
    prompt: &str,
    hide: bool,
) -> Result<String, DarumaError> {
    let stored = keyring::get(key);
    if let Err(e) = &stored {
        if !matches!(e, KeyringError::NotFound { .. }) {
            warn!(
                parameter = key.as_str(),
                error = %e,
                "keyring lookup failed, falling back to prompt"
            );
        }
    }

    let value = match decide(flag_value, stored) {
        Source::Keyring(value) => {
            debug!(parameter = key.as_str(), "parameter loaded from keyring");
            return Ok(value);
        }
        Source::Flag(value) => {
            debug!(parameter = key.as_str(), "parameter taken from command line");
            value
        }
        Source::NeedsPrompt => prompt_value(prompt, hide)?,
    };

    if value.trim().is_empty() {
        return Err(ConfigError::MissingParameter {
            parameter: key.as_str().to_string(),
        }
        .into());
    }

    keyring::set(key, &value)?;
    info!(parameter = key.as_str(), "parameter saved to keyring");

    Ok(value)
}

fn prompt_value(prompt: &str, hide: bool) -> Result<String, DarumaError> {
    if hide {
        Ok(rpassword::prompt_password(format!("{}: ", prompt))?)
    } else {
        prompt_input(&format!("{}: ", prompt))
    }
}

/// Low-level input prompting
fn prompt_input(prompt: &str) -> Result<String, DarumaError> {
    print!("{}", prompt);
    io::stdout().flush().map_err(DarumaError::Io)?;

    let mut input = String::new();
    io::stdin().read_line(&mut input).map_err(DarumaError::Io)?;

    Ok(input.trim_end().to_string())
}
