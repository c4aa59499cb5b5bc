//! Keyring operations for secure parameter storage
//!
//! Uses the system keyring (GNOME Keyring on Linux) to cache the three
//! startup parameters, so the keeper can restart unattended once each
//! value has been provided interactively a single time.

use keyring::Entry;

use crate::error::KeyringError;
use crate::types::{ParamKey, KEYRING_SERVICE};

fn entry(key: ParamKey) -> Result<Entry, KeyringError> {
    Entry::new(KEYRING_SERVICE, key.as_str()).map_err(|_| KeyringError::ServiceUnavailable)
}

/// Retrieve a parameter from the system keyring
///
/// `NotFound` means the keyring works but holds no value for this key;
/// callers fall back to prompting in that case. Any other error means the
/// backend itself failed.
pub fn get(key: ParamKey) -> Result<String, KeyringError> {
    let entry = entry(key)?;

    match entry.get_password() {
        Ok(value) => Ok(value),
        Err(keyring::Error::NoEntry) => Err(KeyringError::NotFound {
            key: key.as_str().to_string(),
        }),
        Err(_) => Err(KeyringError::RetrieveFailed {
            key: key.as_str().to_string(),
        }),
    }
}

/// Store a parameter in the system keyring
pub fn set(key: ParamKey, value: &str) -> Result<(), KeyringError> {
    let entry = entry(key)?;

    entry.set_password(value).map_err(|_| KeyringError::StoreFailed {
        key: key.as_str().to_string(),
    })
}

/// Remove a parameter from the system keyring
///
/// Removing a missing entry is not an error.
pub fn delete(key: ParamKey) -> Result<(), KeyringError> {
    let entry = entry(key)?;

    match entry.delete_credential() {
        Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
        Err(_) => Err(KeyringError::StoreFailed {
            key: key.as_str().to_string(),
        }),
    }
}
