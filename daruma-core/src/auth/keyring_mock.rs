//! Mock keyring implementation for testing
//!
//! Provides an in-memory keyring implementation that doesn't require
//! system keyring access. Used in CI environments and for testing.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::KeyringError;
use crate::types::{ParamKey, KEYRING_SERVICE};

lazy_static::lazy_static! {
    static ref MOCK_KEYRING: Mutex<HashMap<String, String>> = Mutex::new(HashMap::new());
}

fn make_key(key: ParamKey) -> String {
    format!("{}:{}", KEYRING_SERVICE, key.as_str())
}

/// Retrieve a parameter from the mock keyring
pub fn get(key: ParamKey) -> Result<String, KeyringError> {
    let keyring = MOCK_KEYRING.lock().map_err(|_| KeyringError::RetrieveFailed {
        key: key.as_str().to_string(),
    })?;

    keyring
        .get(&make_key(key))
        .cloned()
        .ok_or(KeyringError::NotFound {
            key: key.as_str().to_string(),
        })
}

/// Store a parameter in the mock keyring
pub fn set(key: ParamKey, value: &str) -> Result<(), KeyringError> {
    let mut keyring = MOCK_KEYRING.lock().map_err(|_| KeyringError::StoreFailed {
        key: key.as_str().to_string(),
    })?;

    keyring.insert(make_key(key), value.to_string());
    Ok(())
}

/// Remove a parameter from the mock keyring
pub fn delete(key: ParamKey) -> Result<(), KeyringError> {
    let mut keyring = MOCK_KEYRING.lock().map_err(|_| KeyringError::StoreFailed {
        key: key.as_str().to_string(),
    })?;

    keyring.remove(&make_key(key));
    Ok(())
}
