use keyring::Entry;

use crate::error::AppError;

const SERVICE: &str = "goveectl";
const API_KEY_ENTRY: &str = "api_key";

fn entry(key: &str) -> Result<Entry, AppError> {
    Entry::new(SERVICE, key).map_err(|e| AppError::Keychain(e.to_string()))
}

pub fn store_api_key(api_key: &str) -> Result<(), AppError> {
    entry(API_KEY_ENTRY)?
        .set_password(api_key)
        .map_err(|e| AppError::Keychain(e.to_string()))
}

pub fn get_api_key() -> Result<Option<String>, AppError> {
    match entry(API_KEY_ENTRY)?.get_password() {
        Ok(val) if val.is_empty() => Ok(None),
        Ok(val) => Ok(Some(val)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => Err(AppError::Keychain(e.to_string())),
    }
}

pub fn clear_api_key() -> Result<(), AppError> {
    match entry(API_KEY_ENTRY)?.delete_credential() {
        Ok(()) => Ok(()),
        Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) => Err(AppError::Keychain(e.to_string())),
    }
}
