use serde::Serialize;

use crate::auth::keychain;
use crate::error::AppError;

pub const API_KEY_ENV: &str = "GOVEE_APIKEY";

/// Where the API key in use came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeySource {
    /// `--api-key` or the environment (clap merges both).
    Argument,
    Keychain,
}

#[derive(Debug, Clone)]
pub struct ApiKey {
    pub value: String,
    pub source: KeySource,
}

/// Pick the API key: an explicit/env value wins, the keychain is the fallback.
///
/// The key is not checked here; a bad key shows up as an auth error from
/// the first API call.
pub fn resolve_api_key(explicit: Option<&str>) -> Result<ApiKey, AppError> {
    if let Some(value) = explicit.map(str::trim).filter(|v| !v.is_empty()) {
        return Ok(ApiKey {
            value: value.to_string(),
            source: KeySource::Argument,
        });
    }

    let value = keychain::get_api_key()?.ok_or(AppError::NotAuthenticated)?;
    Ok(ApiKey {
        value,
        source: KeySource::Keychain,
    })
}

/// Show only the first and last few characters of a key.
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}
