use dialoguer::Password;
use serde_json::json;

use crate::api::client::GoveeApi;
use crate::auth::credentials::{mask_key, resolve_api_key};
use crate::auth::keychain;
use crate::cli::output::print_json;
use crate::config::RuntimeConfig;
use crate::error::AppError;
use crate::registry;

pub async fn handle_login(config: &RuntimeConfig) -> Result<(), AppError> {
    let api_key = match config.api_key.as_deref().filter(|k| !k.trim().is_empty()) {
        Some(key) => key.trim().to_string(),
        None => Password::new()
            .with_prompt("Govee API key")
            .interact()
            .map_err(|e| AppError::InvalidInput(e.to_string()))?,
    };

    if api_key.trim().is_empty() {
        return Err(AppError::InvalidInput("API key is required".into()));
    }

    // A bad key comes back as an auth error here, before anything is stored.
    let api = GoveeApi::new(&api_key, config.api_url.clone())?;
    let snapshot = api.list_devices().await?;

    keychain::store_api_key(&api_key)?;

    print_json(&json!({
        "status": "logged_in",
        "key": mask_key(&api_key),
        "devices": snapshot.devices().len(),
    }));
    Ok(())
}

pub async fn handle_logout(_config: &RuntimeConfig) -> Result<(), AppError> {
    keychain::clear_api_key()?;
    print_json(&json!({"status": "logged_out"}));
    Ok(())
}

pub async fn handle_status(config: &RuntimeConfig) -> Result<(), AppError> {
    let mut result = match resolve_api_key(config.api_key.as_deref()) {
        Ok(key) => json!({
            "authenticated": true,
            "key_source": key.source,
            "key": mask_key(&key.value),
        }),
        Err(AppError::NotAuthenticated) => json!({"authenticated": false}),
        Err(e) => return Err(e),
    };

    result["registry"] = json!(config.registry_path.display().to_string());
    match registry::load(&config.registry_path) {
        Ok(snapshot) => {
            result["registry_devices"] = json!(snapshot.devices().len());
            result["registry_saved_at"] = json!(snapshot.saved_at);
        }
        Err(AppError::RegistryNotFound(_)) => {
            result["registry_devices"] = json!(null);
        }
        Err(e) => return Err(e),
    }

    print_json(&result);
    Ok(())
}
