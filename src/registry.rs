use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use chrono::Utc;

use crate::error::AppError;
use crate::models::device::Snapshot;

pub const DEFAULT_REGISTRY_PATH: &str = "devices.json";

/// Read the local device snapshot. A missing file is never created here.
pub fn load(path: &Path) -> Result<Snapshot, AppError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(AppError::RegistryNotFound(path.to_path_buf()))
        }
        Err(e) => return Err(AppError::Io(e)),
    };

    let snapshot: Snapshot =
        serde_json::from_str(&contents).map_err(|source| AppError::RegistryParse {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::debug!(
        path = %path.display(),
        devices = snapshot.devices().len(),
        "Loaded device registry"
    );
    Ok(snapshot)
}

/// Write `snapshot` to `path`, stamped with the current time.
pub fn save(snapshot: &Snapshot, path: &Path) -> Result<Snapshot, AppError> {
    let mut stamped = snapshot.clone();
    stamped.saved_at = Some(Utc::now());

    let json = serde_json::to_string_pretty(&stamped)?;
    fs::write(path, json)?;

    tracing::debug!(
        path = %path.display(),
        devices = stamped.devices().len(),
        "Saved device registry"
    );
    Ok(stamped)
}
