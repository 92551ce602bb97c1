use std::path::{Path, PathBuf};

use serde_json::json;

use crate::api::client::GoveeApi;
use crate::api::response::ControlResponse;
use crate::error::AppError;
use crate::models::command::{Command, Operation};
use crate::models::device::{Device, Snapshot};
use crate::models::device_state::DeviceState;
use crate::registry;

/// Sentinel device list meaning every device on the account.
pub const ALL_DEVICES: &str = "all";

/// What to do with requested names that match no registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Resolution {
    /// Skip them.
    #[default]
    Lenient,
    /// Fail with `DeviceNotFound` before anything is sent.
    Strict,
}

/// Outcome of one device in a keep-going dispatch.
#[derive(Debug)]
pub struct DeviceOutcome {
    pub device: Device,
    pub result: Result<ControlResponse, AppError>,
}

impl DeviceOutcome {
    pub fn to_json(&self) -> serde_json::Value {
        let mut obj = json!({
            "name": self.device.device_name,
            "device": self.device.device,
            "model": self.device.model,
        });
        match &self.result {
            Ok(response) => {
                obj["ok"] = json!(true);
                obj["code"] = json!(response.code);
                obj["message"] = json!(response.message);
            }
            Err(err) => {
                obj["ok"] = json!(false);
                obj["error"] = err.to_json();
            }
        }
        obj
    }
}

#[derive(Debug, Default)]
pub struct DispatchReport {
    pub outcomes: Vec<DeviceOutcome>,
}

impl DispatchReport {
    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_err()).count()
    }

    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "total": self.outcomes.len(),
            "failed": self.failed(),
            "devices": self.outcomes.iter().map(DeviceOutcome::to_json).collect::<Vec<_>>(),
        })
    }
}

/// True when the request is exactly the `all` sentinel.
pub fn is_all(names: &[String]) -> bool {
    names.len() == 1 && names[0] == ALL_DEVICES
}

/// Collapse repeated names, keeping first-occurrence order.
fn unique_names(names: &[String]) -> Vec<&str> {
    let mut unique: Vec<&str> = Vec::new();
    for name in names {
        if !unique.contains(&name.as_str()) {
            unique.push(name);
        }
    }
    unique
}

/// Resolve names against a snapshot.
///
/// Every entry whose display name matches exactly is selected, so
/// same-named devices all receive the command. Matches are grouped by
/// requested name, each group in registry order.
pub fn resolve_devices<'a>(
    snapshot: &'a Snapshot,
    names: &[String],
    resolution: Resolution,
) -> Result<Vec<&'a Device>, AppError> {
    let mut matched = Vec::new();
    let mut missing = Vec::new();

    for name in unique_names(names) {
        let before = matched.len();
        matched.extend(snapshot.matching(name));
        if matched.len() == before {
            missing.push(name);
        }
    }

    if !missing.is_empty() {
        if resolution == Resolution::Strict {
            return Err(AppError::DeviceNotFound(missing.join(", ")));
        }
        tracing::debug!(names = ?missing, "Skipping names with no registry entry");
    }

    Ok(matched)
}

/// Resolves device names and issues one request per matched device.
pub struct Dispatcher {
    api: GoveeApi,
    registry_path: PathBuf,
    resolution: Resolution,
}

impl Dispatcher {
    pub fn new(api: GoveeApi, registry_path: impl Into<PathBuf>, resolution: Resolution) -> Self {
        Self {
            api,
            registry_path: registry_path.into(),
            resolution,
        }
    }

    pub fn api(&self) -> &GoveeApi {
        &self.api
    }

    pub fn registry_path(&self) -> &Path {
        &self.registry_path
    }

    /// Fetch the live device list and write it to the registry.
    pub async fn sync_registry(&self) -> Result<Snapshot, AppError> {
        let snapshot = self.api.list_devices().await?;
        registry::save(&snapshot, &self.registry_path)
    }

    /// The devices targeted by `names`, in dispatch order.
    ///
    /// `all` is resolved against a live list; anything else against the
    /// local registry.
    async fn targets(&self, names: &[String]) -> Result<Vec<Device>, AppError> {
        let (snapshot, names) = if is_all(names) {
            let live = self.api.list_devices().await?;
            let names = live.display_names();
            (live, names)
        } else {
            (registry::load(&self.registry_path)?, names.to_vec())
        };

        Ok(resolve_devices(&snapshot, &names, self.resolution)?
            .into_iter()
            .cloned()
            .collect())
    }

    /// Send `op` to every matched device, stopping at the first error.
    ///
    /// Commands sent before a failure stay applied.
    pub async fn dispatch(
        &self,
        names: &[String],
        op: &Operation,
    ) -> Result<Vec<ControlResponse>, AppError> {
        let command = op.validate()?;
        let devices = self.targets(names).await?;

        let mut responses = Vec::with_capacity(devices.len());
        for device in &devices {
            responses.push(self.send(device, &command).await?);
        }
        Ok(responses)
    }

    /// Send `op` to every matched device, recording per-device failures
    /// instead of aborting.
    pub async fn dispatch_report(
        &self,
        names: &[String],
        op: &Operation,
    ) -> Result<DispatchReport, AppError> {
        let command = op.validate()?;
        let devices = self.targets(names).await?;

        let mut report = DispatchReport::default();
        for device in devices {
            let result = self.send(&device, &command).await;
            if let Err(ref err) = result {
                tracing::warn!(
                    name = %device.device_name,
                    error = %err,
                    "Command failed, continuing"
                );
            }
            report.outcomes.push(DeviceOutcome { device, result });
        }
        Ok(report)
    }

    pub async fn get_many_device_states(
        &self,
        names: &[String],
    ) -> Result<Vec<DeviceState>, AppError> {
        let devices = self.targets(names).await?;

        let mut states = Vec::with_capacity(devices.len());
        for device in &devices {
            states.push(
                self.api
                    .get_device_state(&device.device, &device.model)
                    .await?,
            );
        }
        Ok(states)
    }

    async fn send(&self, device: &Device, command: &Command) -> Result<ControlResponse, AppError> {
        tracing::debug!(
            name = %device.device_name,
            device = %device.device,
            command = command.name(),
            "Dispatching"
        );
        self.api
            .send_control_command(&device.device, &device.model, command)
            .await
    }
}
