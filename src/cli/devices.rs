use chrono::Utc;
use clap::Subcommand;
use serde_json::json;
use tabled::Tabled;

use crate::cli::connect;
use crate::cli::output::print_output;
use crate::config::RuntimeConfig;
use crate::error::AppError;
use crate::models::device::{Device, Snapshot};
use crate::registry;

#[derive(Subcommand)]
pub enum DevicesCommand {
    /// List devices registered to the account
    List {
        /// Also write the list to the local registry
        #[arg(long)]
        save: bool,
    },

    /// Fetch the device list and write it to the local registry
    Sync,

    /// Show the local registry without contacting the API
    Cached,
}

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "MODEL")]
    model: String,
    #[tabled(rename = "CONTROL")]
    controllable: String,
    #[tabled(rename = "STATE")]
    retrievable: String,
    #[tabled(rename = "COMMANDS")]
    commands: String,
    #[tabled(rename = "KELVIN")]
    kelvin: String,
    #[tabled(rename = "DEVICE ID")]
    device_id: String,
}

fn yes_no(flag: bool) -> String {
    let s = if flag { "yes" } else { "no" };
    s.to_string()
}

fn device_row(device: &Device) -> DeviceRow {
    DeviceRow {
        name: device.device_name.clone(),
        model: device.model.clone(),
        controllable: yes_no(device.controllable),
        retrievable: yes_no(device.retrievable),
        commands: device.support_cmds.join(","),
        kelvin: device
            .color_tem_range()
            .filter(|_| device.supports("colorTem"))
            .map(|r| format!("{}-{}", r.min, r.max))
            .unwrap_or_else(|| "-".into()),
        device_id: device.device.clone(),
    }
}

fn device_json(device: &Device) -> serde_json::Value {
    json!({
        "name": device.device_name,
        "model": device.model,
        "device_id": device.device,
        "controllable": device.controllable,
        "retrievable": device.retrievable,
        "commands": device.support_cmds,
        "color_tem_range": device.color_tem_range(),
    })
}

fn print_devices(snapshot: &Snapshot, extra: serde_json::Value, config: &RuntimeConfig) {
    let rows: Vec<DeviceRow> = snapshot.devices().iter().map(device_row).collect();
    let mut value = json!({
        "devices": snapshot.devices().iter().map(device_json).collect::<Vec<_>>(),
    });
    if let (Some(obj), serde_json::Value::Object(extra)) = (value.as_object_mut(), extra) {
        obj.extend(extra);
    }
    print_output(&value, &rows, config.output_mode);
}

pub async fn handle(cmd: &DevicesCommand, config: &RuntimeConfig) -> Result<(), AppError> {
    match cmd {
        DevicesCommand::List { save } => handle_list(*save, config).await,
        DevicesCommand::Sync => handle_sync(config).await,
        DevicesCommand::Cached => handle_cached(config),
    }
}

async fn handle_list(save: bool, config: &RuntimeConfig) -> Result<(), AppError> {
    let dispatcher = connect(config)?;
    let snapshot = dispatcher.api().list_devices().await?;

    let mut extra = json!({});
    if save {
        registry::save(&snapshot, dispatcher.registry_path())?;
        extra["saved_to"] = json!(dispatcher.registry_path().display().to_string());
    }

    print_devices(&snapshot, extra, config);
    Ok(())
}

async fn handle_sync(config: &RuntimeConfig) -> Result<(), AppError> {
    let dispatcher = connect(config)?;
    let snapshot = dispatcher.sync_registry().await?;

    print_devices(
        &snapshot,
        json!({
            "saved_to": dispatcher.registry_path().display().to_string(),
            "saved_at": snapshot.saved_at,
        }),
        config,
    );
    Ok(())
}

fn handle_cached(config: &RuntimeConfig) -> Result<(), AppError> {
    let snapshot = registry::load(&config.registry_path)?;

    let age_secs = snapshot
        .saved_at
        .map(|at| Utc::now().signed_duration_since(at).num_seconds());
    if let Some(age) = age_secs {
        tracing::debug!(age_secs = age, "Registry age");
    }

    print_devices(
        &snapshot,
        json!({
            "registry": config.registry_path.display().to_string(),
            "saved_at": snapshot.saved_at,
            "age_secs": age_secs,
        }),
        config,
    );
    Ok(())
}
