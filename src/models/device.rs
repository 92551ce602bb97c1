use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A device registered to the account, as returned by the list call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub device: String,
    pub model: String,
    pub device_name: String,
    #[serde(default)]
    pub controllable: bool,
    #[serde(default)]
    pub retrievable: bool,
    #[serde(default)]
    pub support_cmds: Vec<String>,
    #[serde(default)]
    pub properties: DeviceProperties,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_tem: Option<ColorTemProperty>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorTemProperty {
    pub range: KelvinRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KelvinRange {
    pub min: u32,
    pub max: u32,
}

impl Device {
    pub fn supports(&self, cmd: &str) -> bool {
        self.support_cmds.iter().any(|c| c == cmd)
    }

    pub fn color_tem_range(&self) -> Option<KelvinRange> {
        self.properties.color_tem.map(|p| p.range)
    }
}

/// The device list envelope. Stored verbatim as the local registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub data: SnapshotData,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub code: i32,
    /// Set when the snapshot is written to disk; absent on live responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotData {
    #[serde(default)]
    pub devices: Vec<Device>,
}

impl Snapshot {
    pub fn from_devices(devices: Vec<Device>) -> Self {
        Self {
            data: SnapshotData { devices },
            message: "Success".into(),
            code: 200,
            saved_at: None,
        }
    }

    pub fn devices(&self) -> &[Device] {
        &self.data.devices
    }

    /// Every entry whose display name is exactly `name`, in registry order.
    pub fn matching(&self, name: &str) -> Vec<&Device> {
        self.data
            .devices
            .iter()
            .filter(|d| d.device_name == name)
            .collect()
    }

    /// Display names in registry order, each listed once.
    pub fn display_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for device in &self.data.devices {
            if !names.contains(&device.device_name) {
                names.push(device.device_name.clone());
            }
        }
        names
    }
}
