use serde::{Deserialize, Serialize};

/// Body of a control call. Only `code` and `message` are interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlResponse {
    pub code: i32,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

impl ControlResponse {
    pub fn successful(&self) -> bool {
        self.code == 200
    }
}

#[derive(Debug, Deserialize)]
pub struct StateResponse {
    pub data: StateData,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub code: i32,
}

#[derive(Debug, Deserialize)]
pub struct StateData {
    pub device: String,
    pub model: String,
    #[serde(default)]
    pub properties: Vec<serde_json::Value>,
}
