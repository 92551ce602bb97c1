use std::path::PathBuf;

use crate::resolve::Resolution;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Json,
    Table,
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub output_mode: OutputMode,
    pub verbose: bool,
    pub api_key: Option<String>,
    pub api_url: Option<String>,
    pub registry_path: PathBuf,
    pub resolution: Resolution,
}
