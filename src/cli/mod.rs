pub mod auth;
pub mod control;
pub mod devices;
pub mod output;
pub mod state;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::api::client::GoveeApi;
use crate::auth::credentials::{resolve_api_key, API_KEY_ENV};
use crate::config::RuntimeConfig;
use crate::error::AppError;
use crate::models::command::PowerState;
use crate::registry::DEFAULT_REGISTRY_PATH;
use crate::resolve::Dispatcher;

#[derive(Parser)]
#[command(
    name = "goveectl",
    version,
    about = "Govee Cloud CLI - list, query and control Govee smart lights"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as human-readable table instead of JSON
    #[arg(short = 't', long = "table", global = true)]
    pub table: bool,

    /// Verbose output (show HTTP requests/responses)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Govee API key (falls back to the key stored by 'goveectl login')
    #[arg(long, env = API_KEY_ENV, hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Local device registry file
    #[arg(long, env = "GOVEE_REGISTRY", default_value = DEFAULT_REGISTRY_PATH, global = true)]
    pub registry: PathBuf,

    /// API base URL
    #[arg(long, env = "GOVEE_API_URL", hide = true, global = true)]
    pub api_url: Option<String>,

    /// Fail if a device name matches nothing in the registry
    #[arg(long, global = true)]
    pub strict: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Store a Govee API key in the system keychain
    Login,

    /// Remove the stored API key
    Logout,

    /// Show credential and registry status
    Status,

    /// Manage devices
    #[command(subcommand)]
    Devices(devices::DevicesCommand),

    /// Show current state of devices
    State {
        #[command(flatten)]
        target: Target,
    },

    /// Turn devices on or off
    Turn {
        #[arg(value_enum)]
        state: PowerState,
        #[command(flatten)]
        target: Target,
        /// Keep going after a device fails and report every outcome
        #[arg(long)]
        keep_going: bool,
    },

    /// Set brightness (0-100)
    Brightness {
        #[arg(allow_hyphen_values = true)]
        value: String,
        #[command(flatten)]
        target: Target,
        /// Keep going after a device fails and report every outcome
        #[arg(long)]
        keep_going: bool,
    },

    /// Set color as r,g,b (each 0-255)
    Color {
        #[arg(allow_hyphen_values = true)]
        value: String,
        #[command(flatten)]
        target: Target,
        /// Keep going after a device fails and report every outcome
        #[arg(long)]
        keep_going: bool,
    },

    /// Set color temperature in Kelvin (2000-9000)
    ColorTemp {
        #[arg(allow_hyphen_values = true)]
        value: String,
        #[command(flatten)]
        target: Target,
        /// Keep going after a device fails and report every outcome
        #[arg(long)]
        keep_going: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct Target {
    /// Comma-separated device names, or 'all'
    #[arg(value_delimiter = ',', required = true)]
    pub devices: Vec<String>,
}

/// Build a dispatcher for the configured key, API host and registry.
pub fn connect(config: &RuntimeConfig) -> Result<Dispatcher, AppError> {
    let key = resolve_api_key(config.api_key.as_deref())?;
    tracing::debug!(source = ?key.source, "Using API key");
    let api = GoveeApi::new(&key.value, config.api_url.clone())?;
    Ok(Dispatcher::new(
        api,
        config.registry_path.clone(),
        config.resolution,
    ))
}
