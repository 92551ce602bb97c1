use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication failed ({status}): {body}")]
    Auth { status: u16, body: String },

    #[error("No API key found. Pass --api-key, set GOVEE_APIKEY, or run 'goveectl login'.")]
    NotAuthenticated,

    #[error("Keychain error: {0}")]
    Keychain(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    #[error("Device registry not found at {}. Run 'goveectl devices sync' first.", .0.display())]
    RegistryNotFound(PathBuf),

    #[error("Device registry at {} is malformed: {source}", path.display())]
    RegistryParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0}")]
    Validation(String),

    #[error("{failed} of {total} devices failed")]
    PartialFailure { failed: usize, total: usize },

    #[error("{0}")]
    InvalidInput(String),

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Auth { .. } | AppError::NotAuthenticated | AppError::Keychain(_) => 2,
            AppError::DeviceNotFound(_) | AppError::RegistryNotFound(_) => 3,
            AppError::Validation(_) => 4,
            _ => 1,
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Auth { .. } => "auth",
            AppError::NotAuthenticated => "not_authenticated",
            AppError::Keychain(_) => "keychain",
            AppError::Http { .. } => "http",
            AppError::DeviceNotFound(_) => "device_not_found",
            AppError::RegistryNotFound(_) => "registry_not_found",
            AppError::RegistryParse { .. } => "registry_parse",
            AppError::Validation(_) => "validation",
            AppError::PartialFailure { .. } => "partial_failure",
            AppError::InvalidInput(_) => "invalid_input",
            AppError::Transport(_) => "transport",
            AppError::Decode(_) => "decode",
            AppError::Io(_) => "io",
        }
    }

    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Auth { status, .. } | AppError::Http { status, .. } => Some(*status),
            AppError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        let mut obj = serde_json::json!({
            "error": self.error_type(),
            "message": self.to_string(),
        });
        if let Some(status) = self.status() {
            obj["status"] = serde_json::json!(status);
        }
        obj
    }
}
