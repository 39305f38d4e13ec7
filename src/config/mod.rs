pub mod default;

use std::path::PathBuf;
use std::time::Duration;

use crate::cli::Cli;
use default::USER_DIR_NAME;

/// Resolved settings for talking to the recon service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL including the `/api` prefix
    pub api_url: String,
    /// Status polling interval while watching a scan
    pub poll_interval: Duration,
    /// Per-request timeout
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default::DEFAULT_API_URL.to_string(),
            poll_interval: Duration::from_millis(default::DEFAULT_POLL_INTERVAL_MS),
            request_timeout: Duration::from_millis(default::DEFAULT_REQUEST_TIMEOUT_MS),
        }
    }
}

impl ClientConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            api_url: cli.api_url.trim().to_string(),
            poll_interval: Duration::from_millis(cli.poll_interval_ms),
            request_timeout: Duration::from_millis(cli.request_timeout_ms),
        }
    }
}

/// `~/.ctsrecon`, created on demand.
pub fn get_user_dir_path() -> Option<PathBuf> {
    let dir = home::home_dir()?.join(USER_DIR_NAME);
    if !dir.exists() {
        if let Err(e) = std::fs::create_dir_all(&dir) {
            tracing::warn!("Failed to create {}: {}", dir.display(), e);
            return None;
        }
    }
    Some(dir)
}

/// Path of `file_name` inside the user directory.
pub fn get_user_file_path(file_name: &str) -> Option<PathBuf> {
    get_user_dir_path().map(|dir| dir.join(file_name))
}
