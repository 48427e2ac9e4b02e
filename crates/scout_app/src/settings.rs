use std::fs;
use std::path::Path;
use std::time::Duration;

use scout_engine::{ApiSettings, PollSettings, TASK_ID_PLACEHOLDER};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logging::LogDestination;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings file: {0}")]
    Parse(String),
    #[error("status_path must contain {{task_id}}: {0}")]
    StatusPath(String),
    #[error("{0}")]
    BaseUrl(String),
}

/// On-disk settings. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoutSettings {
    pub api: ApiSection,
    pub poll: PollSection,
    pub log_destination: LogDestination,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSection {
    pub base_url: String,
    pub submit_path: String,
    pub status_path: String,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollSection {
    pub interval_ms: u64,
    /// Unset means wait for the service indefinitely.
    pub max_wait_ms: Option<u64>,
}

impl Default for ApiSection {
    fn default() -> Self {
        let api = ApiSettings::default();
        Self {
            base_url: api.base_url,
            submit_path: api.submit_path,
            status_path: api.status_path,
            connect_timeout_ms: api.connect_timeout.as_millis() as u64,
            request_timeout_ms: api.request_timeout.as_millis() as u64,
        }
    }
}

impl Default for PollSection {
    fn default() -> Self {
        let poll = PollSettings::default();
        Self {
            interval_ms: poll.interval.as_millis() as u64,
            max_wait_ms: poll.max_wait.map(|limit| limit.as_millis() as u64),
        }
    }
}

impl ScoutSettings {
    /// Reads settings from `path`. `None` means there is no such file and the
    /// caller should fall back to defaults. Does not log, since it runs
    /// before the logger exists.
    pub fn load(path: &Path) -> Result<Option<Self>, SettingsError> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Self::parse(&content).map(Some)
    }

    pub fn parse(content: &str) -> Result<Self, SettingsError> {
        let settings: Self =
            ron::from_str(content).map_err(|err| SettingsError::Parse(err.to_string()))?;
        if !settings.api.status_path.contains(TASK_ID_PLACEHOLDER) {
            return Err(SettingsError::StatusPath(settings.api.status_path));
        }
        settings
            .api_settings()
            .parse_base_url()
            .map_err(|err| SettingsError::BaseUrl(err.to_string()))?;
        Ok(settings)
    }

    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            base_url: self.api.base_url.clone(),
            submit_path: self.api.submit_path.clone(),
            status_path: self.api.status_path.clone(),
            connect_timeout: Duration::from_millis(self.api.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.api.request_timeout_ms),
        }
    }

    pub fn poll_settings(&self) -> PollSettings {
        PollSettings {
            // A zero period would make tokio's interval panic.
            interval: Duration::from_millis(self.poll.interval_ms.max(1)),
            max_wait: self.poll.max_wait_ms.map(Duration::from_millis),
        }
    }
}
