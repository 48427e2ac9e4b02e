use std::time::Duration;

use reqwest::Url;
use scout_core::TaskId;

use crate::types::ClientBuildError;

/// Placeholder replaced by the task id in [`ApiSettings::status_path`].
pub const TASK_ID_PLACEHOLDER: &str = "{task_id}";

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub submit_path: String,
    /// Must contain `{task_id}`.
    pub status_path: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            submit_path: "/jobs".to_string(),
            status_path: "/jobs/{task_id}/status".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ApiSettings {
    /// Parses `base_url`. Only absolute http(s) URLs are accepted.
    pub fn parse_base_url(&self) -> Result<Url, ClientBuildError> {
        let invalid = |reason: String| ClientBuildError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason,
        };
        let url = Url::parse(self.base_url.trim()).map_err(|err| invalid(err.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {:?}", url.scheme())));
        }
        if url.cannot_be_a_base() {
            return Err(invalid("cannot carry a path".to_string()));
        }
        Ok(url)
    }
}

/// Appends `path` to `base` one segment at a time. A `{task_id}` segment is
/// replaced by the task id, which gets percent-encoded like any other
/// segment, so `/`, `?` and `#` in an id stay inside that segment.
pub(crate) fn endpoint(base: &Url, path: &str, task_id: Option<&TaskId>) -> Url {
    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty();
        for segment in path.split('/').filter(|segment| !segment.is_empty()) {
            match task_id {
                Some(id) if segment == TASK_ID_PLACEHOLDER => segments.push(id.as_str()),
                _ => segments.push(segment),
            };
        }
    }
    url
}

#[derive(Debug, Clone)]
pub struct PollSettings {
    /// Delay between status queries.
    pub interval: Duration,
    /// Give up on a job after this long. `None` polls until a terminal state.
    pub max_wait: Option<Duration>,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            max_wait: None,
        }
    }
}
