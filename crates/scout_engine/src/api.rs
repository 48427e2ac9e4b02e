use std::sync::Arc;

use reqwest::{StatusCode, Url};
use scout_core::{SearchCriteria, TaskId, TaskStatus};
use scout_logging::{scout_debug, scout_warn};

use crate::credentials::CredentialProvider;
use crate::settings::{endpoint, ApiSettings};
use crate::types::{ClientBuildError, StatusError, SubmitError};
use crate::wire::{StatusResponse, SubmitRequest, SubmitResponse};

/// The remote search-job service.
#[async_trait::async_trait]
pub trait JobApi: Send + Sync {
    /// Starts a background search and returns the id the service assigned.
    async fn submit(&self, criteria: &SearchCriteria) -> Result<TaskId, SubmitError>;

    /// Asks for the current state of a job. One request per call.
    async fn status(&self, task_id: &TaskId) -> Result<TaskStatus, StatusError>;
}

pub struct ReqwestJobApi {
    settings: ApiSettings,
    base_url: Url,
    credentials: Arc<dyn CredentialProvider>,
    client: reqwest::Client,
}

impl ReqwestJobApi {
    pub fn new(
        settings: ApiSettings,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self, ClientBuildError> {
        let base_url = settings.parse_base_url()?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()?;
        Ok(Self {
            settings,
            base_url,
            credentials,
            client,
        })
    }

    pub fn settings(&self) -> &ApiSettings {
        &self.settings
    }

    pub fn submit_url(&self) -> Url {
        endpoint(&self.base_url, &self.settings.submit_path, None)
    }

    pub fn status_url(&self, task_id: &TaskId) -> Url {
        endpoint(&self.base_url, &self.settings.status_path, Some(task_id))
    }
}

#[async_trait::async_trait]
impl JobApi for ReqwestJobApi {
    async fn submit(&self, criteria: &SearchCriteria) -> Result<TaskId, SubmitError> {
        let mut request = self
            .client
            .post(self.submit_url())
            .json(&SubmitRequest::new(criteria));
        match self.credentials.bearer_token() {
            Some(token) => request = request.bearer_auth(token),
            None => scout_debug!("No credentials available, submitting unauthenticated"),
        }

        let response = request.send().await.map_err(map_submit_error)?;
        let status = response.status();
        let text = response.text().await.map_err(map_submit_error)?;
        let parsed = serde_json::from_str::<SubmitResponse>(&text);

        if status == StatusCode::PAYMENT_REQUIRED {
            let message = parsed
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| "Not enough credits for this search.".to_string());
            return Err(SubmitError::InsufficientCredits(message));
        }

        if !status.is_success() {
            let message = parsed
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| format!("HTTP error! Status: {}", status.as_u16()));
            return Err(SubmitError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let body = parsed.map_err(|err| SubmitError::MalformedResponse(err.to_string()))?;
        if body.success == Some(false) {
            return Err(SubmitError::MalformedResponse(
                body.error
                    .unwrap_or_else(|| "success flag was false".to_string()),
            ));
        }
        match body.task_id {
            Some(task_id) if !task_id.trim().is_empty() => Ok(TaskId::new(task_id)),
            _ => {
                scout_warn!("Submission accepted without a task id: {text}");
                Err(SubmitError::MalformedResponse("missing task_id".to_string()))
            }
        }
    }

    async fn status(&self, task_id: &TaskId) -> Result<TaskStatus, StatusError> {
        let response = self
            .client
            .get(self.status_url(task_id))
            .send()
            .await
            .map_err(map_status_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(StatusError::HttpStatus(status.as_u16()));
        }

        let body: StatusResponse = response
            .json()
            .await
            .map_err(|err| StatusError::Decode(err.to_string()))?;
        Ok(body.into_status())
    }
}

fn map_submit_error(err: reqwest::Error) -> SubmitError {
    if err.is_timeout() {
        return SubmitError::Timeout;
    }
    SubmitError::Network(err.to_string())
}

fn map_status_error(err: reqwest::Error) -> StatusError {
    if err.is_timeout() {
        return StatusError::Timeout;
    }
    StatusError::Network(err.to_string())
}
