//! Scout engine: job service IO, status polling and effect execution.
mod api;
mod controller;
mod credentials;
mod poller;
mod settings;
mod types;
mod wire;

pub use api::{JobApi, ReqwestJobApi};
pub use controller::SearchController;
pub use credentials::{Anonymous, CredentialProvider, StaticToken};
pub use poller::PollScheduler;
pub use settings::{ApiSettings, PollSettings, TASK_ID_PLACEHOLDER};
pub use types::{ClientBuildError, StatusError, SubmitError};
