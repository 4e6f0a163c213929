//! Shared error types for the services crate.

use thiserror::Error;

use mock_core::model::QuestionError;
use storage::http::HttpInitError;
use storage::repository::StorageError;

/// Errors emitted by the test session services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions available for this test")]
    Empty,
    #[error("failed to load questions: {0}")]
    Fetch(#[source] StorageError),
    #[error("failed to submit answers: {0}")]
    Submission(#[source] StorageError),
    #[error("a submission is already in progress")]
    InFlight,
    #[error("only a failed submission can be retried")]
    NotRetryable,
    #[error("no test results found")]
    NoResult,
    #[error(transparent)]
    Session(#[from] mock_core::SessionError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl SessionError {
    /// Whether the user can usefully try the same action again.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Fetch(_) | Self::Submission(_))
    }
}

/// Errors emitted by `QuestionAdminService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AdminError {
    #[error(transparent)]
    Validation(#[from] QuestionError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while reading configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("{key} must be a positive whole number, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
    #[error("{key} cannot be empty")]
    Empty { key: &'static str },
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Http(#[from] HttpInitError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
