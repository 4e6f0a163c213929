use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::repository::{
    QuestionAdminRepository, QuestionSource, ScoringService, Storage, StorageError,
};

mod admin_api;
mod mapping;
mod test_api;

/// Where the REST API lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    pub base_url: String,
    pub timeout: Duration,
}

/// REST client for the question bank and scoring API.
#[derive(Clone)]
pub struct HttpRepository {
    client: Client,
    base_url: String,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HttpInitError {
    #[error("base url cannot be empty")]
    EmptyBaseUrl,
    #[error(transparent)]
    Client(#[from] reqwest::Error),
}

impl HttpRepository {
    /// Build a client for the given API root, e.g. `http://localhost:5000/api`.
    ///
    /// # Errors
    ///
    /// Returns `HttpInitError` if the base URL is blank or the HTTP client cannot
    /// be constructed.
    pub fn connect(config: &HttpConfig) -> Result<Self, HttpInitError> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(HttpInitError::EmptyBaseUrl);
        }
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Storage {
    /// Build a `Storage` backed by the REST API.
    ///
    /// # Errors
    ///
    /// Returns `HttpInitError` if the client cannot be constructed.
    pub fn http(config: &HttpConfig) -> Result<Self, HttpInitError> {
        let repo = HttpRepository::connect(config)?;
        let questions: Arc<dyn QuestionSource> = Arc::new(repo.clone());
        let scoring: Arc<dyn ScoringService> = Arc::new(repo.clone());
        let admin: Arc<dyn QuestionAdminRepository> = Arc::new(repo);
        Ok(Self {
            questions,
            scoring,
            admin,
        })
    }
}

fn transport(e: reqwest::Error) -> StorageError {
    if e.is_decode() {
        StorageError::Serialization(e.to_string())
    } else {
        StorageError::Connection(e.to_string())
    }
}

fn check_status(response: Response) -> Result<Response, StorageError> {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(StorageError::NotFound);
    }
    if !status.is_success() {
        return Err(StorageError::Status(status.as_u16()));
    }
    Ok(response)
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, StorageError> {
    check_status(response)?.json::<T>().await.map_err(transport)
}
