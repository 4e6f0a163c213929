#![forbid(unsafe_code)]

pub mod admin_service;
pub mod app_services;
pub mod config;
pub mod error;
pub mod results_service;
pub mod sessions;

pub use mock_core::Clock;
pub use storage::repository::StorageError;

pub use admin_service::QuestionAdminService;
pub use app_services::AppServices;
pub use config::{ApiConfig, TestSettings};
pub use error::{AdminError, AppServicesError, ConfigError, SessionError};
pub use results_service::ResultsService;
pub use sessions::{SessionTimer, SubmissionReceipt, TestSessionService, TimerHandle};
