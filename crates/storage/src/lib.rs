#![forbid(unsafe_code)]

pub mod handoff;
pub mod http;
pub mod repository;

pub use handoff::{DEFAULT_HANDOFF_TTL_MINUTES, ResultHandoff};
pub use http::{HttpConfig, HttpInitError, HttpRepository};
pub use repository::{
    InMemoryRepository, QuestionAdminRepository, QuestionSource, ScoringService, Storage,
    StorageError,
};
