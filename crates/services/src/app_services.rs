use std::sync::Arc;

use storage::handoff::ResultHandoff;
use storage::repository::Storage;

use crate::Clock;
use crate::admin_service::QuestionAdminService;
use crate::config::{ApiConfig, TestSettings};
use crate::error::AppServicesError;
use crate::results_service::ResultsService;
use crate::sessions::TestSessionService;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    test_sessions: Arc<TestSessionService>,
    results: Arc<ResultsService>,
    admin: Arc<QuestionAdminService>,
}

impl AppServices {
    /// Build services backed by the REST API.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the HTTP client cannot be constructed.
    pub fn new_http(
        api: &ApiConfig,
        settings: TestSettings,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::http(&api.http())?;
        Ok(Self::from_storage(&storage, settings, clock))
    }

    #[must_use]
    pub fn from_storage(storage: &Storage, settings: TestSettings, clock: Clock) -> Self {
        let handoff = ResultHandoff::new(clock);
        let test_sessions = Arc::new(
            TestSessionService::new(
                clock,
                Arc::clone(&storage.questions),
                Arc::clone(&storage.scoring),
                handoff.clone(),
            )
            .with_settings(settings),
        );
        let results = Arc::new(ResultsService::new(handoff));
        let admin = Arc::new(QuestionAdminService::new(Arc::clone(&storage.admin)));
        Self {
            test_sessions,
            results,
            admin,
        }
    }

    #[must_use]
    pub fn test_sessions(&self) -> Arc<TestSessionService> {
        Arc::clone(&self.test_sessions)
    }

    #[must_use]
    pub fn results(&self) -> Arc<ResultsService> {
        Arc::clone(&self.results)
    }

    #[must_use]
    pub fn admin(&self) -> Arc<QuestionAdminService> {
        Arc::clone(&self.admin)
    }
}
