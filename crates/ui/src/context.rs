use std::sync::Arc;

use services::{QuestionAdminService, ResultsService, TestSessionService};

pub trait UiApp: Send + Sync {
    fn test_sessions(&self) -> Arc<TestSessionService>;
    fn results(&self) -> Arc<ResultsService>;
    fn admin(&self) -> Arc<QuestionAdminService>;
}

#[derive(Clone)]
pub struct AppContext {
    test_sessions: Arc<TestSessionService>,
    results: Arc<ResultsService>,
    admin: Arc<QuestionAdminService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            test_sessions: app.test_sessions(),
            results: app.results(),
            admin: app.admin(),
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

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
