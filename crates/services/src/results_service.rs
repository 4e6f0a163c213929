use mock_core::model::{GradedResult, HandoffKey};
use storage::handoff::ResultHandoff;
use tracing::{debug, instrument};

use crate::error::SessionError;

/// Reads graded results handed off by the test view.
#[derive(Clone)]
pub struct ResultsService {
    handoff: ResultHandoff,
}

impl ResultsService {
    #[must_use]
    pub fn new(handoff: ResultHandoff) -> Self {
        Self { handoff }
    }

    /// Load the result parked under `key`.
    ///
    /// The entry stays in place so re-rendering the results screen is stable;
    /// call [`ResultsService::dismiss`] when the user leaves it.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoResult` when nothing usable is stored under the key.
    #[instrument(skip(self))]
    pub fn load(&self, key: HandoffKey) -> Result<GradedResult, SessionError> {
        self.handoff.peek(key)?.ok_or_else(|| {
            debug!("no result for hand-off key");
            SessionError::NoResult
        })
    }

    /// Same as [`ResultsService::load`] for a key taken from a route.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoResult` for an unparsable or unknown key.
    pub fn load_str(&self, key: &str) -> Result<GradedResult, SessionError> {
        let key = key.parse::<HandoffKey>().map_err(|_| SessionError::NoResult)?;
        self.load(key)
    }

    /// Forget the result once the user navigates away (retake or home).
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if the store is unavailable.
    pub fn dismiss(&self, key: HandoffKey) -> Result<(), SessionError> {
        self.handoff.discard(key)?;
        Ok(())
    }
}
