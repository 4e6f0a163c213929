//! Short-lived hand-off of graded results from the test view to the results view.
//!
//! Entries live in process memory only: they survive navigation between views
//! but not an application restart. Each entry is stored in its JSON encoding so
//! the results view decodes exactly what a browser session store would hold.

use chrono::{DateTime, Duration, Utc};
use mock_core::Clock;
use mock_core::model::{GradedResult, HandoffKey};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

use crate::repository::StorageError;

/// How long a result waits for the results view before it is dropped.
pub const DEFAULT_HANDOFF_TTL_MINUTES: i64 = 30;

#[derive(Debug, Clone)]
struct StoredEntry {
    payload: String,
    stored_at: DateTime<Utc>,
}

/// Keyed one-shot store for graded results.
#[derive(Clone)]
pub struct ResultHandoff {
    clock: Clock,
    ttl: Duration,
    entries: Arc<Mutex<HashMap<HandoffKey, StoredEntry>>>,
}

impl ResultHandoff {
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self {
            clock,
            ttl: Duration::minutes(DEFAULT_HANDOFF_TTL_MINUTES),
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Encode and store a result under a fresh key.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if encoding fails, or
    /// `StorageError::Connection` if the store lock is poisoned.
    pub fn put(&self, result: &GradedResult) -> Result<HandoffKey, StorageError> {
        let payload =
            serde_json::to_string(result).map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.put_encoded(payload)
    }

    /// Store an already-encoded payload. It is only decoded when taken.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the store lock is poisoned.
    pub fn put_encoded(&self, payload: impl Into<String>) -> Result<HandoffKey, StorageError> {
        let now = self.clock.now();
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.retain(|_, entry| !is_expired(entry, now, self.ttl));

        let key = HandoffKey::generate();
        guard.insert(
            key,
            StoredEntry {
                payload: payload.into(),
                stored_at: now,
            },
        );
        debug!(%key, "stored graded result for hand-off");
        Ok(key)
    }

    /// Remove and decode the result stored under `key`.
    ///
    /// Missing, expired and undecodable entries all come back as `None`; the
    /// caller treats them alike as "no result available".
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the store lock is poisoned.
    pub fn take(&self, key: HandoffKey) -> Result<Option<GradedResult>, StorageError> {
        let entry = {
            let mut guard = self
                .entries
                .lock()
                .map_err(|e| StorageError::Connection(e.to_string()))?;
            guard.remove(&key)
        };
        Ok(entry.and_then(|entry| self.decode(key, &entry)))
    }

    /// Decode without removing.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the store lock is poisoned.
    pub fn peek(&self, key: HandoffKey) -> Result<Option<GradedResult>, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(&key).and_then(|entry| self.decode(key, entry)))
    }

    /// Drop an entry without decoding it.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the store lock is poisoned.
    pub fn discard(&self, key: HandoffKey) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(&key);
        Ok(())
    }

    /// Number of entries currently held, expired ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().map_or(0, |guard| guard.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn decode(&self, key: HandoffKey, entry: &StoredEntry) -> Option<GradedResult> {
        if is_expired(entry, self.clock.now(), self.ttl) {
            debug!(%key, "hand-off entry expired");
            return None;
        }
        match serde_json::from_str(&entry.payload) {
            Ok(result) => Some(result),
            Err(err) => {
                warn!(%key, error = %err, "discarding malformed hand-off entry");
                None
            }
        }
    }
}

fn is_expired(entry: &StoredEntry, now: DateTime<Utc>, ttl: Duration) -> bool {
    now - entry.stored_at > ttl
}
