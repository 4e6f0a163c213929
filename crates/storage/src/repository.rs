use async_trait::async_trait;
use mock_core::model::{
    AnswerSlate, GradedResult, Question, QuestionId, QuestionPatch, QuestionRecord,
    ValidatedQuestion,
};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("invalid record: {0}")]
    Invalid(String),
}

/// Supplies the ordered question list for a new session.
///
/// Implementations must return the same order and options for the lifetime of
/// one session.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the source is unreachable or returns malformed data.
    async fn fetch_questions(&self) -> Result<Vec<Question>, StorageError>;
}

/// Grades a completed answer slate.
///
/// The result is authoritative; callers never recompute correctness.
#[async_trait]
pub trait ScoringService: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the service is unreachable or errored.
    async fn submit_answers(&self, slate: &AnswerSlate) -> Result<GradedResult, StorageError>;
}

/// CRUD contract over question records, including their answer keys.
#[async_trait]
pub trait QuestionAdminRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the records cannot be loaded.
    async fn list_questions(&self) -> Result<Vec<QuestionRecord>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    async fn get_question(&self, id: QuestionId) -> Result<QuestionRecord, StorageError>;

    /// Persist a new question and return it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the question cannot be stored.
    async fn create_question(
        &self,
        question: &ValidatedQuestion,
    ) -> Result<QuestionRecord, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    async fn update_question(
        &self,
        id: QuestionId,
        patch: &QuestionPatch,
    ) -> Result<QuestionRecord, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    async fn delete_question(&self, id: QuestionId) -> Result<(), StorageError>;
}

/// Simple in-memory question bank for testing and prototyping.
///
/// Questions are served in id order. Scoring is not provided here.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    questions: Arc<Mutex<BTreeMap<QuestionId, QuestionRecord>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            questions: Arc::new(Mutex::new(BTreeMap::new())),
        }
    }

    /// Insert or replace a record under its own id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn upsert(&self, record: QuestionRecord) -> Result<(), StorageError> {
        let mut guard = self
            .questions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(record.id(), record);
        Ok(())
    }
}

#[async_trait]
impl QuestionSource for InMemoryRepository {
    async fn fetch_questions(&self) -> Result<Vec<Question>, StorageError> {
        let guard = self
            .questions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.values().map(|record| record.question.clone()).collect())
    }
}

#[async_trait]
impl QuestionAdminRepository for InMemoryRepository {
    async fn list_questions(&self) -> Result<Vec<QuestionRecord>, StorageError> {
        let guard = self
            .questions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.values().cloned().collect())
    }

    async fn get_question(&self, id: QuestionId) -> Result<QuestionRecord, StorageError> {
        let guard = self
            .questions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.get(&id).cloned().ok_or(StorageError::NotFound)
    }

    async fn create_question(
        &self,
        question: &ValidatedQuestion,
    ) -> Result<QuestionRecord, StorageError> {
        let mut guard = self
            .questions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let next = guard.keys().next_back().map_or(1, |id| id.value() + 1);
        let record = question
            .clone()
            .assign_id(QuestionId::new(next))
            .map_err(|e| StorageError::Invalid(e.to_string()))?;
        guard.insert(record.id(), record.clone());
        Ok(record)
    }

    async fn update_question(
        &self,
        id: QuestionId,
        patch: &QuestionPatch,
    ) -> Result<QuestionRecord, StorageError> {
        let mut guard = self
            .questions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let existing = guard.get(&id).ok_or(StorageError::NotFound)?;
        let updated = existing
            .apply_patch(patch)
            .map_err(|e| StorageError::Invalid(e.to_string()))?;
        guard.insert(id, updated.clone());
        Ok(updated)
    }

    async fn delete_question(&self, id: QuestionId) -> Result<(), StorageError> {
        let mut guard = self
            .questions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(&id).map(|_| ()).ok_or(StorageError::NotFound)
    }
}

/// Aggregates the collaborators behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub questions: Arc<dyn QuestionSource>,
    pub scoring: Arc<dyn ScoringService>,
    pub admin: Arc<dyn QuestionAdminRepository>,
}

impl Storage {
    /// In-memory question bank paired with the given scoring collaborator.
    #[must_use]
    pub fn in_memory(scoring: Arc<dyn ScoringService>) -> Self {
        let repo = InMemoryRepository::new();
        let questions: Arc<dyn QuestionSource> = Arc::new(repo.clone());
        let admin: Arc<dyn QuestionAdminRepository> = Arc::new(repo);
        Self {
            questions,
            scoring,
            admin,
        }
    }
}
