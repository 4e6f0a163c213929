use std::sync::Arc;

use mock_core::model::{QuestionDraft, QuestionId, QuestionPatch, QuestionRecord};
use storage::repository::QuestionAdminRepository;
use tracing::{info, instrument};

use crate::error::AdminError;

/// Question bank maintenance.
///
/// Drafts and patches are validated here, so malformed questions never reach
/// the repository.
#[derive(Clone)]
pub struct QuestionAdminService {
    repo: Arc<dyn QuestionAdminRepository>,
}

impl QuestionAdminService {
    #[must_use]
    pub fn new(repo: Arc<dyn QuestionAdminRepository>) -> Self {
        Self { repo }
    }

    /// # Errors
    ///
    /// Returns `AdminError::Storage` if the records cannot be loaded.
    pub async fn list_questions(&self) -> Result<Vec<QuestionRecord>, AdminError> {
        Ok(self.repo.list_questions().await?)
    }

    /// Case-insensitive substring match on the prompt text. An empty term matches all.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Storage` if the records cannot be loaded.
    pub async fn search(&self, term: &str) -> Result<Vec<QuestionRecord>, AdminError> {
        let records = self.list_questions().await?;
        Ok(filter_questions(records, term))
    }

    /// # Errors
    ///
    /// Returns `AdminError::Storage` (including `NotFound`).
    pub async fn get_question(&self, id: QuestionId) -> Result<QuestionRecord, AdminError> {
        Ok(self.repo.get_question(id).await?)
    }

    /// # Errors
    ///
    /// Returns `AdminError::Validation` for an invalid draft, or `AdminError::Storage`.
    #[instrument(skip(self, draft))]
    pub async fn create_question(
        &self,
        draft: QuestionDraft,
    ) -> Result<QuestionRecord, AdminError> {
        let validated = draft.validate()?;
        let record = self.repo.create_question(&validated).await?;
        info!(id = %record.id(), "question added");
        Ok(record)
    }

    /// Apply `patch`, re-validating the merged question before it is sent.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Validation` if the merged question is invalid, or
    /// `AdminError::Storage`.
    #[instrument(skip(self, patch))]
    pub async fn update_question(
        &self,
        id: QuestionId,
        patch: QuestionPatch,
    ) -> Result<QuestionRecord, AdminError> {
        let current = self.repo.get_question(id).await?;
        let _merged = current.apply_patch(&patch)?;
        Ok(self.repo.update_question(id, &patch).await?)
    }

    /// # Errors
    ///
    /// Returns `AdminError::Storage` (including `NotFound`).
    #[instrument(skip(self))]
    pub async fn delete_question(&self, id: QuestionId) -> Result<(), AdminError> {
        self.repo.delete_question(id).await?;
        info!("question deleted");
        Ok(())
    }
}

/// Records whose prompt contains `term`, ignoring case.
#[must_use]
pub fn filter_questions(records: Vec<QuestionRecord>, term: &str) -> Vec<QuestionRecord> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return records;
    }
    records
        .into_iter()
        .filter(|record| record.question.text().to_lowercase().contains(&needle))
        .collect()
}
