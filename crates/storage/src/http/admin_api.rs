use async_trait::async_trait;
use mock_core::model::{QuestionId, QuestionPatch, QuestionRecord, ValidatedQuestion};
use tracing::{info, instrument};

use super::mapping::{CreateQuestionDto, PatchQuestionDto, QuestionRecordDto};
use super::{HttpRepository, check_status, read_json, transport};
use crate::repository::{QuestionAdminRepository, StorageError};

impl HttpRepository {
    fn question_url(&self, id: QuestionId) -> String {
        self.url(&format!("admin/questions/{}", id.value()))
    }
}

#[async_trait]
impl QuestionAdminRepository for HttpRepository {
    #[instrument(skip(self))]
    async fn list_questions(&self) -> Result<Vec<QuestionRecord>, StorageError> {
        let response = self
            .client
            .get(self.url("admin/questions"))
            .send()
            .await
            .map_err(transport)?;
        let records: Vec<QuestionRecordDto> = read_json(response).await?;
        records
            .into_iter()
            .map(QuestionRecordDto::into_record)
            .collect()
    }

    #[instrument(skip(self))]
    async fn get_question(&self, id: QuestionId) -> Result<QuestionRecord, StorageError> {
        let response = self
            .client
            .get(self.question_url(id))
            .send()
            .await
            .map_err(transport)?;
        read_json::<QuestionRecordDto>(response).await?.into_record()
    }

    #[instrument(skip(self, question))]
    async fn create_question(
        &self,
        question: &ValidatedQuestion,
    ) -> Result<QuestionRecord, StorageError> {
        let response = self
            .client
            .post(self.url("admin/questions"))
            .json(&CreateQuestionDto::from(question))
            .send()
            .await
            .map_err(transport)?;
        let record = read_json::<QuestionRecordDto>(response).await?.into_record()?;
        info!(id = %record.id(), "question created");
        Ok(record)
    }

    #[instrument(skip(self, patch))]
    async fn update_question(
        &self,
        id: QuestionId,
        patch: &QuestionPatch,
    ) -> Result<QuestionRecord, StorageError> {
        let response = self
            .client
            .patch(self.question_url(id))
            .json(&PatchQuestionDto::from(patch))
            .send()
            .await
            .map_err(transport)?;
        read_json::<QuestionRecordDto>(response).await?.into_record()
    }

    #[instrument(skip(self))]
    async fn delete_question(&self, id: QuestionId) -> Result<(), StorageError> {
        let response = self
            .client
            .delete(self.question_url(id))
            .send()
            .await
            .map_err(transport)?;
        check_status(response)?;
        info!(%id, "question deleted");
        Ok(())
    }
}
