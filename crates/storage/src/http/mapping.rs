//! Wire shapes of the mock-test REST API and their conversion to domain types.

use mock_core::model::{
    AnswerSlate, Question, QuestionId, QuestionPatch, QuestionRecord, ValidatedQuestion,
};
use serde::{Deserialize, Serialize};

use crate::repository::StorageError;

fn invalid<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

/// Question as served to learners (no answer key).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuestionDto {
    pub id: u64,
    pub question_text: String,
    pub options: Vec<String>,
}

impl QuestionDto {
    pub(crate) fn into_question(self) -> Result<Question, StorageError> {
        Question::new(QuestionId::new(self.id), self.question_text, self.options).map_err(invalid)
    }
}

/// Question as served to administrators.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuestionRecordDto {
    pub id: u64,
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
}

impl QuestionRecordDto {
    pub(crate) fn into_record(self) -> Result<QuestionRecord, StorageError> {
        let question =
            Question::new(QuestionId::new(self.id), self.question_text, self.options)
                .map_err(invalid)?;
        if self.correct_answer >= question.option_count() {
            return Err(StorageError::Serialization(format!(
                "correct answer {} out of range for question {}",
                self.correct_answer, self.id
            )));
        }
        Ok(QuestionRecord {
            question,
            correct_answer: self.correct_answer,
        })
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct SubmitRequestDto<'a> {
    pub answers: &'a AnswerSlate,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateQuestionDto<'a> {
    pub question_text: &'a str,
    pub options: &'a [String],
    pub correct_answer: usize,
}

impl<'a> From<&'a ValidatedQuestion> for CreateQuestionDto<'a> {
    fn from(question: &'a ValidatedQuestion) -> Self {
        Self {
            question_text: question.text(),
            options: question.options(),
            correct_answer: question.correct_answer(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PatchQuestionDto<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<usize>,
}

impl<'a> From<&'a QuestionPatch> for PatchQuestionDto<'a> {
    fn from(patch: &'a QuestionPatch) -> Self {
        Self {
            question_text: patch.text.as_deref(),
            options: patch.options.as_deref(),
            correct_answer: patch.correct_answer,
        }
    }
}
