use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::QuestionId;

/// Fewest options a multiple-choice question may offer.
pub const MIN_OPTIONS: usize = 2;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyText,

    #[error("a question needs at least two options, got {0}")]
    TooFewOptions(usize),

    #[error("option {0} cannot be empty")]
    EmptyOption(usize),

    #[error("correct answer {index} is out of range for {available} options")]
    CorrectAnswerOutOfRange { index: usize, available: usize },
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A multiple-choice prompt as the learner sees it.
///
/// The option count is whatever the source supplies; nothing here assumes four.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    text: String,
    options: Vec<String>,
}

impl Question {
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyText` for a blank prompt and
    /// `QuestionError::TooFewOptions` when fewer than `MIN_OPTIONS` options are given.
    pub fn new(
        id: QuestionId,
        text: impl Into<String>,
        options: Vec<String>,
    ) -> Result<Self, QuestionError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if options.len() < MIN_OPTIONS {
            return Err(QuestionError::TooFewOptions(options.len()));
        }
        Ok(Self { id, text, options })
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn option_count(&self) -> usize {
        self.options.len()
    }
}

//
// ─── ADMIN RECORDS ─────────────────────────────────────────────────────────────
//

/// A question together with its answer key, as managed by administrators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRecord {
    pub question: Question,
    pub correct_answer: usize,
}

impl QuestionRecord {
    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.question.id()
    }

    /// Back to an editable draft, e.g. to prefill an edit form.
    #[must_use]
    pub fn to_draft(&self) -> QuestionDraft {
        QuestionDraft {
            text: self.question.text().to_owned(),
            options: self.question.options().to_vec(),
            correct_answer: self.correct_answer,
        }
    }

    /// Apply a partial update and re-validate the result.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the patched question is no longer valid.
    pub fn apply_patch(&self, patch: &QuestionPatch) -> Result<QuestionRecord, QuestionError> {
        let mut draft = self.to_draft();
        if let Some(text) = &patch.text {
            draft.text.clone_from(text);
        }
        if let Some(options) = &patch.options {
            draft.options.clone_from(options);
        }
        if let Some(correct_answer) = patch.correct_answer {
            draft.correct_answer = correct_answer;
        }
        draft.validate()?.assign_id(self.id())
    }
}

/// Unvalidated form input for creating or editing a question.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QuestionDraft {
    pub text: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
}

impl QuestionDraft {
    /// Blank form with the usual four empty options.
    #[must_use]
    pub fn blank() -> Self {
        Self {
            text: String::new(),
            options: vec![String::new(); 4],
            correct_answer: 0,
        }
    }

    /// # Errors
    ///
    /// Returns the first `QuestionError` found: blank text, too few options,
    /// a blank option, or a correct answer outside the option range.
    pub fn validate(self) -> Result<ValidatedQuestion, QuestionError> {
        if self.text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if self.options.len() < MIN_OPTIONS {
            return Err(QuestionError::TooFewOptions(self.options.len()));
        }
        if let Some(index) = self.options.iter().position(|opt| opt.trim().is_empty()) {
            return Err(QuestionError::EmptyOption(index));
        }
        if self.correct_answer >= self.options.len() {
            return Err(QuestionError::CorrectAnswerOutOfRange {
                index: self.correct_answer,
                available: self.options.len(),
            });
        }
        Ok(ValidatedQuestion {
            text: self.text,
            options: self.options,
            correct_answer: self.correct_answer,
        })
    }
}

/// A draft that passed validation but has no identifier yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedQuestion {
    text: String,
    options: Vec<String>,
    correct_answer: usize,
}

impl ValidatedQuestion {
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_answer(&self) -> usize {
        self.correct_answer
    }

    /// # Errors
    ///
    /// Never fails for a validated draft; the `Result` keeps the constructor contract.
    pub fn assign_id(self, id: QuestionId) -> Result<QuestionRecord, QuestionError> {
        Ok(QuestionRecord {
            question: Question::new(id, self.text, self.options)?,
            correct_answer: self.correct_answer,
        })
    }
}

/// Partial update; `None` keeps the stored value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuestionPatch {
    pub text: Option<String>,
    pub options: Option<Vec<String>>,
    pub correct_answer: Option<usize>,
}

impl QuestionPatch {
    #[must_use]
    pub fn from_draft(draft: QuestionDraft) -> Self {
        Self {
            text: Some(draft.text),
            options: Some(draft.options),
            correct_answer: Some(draft.correct_answer),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.options.is_none() && self.correct_answer.is_none()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
