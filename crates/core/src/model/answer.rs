use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Wire value the scoring API uses for a skipped question.
pub const UNANSWERED_WIRE: i64 = -1;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AnswerError {
    #[error("invalid answer value on the wire: {0}")]
    InvalidWireValue(i64),
}

//
// ─── ANSWER ───────────────────────────────────────────────────────────────────
//

/// The learner's choice for one question.
///
/// `Unanswered` is a first-class value. It only becomes `-1` at the wire boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Answer {
    #[default]
    Unanswered,
    /// Zero-based option index.
    Selected(usize),
}

impl Answer {
    /// # Errors
    ///
    /// Returns `AnswerError::InvalidWireValue` for negative values other than `-1`.
    pub fn from_wire(value: i64) -> Result<Self, AnswerError> {
        if value == UNANSWERED_WIRE {
            return Ok(Self::Unanswered);
        }
        usize::try_from(value)
            .map(Self::Selected)
            .map_err(|_| AnswerError::InvalidWireValue(value))
    }

    #[must_use]
    pub fn to_wire(self) -> i64 {
        match self {
            Self::Unanswered => UNANSWERED_WIRE,
            Self::Selected(index) => i64::try_from(index).unwrap_or(i64::MAX),
        }
    }

    #[must_use]
    pub fn is_answered(self) -> bool {
        matches!(self, Self::Selected(_))
    }

    #[must_use]
    pub fn selected(self) -> Option<usize> {
        match self {
            Self::Selected(index) => Some(index),
            Self::Unanswered => None,
        }
    }
}

impl TryFrom<i64> for Answer {
    type Error = AnswerError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::from_wire(value)
    }
}

impl From<Answer> for i64 {
    fn from(answer: Answer) -> Self {
        answer.to_wire()
    }
}

//
// ─── ANSWER SLATE ─────────────────────────────────────────────────────────────
//

/// One answer slot per question, positionally aligned with the question list.
///
/// The length is fixed at construction; slots are only ever overwritten.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSlate(Vec<Answer>);

impl AnswerSlate {
    /// A slate of `len` unanswered slots.
    #[must_use]
    pub fn unanswered(len: usize) -> Self {
        Self(vec![Answer::Unanswered; len])
    }

    #[must_use]
    pub fn from_answers(answers: Vec<Answer>) -> Self {
        Self(answers)
    }

    /// # Errors
    ///
    /// Returns `AnswerError` if any value is not `-1` or a non-negative index.
    pub fn from_wire(values: &[i64]) -> Result<Self, AnswerError> {
        values
            .iter()
            .map(|value| Answer::from_wire(*value))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    #[must_use]
    pub fn to_wire(&self) -> Vec<i64> {
        self.0.iter().map(|answer| answer.to_wire()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<Answer> {
        self.0.get(index).copied()
    }

    #[must_use]
    pub fn is_answered(&self, index: usize) -> bool {
        self.get(index).is_some_and(Answer::is_answered)
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.0.iter().filter(|answer| answer.is_answered()).count()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Answer] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = Answer> + '_ {
        self.0.iter().copied()
    }

    /// Overwrite one slot. Out-of-range indices are ignored.
    pub(crate) fn set(&mut self, index: usize, answer: Answer) {
        if let Some(slot) = self.0.get_mut(index) {
            *slot = answer;
        }
    }
}
