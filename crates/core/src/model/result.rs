use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::answer::{Answer, AnswerSlate};

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ResultError {
    #[error("score {score} exceeds total questions {total}")]
    ScoreExceedsTotal { score: u32, total: u32 },

    #[error("percentage must be within 0..=100, got {0}")]
    InvalidPercentage(f64),

    #[error("correct answer index {index} is outside {total} questions")]
    CorrectIndexOutOfRange { index: usize, total: u32 },

    #[error("answer key has {len} entries for {total} questions")]
    AnswerKeyLength { len: usize, total: u32 },
}

//
// ─── GRADED RESULT ────────────────────────────────────────────────────────────
//

/// Outcome returned by the scoring service.
///
/// Treated as authoritative: nothing here recomputes correctness. The only
/// checks are structural, so a garbled payload is rejected instead of rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawGradedResult")]
pub struct GradedResult {
    score: u32,
    total_questions: u32,
    percentage: f64,
    correct_answers: Vec<usize>,
    user_answers: AnswerSlate,
    #[serde(skip_serializing_if = "Option::is_none")]
    feedback: Option<String>,
    /// Per-question correct option, only when the service chooses to reveal it.
    #[serde(skip_serializing_if = "Option::is_none")]
    answer_key: Option<Vec<usize>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGradedResult {
    score: u32,
    total_questions: u32,
    percentage: f64,
    #[serde(default)]
    correct_answers: Vec<usize>,
    #[serde(default)]
    user_answers: AnswerSlate,
    #[serde(default)]
    feedback: Option<String>,
    #[serde(default)]
    answer_key: Option<Vec<usize>>,
}

impl TryFrom<RawGradedResult> for GradedResult {
    type Error = ResultError;

    fn try_from(raw: RawGradedResult) -> Result<Self, Self::Error> {
        GradedResult::new(
            raw.score,
            raw.total_questions,
            raw.percentage,
            raw.correct_answers,
            raw.user_answers,
            raw.feedback,
        )?
        .with_answer_key(raw.answer_key)
    }
}

impl GradedResult {
    /// # Errors
    ///
    /// Returns `ResultError` when the score, percentage or correct indices are
    /// inconsistent with `total_questions`.
    pub fn new(
        score: u32,
        total_questions: u32,
        percentage: f64,
        correct_answers: Vec<usize>,
        user_answers: AnswerSlate,
        feedback: Option<String>,
    ) -> Result<Self, ResultError> {
        if score > total_questions {
            return Err(ResultError::ScoreExceedsTotal {
                score,
                total: total_questions,
            });
        }
        if !percentage.is_finite() || !(0.0..=100.0).contains(&percentage) {
            return Err(ResultError::InvalidPercentage(percentage));
        }
        let total = usize::try_from(total_questions).unwrap_or(usize::MAX);
        if let Some(&index) = correct_answers.iter().find(|&&index| index >= total) {
            return Err(ResultError::CorrectIndexOutOfRange {
                index,
                total: total_questions,
            });
        }
        Ok(Self {
            score,
            total_questions,
            percentage,
            correct_answers,
            user_answers,
            feedback,
            answer_key: None,
        })
    }

    /// Attach the per-question correct options.
    ///
    /// # Errors
    ///
    /// Returns `ResultError::AnswerKeyLength` if the key does not cover every question.
    pub fn with_answer_key(mut self, key: Option<Vec<usize>>) -> Result<Self, ResultError> {
        if let Some(key) = &key {
            let total = usize::try_from(self.total_questions).unwrap_or(usize::MAX);
            if key.len() != total {
                return Err(ResultError::AnswerKeyLength {
                    len: key.len(),
                    total: self.total_questions,
                });
            }
        }
        self.answer_key = key;
        Ok(self)
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    #[must_use]
    pub fn percentage(&self) -> f64 {
        self.percentage
    }

    #[must_use]
    pub fn correct_answers(&self) -> &[usize] {
        &self.correct_answers
    }

    #[must_use]
    pub fn user_answers(&self) -> &AnswerSlate {
        &self.user_answers
    }

    #[must_use]
    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    #[must_use]
    pub fn answer_key(&self) -> Option<&[usize]> {
        self.answer_key.as_deref()
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        u32::try_from(self.correct_answers.len()).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn incorrect_count(&self) -> u32 {
        self.total_questions.saturating_sub(self.correct_count())
    }

    #[must_use]
    pub fn is_correct(&self, index: usize) -> bool {
        self.correct_answers.contains(&index)
    }

    #[must_use]
    pub fn user_answer(&self, index: usize) -> Answer {
        self.user_answers.get(index).unwrap_or_default()
    }

    /// Correct option for `index`, if the service revealed one.
    #[must_use]
    pub fn correct_option(&self, index: usize) -> Option<usize> {
        self.answer_key.as_ref().and_then(|key| key.get(index).copied())
    }

    #[must_use]
    pub fn performance(&self) -> PerformanceLevel {
        PerformanceLevel::from_percentage(self.percentage)
    }

    /// Service feedback when present and non-blank, otherwise the band default.
    #[must_use]
    pub fn feedback_or_default(&self) -> &str {
        match self.feedback.as_deref() {
            Some(text) if !text.trim().is_empty() => text,
            _ => self.performance().default_feedback(),
        }
    }
}

//
// ─── PERFORMANCE LEVEL ────────────────────────────────────────────────────────
//

/// Banding of a percentage score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PerformanceLevel {
    Excellent,
    VeryGood,
    Good,
    Fair,
    NeedsImprovement,
}

impl PerformanceLevel {
    #[must_use]
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 90.0 {
            Self::Excellent
        } else if percentage >= 80.0 {
            Self::VeryGood
        } else if percentage >= 70.0 {
            Self::Good
        } else if percentage >= 60.0 {
            Self::Fair
        } else {
            Self::NeedsImprovement
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::VeryGood => "Very Good",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::NeedsImprovement => "Needs Improvement",
        }
    }

    #[must_use]
    pub fn default_feedback(self) -> &'static str {
        match self {
            Self::Excellent => {
                "Outstanding performance! You demonstrate excellent command of English and are well-prepared for the IELTS exam."
            }
            Self::VeryGood => {
                "Very good work! You show strong English skills with minor areas for improvement. Keep practicing to maintain this level."
            }
            Self::Good => {
                "Good progress! You have a solid foundation in English. Focus on areas where you made mistakes to improve further."
            }
            Self::Fair => {
                "Fair performance. You understand the basics but need more practice. Review the questions you got wrong and study those topics."
            }
            Self::NeedsImprovement => {
                "Keep working hard! Focus on fundamental English skills and take more practice tests to improve your performance."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slate(values: &[i64]) -> AnswerSlate {
        AnswerSlate::from_wire(values).unwrap()
    }

    fn sample() -> GradedResult {
        GradedResult::new(
            3,
            10,
            30.0,
            vec![0, 2, 4],
            slate(&[1, -1, 1, -1, 1, -1, -1, -1, -1, -1]),
            Some("Keep going.".into()),
        )
        .unwrap()
    }

    #[test]
    fn decodes_service_payload() {
        let json = r#"{
            "score": 3,
            "totalQuestions": 10,
            "percentage": 30,
            "correctAnswers": [0, 2, 4],
            "userAnswers": [1, -1, 1, -1, 1, -1, -1, -1, -1, -1],
            "feedback": "Keep going."
        }"#;
        let decoded: GradedResult = serde_json::from_str(json).unwrap();
        assert_eq!(decoded, sample());
        assert_eq!(decoded.user_answer(1), Answer::Unanswered);
        assert_eq!(decoded.incorrect_count(), 7);
    }

    #[test]
    fn json_round_trip_is_field_for_field_equal() {
        let original = sample()
            .with_answer_key(Some(vec![1, 0, 1, 2, 1, 3, 0, 0, 2, 1]))
            .unwrap();
        let json = serde_json::to_string(&original).unwrap();
        assert!(json.contains("\"totalQuestions\":10"));
        let decoded: GradedResult = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn rejects_inconsistent_payloads() {
        let json = r#"{"score": 11, "totalQuestions": 10, "percentage": 10}"#;
        assert!(serde_json::from_str::<GradedResult>(json).is_err());

        let json = r#"{"score": 1, "totalQuestions": 2, "percentage": 50, "correctAnswers": [5]}"#;
        assert!(serde_json::from_str::<GradedResult>(json).is_err());

        let err = GradedResult::new(0, 1, 120.0, vec![], AnswerSlate::default(), None)
            .unwrap_err();
        assert_eq!(err, ResultError::InvalidPercentage(120.0));
    }

    #[test]
    fn answer_key_must_cover_every_question() {
        let err = sample().with_answer_key(Some(vec![0, 1])).unwrap_err();
        assert_eq!(err, ResultError::AnswerKeyLength { len: 2, total: 10 });
        assert_eq!(sample().correct_option(0), None);
    }

    #[test]
    fn performance_bands() {
        assert_eq!(PerformanceLevel::from_percentage(95.0), PerformanceLevel::Excellent);
        assert_eq!(PerformanceLevel::from_percentage(90.0), PerformanceLevel::Excellent);
        assert_eq!(PerformanceLevel::from_percentage(89.9), PerformanceLevel::VeryGood);
        assert_eq!(PerformanceLevel::from_percentage(70.0), PerformanceLevel::Good);
        assert_eq!(PerformanceLevel::from_percentage(60.0), PerformanceLevel::Fair);
        assert_eq!(
            PerformanceLevel::from_percentage(0.0),
            PerformanceLevel::NeedsImprovement
        );
    }

    #[test]
    fn blank_feedback_falls_back_to_band_text() {
        let result =
            GradedResult::new(9, 10, 90.0, vec![], AnswerSlate::default(), Some("  ".into()))
                .unwrap();
        assert!(result.feedback_or_default().starts_with("Outstanding"));
        assert_eq!(sample().feedback_or_default(), "Keep going.");
    }
}
