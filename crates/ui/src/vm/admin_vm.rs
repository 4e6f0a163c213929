use mock_core::model::{QuestionId, QuestionRecord};
use services::admin_service::filter_questions;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdminOptionVm {
    pub letter: char,
    pub text: String,
    pub is_correct: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdminRowVm {
    pub id: QuestionId,
    /// Position within the filtered list, starting at 1.
    pub number: usize,
    pub text: String,
    pub options: Vec<AdminOptionVm>,
}

impl AdminRowVm {
    fn build(number: usize, record: &QuestionRecord) -> Self {
        let options = record
            .question
            .options()
            .iter()
            .enumerate()
            .map(|(index, text)| AdminOptionVm {
                letter: option_letter(index),
                text: text.clone(),
                is_correct: index == record.correct_answer,
            })
            .collect();
        Self {
            id: record.id(),
            number,
            text: record.question.text().to_string(),
            options,
        }
    }
}

/// `A`, `B`, `C`... for option badges and form placeholders.
#[must_use]
pub fn option_letter(index: usize) -> char {
    ('A'..='Z').nth(index).unwrap_or('?')
}

/// Question bank listing with the current search applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdminVm {
    pub rows: Vec<AdminRowVm>,
    pub total: usize,
    pub filtered: usize,
    pub empty_text: Option<&'static str>,
}

impl AdminVm {
    #[must_use]
    pub fn build(records: Vec<QuestionRecord>, term: &str) -> Self {
        let total = records.len();
        let matching = filter_questions(records, term);
        let empty_text = matching.is_empty().then(|| {
            if term.trim().is_empty() {
                "No questions available. Add some questions to get started."
            } else {
                "No questions match your search."
            }
        });
        Self {
            rows: matching
                .iter()
                .enumerate()
                .map(|(index, record)| AdminRowVm::build(index + 1, record))
                .collect(),
            total,
            filtered: matching.len(),
            empty_text,
        }
    }
}
