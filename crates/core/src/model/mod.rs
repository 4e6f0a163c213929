mod answer;
mod ids;
mod question;
mod result;

pub use answer::{Answer, AnswerError, AnswerSlate, UNANSWERED_WIRE};
pub use ids::{HandoffKey, ParseIdError, QuestionId};
pub use question::{
    MIN_OPTIONS, Question, QuestionDraft, QuestionError, QuestionPatch, QuestionRecord,
    ValidatedQuestion,
};
pub use result::{GradedResult, PerformanceLevel, ResultError};
