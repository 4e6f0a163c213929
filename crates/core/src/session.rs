use chrono::{DateTime, Utc};
use std::fmt;
use thiserror::Error;

use crate::countdown::Countdown;
use crate::model::{Answer, AnswerSlate, Question};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Precondition failures of the test session.
///
/// Out-of-range indices are programming errors on the presentation side; the
/// session reports them and leaves its state untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions available for session")]
    Empty,

    #[error("option {option} is out of range for a question with {available} options")]
    OptionOutOfRange { option: usize, available: usize },

    #[error("question {index} is out of range for a session of {len} questions")]
    QuestionOutOfRange { index: usize, len: usize },
}

//
// ─── PHASES ────────────────────────────────────────────────────────────────────
//

/// Where an in-progress session stands.
///
/// Loading happens before a session exists and success discards it, so only
/// these three phases are ever observed on a live `TestSession`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Accepting answers, navigation and ticks.
    Active,
    /// Frozen; a submission request is in flight.
    Submitting,
    /// Frozen; the last submission failed and may be retried.
    SubmitFailed,
}

impl SessionPhase {
    #[must_use]
    pub fn is_frozen(self) -> bool {
        !matches!(self, Self::Active)
    }
}

/// What started the submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitTrigger {
    Manual,
    Expiry,
}

/// Snapshot of the slate handed to the scoring service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    slate: AnswerSlate,
    trigger: SubmitTrigger,
}

impl SubmissionRequest {
    #[must_use]
    pub fn slate(&self) -> &AnswerSlate {
        &self.slate
    }

    #[must_use]
    pub fn trigger(&self) -> SubmitTrigger {
        self.trigger
    }
}

/// Result of a single countdown tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The session was frozen; the tick changed nothing.
    Ignored,
    Running { remaining: u32 },
    /// Time ran out on this tick. Produced at most once per session.
    Expired(SubmissionRequest),
}

/// Per-question marker for the overview grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionStatus {
    Current,
    Answered,
    Unanswered,
}

/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    pub answered: usize,
    /// One-based position of the question on screen.
    pub position: usize,
    pub remaining_secs: u32,
}

impl SessionProgress {
    /// Position through the test as a percentage, `position / total * 100`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.position as f64 / self.total as f64 * 100.0
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One learner's attempt at the test.
///
/// Invariants:
/// - `questions` is non-empty and never changes after construction
/// - `slate.len() == questions.len()`
/// - `cursor < questions.len()`
/// - once the phase leaves `Active`, no answer, cursor or countdown mutation happens
pub struct TestSession {
    questions: Vec<Question>,
    slate: AnswerSlate,
    cursor: usize,
    countdown: Countdown,
    phase: SessionPhase,
    trigger: Option<SubmitTrigger>,
    started_at: DateTime<Utc>,
}

impl TestSession {
    /// Start a session over `questions` with every answer unset.
    ///
    /// `started_at` should come from the services layer clock.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if no questions are provided.
    pub fn new(
        questions: Vec<Question>,
        countdown: Countdown,
        started_at: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::Empty);
        }
        let slate = AnswerSlate::unanswered(questions.len());
        Ok(Self {
            questions,
            slate,
            cursor: 0,
            countdown,
            phase: SessionPhase::Active,
            trigger: None,
            started_at,
        })
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.questions[self.cursor]
    }

    #[must_use]
    pub fn current_answer(&self) -> Answer {
        self.slate.get(self.cursor).unwrap_or_default()
    }

    #[must_use]
    pub fn is_first_question(&self) -> bool {
        self.cursor == 0
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.cursor + 1 == self.questions.len()
    }

    #[must_use]
    pub fn slate(&self) -> &AnswerSlate {
        &self.slate
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.slate.answered_count()
    }

    #[must_use]
    pub fn countdown(&self) -> Countdown {
        self.countdown
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.phase.is_frozen()
    }

    #[must_use]
    pub fn trigger(&self) -> Option<SubmitTrigger> {
        self.trigger
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            total: self.questions.len(),
            answered: self.answered_count(),
            position: self.cursor + 1,
            remaining_secs: self.countdown.remaining(),
        }
    }

    /// Status of every question, for the overview grid.
    #[must_use]
    pub fn overview(&self) -> Vec<QuestionStatus> {
        (0..self.questions.len())
            .map(|index| {
                if index == self.cursor {
                    QuestionStatus::Current
                } else if self.slate.is_answered(index) {
                    QuestionStatus::Answered
                } else {
                    QuestionStatus::Unanswered
                }
            })
            .collect()
    }

    /// Record `option` for the question under the cursor. Does not move the cursor.
    ///
    /// No-op once frozen.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::OptionOutOfRange` if the question has no such option.
    pub fn select_answer(&mut self, option: usize) -> Result<(), SessionError> {
        if self.is_frozen() {
            return Ok(());
        }
        let available = self.current_question().option_count();
        if option >= available {
            return Err(SessionError::OptionOutOfRange { option, available });
        }
        self.slate.set(self.cursor, Answer::Selected(option));
        Ok(())
    }

    /// Move to the next question; stays put on the last one.
    pub fn advance(&mut self) {
        if self.is_frozen() {
            return;
        }
        if self.cursor + 1 < self.questions.len() {
            self.cursor += 1;
        }
    }

    /// Move to the previous question; stays put on the first one.
    pub fn retreat(&mut self) {
        if self.is_frozen() {
            return;
        }
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Jump straight to `index`. No-op once frozen.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::QuestionOutOfRange` if `index` is past the last question.
    pub fn jump_to(&mut self, index: usize) -> Result<(), SessionError> {
        if self.is_frozen() {
            return Ok(());
        }
        if index >= self.questions.len() {
            return Err(SessionError::QuestionOutOfRange {
                index,
                len: self.questions.len(),
            });
        }
        self.cursor = index;
        Ok(())
    }

    /// Count one second off the clock.
    ///
    /// When the clock reaches zero the session freezes into `Submitting` and the
    /// request is returned, however many questions are answered. Ticks after
    /// that, or after a manual submit, are ignored.
    pub fn tick(&mut self) -> TickOutcome {
        if self.is_frozen() {
            return TickOutcome::Ignored;
        }
        let remaining = self.countdown.tick();
        if remaining > 0 {
            return TickOutcome::Running { remaining };
        }
        TickOutcome::Expired(self.freeze(SubmitTrigger::Expiry))
    }

    /// Freeze the session for submission and return the slate snapshot.
    ///
    /// Valid from `Active` (manual submit, zero answers allowed) and from
    /// `SubmitFailed` (retry, keeps the original trigger). Returns `None` while a
    /// request is already in flight.
    pub fn begin_submit(&mut self) -> Option<SubmissionRequest> {
        match self.phase {
            SessionPhase::Active => Some(self.freeze(SubmitTrigger::Manual)),
            SessionPhase::SubmitFailed => {
                let trigger = self.trigger.unwrap_or(SubmitTrigger::Manual);
                Some(self.freeze(trigger))
            }
            SessionPhase::Submitting => None,
        }
    }

    /// The in-flight submission failed; answers stay exactly as they were.
    pub fn submission_failed(&mut self) {
        if self.phase == SessionPhase::Submitting {
            self.phase = SessionPhase::SubmitFailed;
        }
    }

    fn freeze(&mut self, trigger: SubmitTrigger) -> SubmissionRequest {
        self.phase = SessionPhase::Submitting;
        self.trigger = Some(trigger);
        SubmissionRequest {
            slate: self.slate.clone(),
            trigger,
        }
    }
}

impl fmt::Debug for TestSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestSession")
            .field("questions_len", &self.questions.len())
            .field("cursor", &self.cursor)
            .field("answered", &self.answered_count())
            .field("remaining_secs", &self.countdown.remaining())
            .field("phase", &self.phase)
            .field("started_at", &self.started_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
