use mock_core::model::{GradedResult, HandoffKey};
use mock_core::{QuestionStatus, SessionPhase, SubmissionRequest, TestSession, TickOutcome};
use services::{StorageError, TestSessionService};

use crate::views::ViewError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TestIntent {
    Select(usize),
    Previous,
    Next,
    Jump(usize),
    Submit,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub index: usize,
    pub label: String,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionCardVm {
    pub number: usize,
    pub total: usize,
    pub text: String,
    pub options: Vec<OptionVm>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverviewCellVm {
    pub index: usize,
    pub number: usize,
    pub class: &'static str,
}

/// View model over a live test session.
pub struct TestVm {
    session: TestSession,
    submit_error: Option<ViewError>,
}

impl TestVm {
    #[must_use]
    pub fn new(session: TestSession) -> Self {
        Self {
            session,
            submit_error: None,
        }
    }

    #[must_use]
    pub fn session(&self) -> &TestSession {
        &self.session
    }

    #[must_use]
    pub fn question_card(&self) -> QuestionCardVm {
        let question = self.session.current_question();
        let selected = self.session.current_answer().selected();
        QuestionCardVm {
            number: self.session.current_index() + 1,
            total: self.session.question_count(),
            text: question.text().to_string(),
            options: question
                .options()
                .iter()
                .enumerate()
                .map(|(index, label)| OptionVm {
                    index,
                    label: label.clone(),
                    selected: selected == Some(index),
                })
                .collect(),
        }
    }

    #[must_use]
    pub fn overview(&self) -> Vec<OverviewCellVm> {
        self.session
            .overview()
            .into_iter()
            .enumerate()
            .map(|(index, status)| OverviewCellVm {
                index,
                number: index + 1,
                class: match status {
                    QuestionStatus::Current => "overview-cell current",
                    QuestionStatus::Answered => "overview-cell answered",
                    QuestionStatus::Unanswered => "overview-cell",
                },
            })
            .collect()
    }

    #[must_use]
    pub fn answered_label(&self) -> String {
        let progress = self.session.progress();
        format!("{}/{} answered", progress.answered, progress.total)
    }

    #[must_use]
    pub fn position_label(&self) -> String {
        let progress = self.session.progress();
        format!("Question {} of {}", progress.position, progress.total)
    }

    /// Share of the test walked through so far, by position.
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        self.session.progress().percent()
    }

    #[must_use]
    pub fn timer_label(&self) -> String {
        self.session.countdown().format()
    }

    #[must_use]
    pub fn timer_class(&self) -> &'static str {
        if self.session.countdown().is_low() {
            "timer low"
        } else {
            "timer"
        }
    }

    #[must_use]
    pub fn can_go_back(&self) -> bool {
        !self.session.is_first_question() && !self.session.is_frozen()
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.session.is_last_question()
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.session.phase() == SessionPhase::Submitting
    }

    #[must_use]
    pub fn submit_error(&self) -> Option<ViewError> {
        self.submit_error
    }

    #[must_use]
    pub fn submit_label(&self) -> &'static str {
        if self.is_submitting() {
            "Submitting..."
        } else {
            "Submit Test"
        }
    }

    /// Gentle nudge shown next to the submit button; submitting is still allowed.
    #[must_use]
    pub fn completion_hint(&self) -> Option<String> {
        let progress = self.session.progress();
        let missing = progress.total - progress.answered;
        (missing > 0).then(|| match missing {
            1 => "1 question is still unanswered.".to_string(),
            n => format!("{n} questions are still unanswered."),
        })
    }

    /// Apply a user action. `Submit` hands back the request to send.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::Unknown` if the action does not fit the session.
    pub fn apply(&mut self, intent: TestIntent) -> Result<Option<SubmissionRequest>, ViewError> {
        match intent {
            TestIntent::Select(option) => {
                self.session
                    .select_answer(option)
                    .map_err(|_| ViewError::Unknown)?;
            }
            TestIntent::Previous => self.session.retreat(),
            TestIntent::Next => self.session.advance(),
            TestIntent::Jump(index) => {
                self.session.jump_to(index).map_err(|_| ViewError::Unknown)?;
            }
            TestIntent::Submit => {
                let request = self.session.begin_submit();
                if request.is_some() {
                    self.submit_error = None;
                }
                return Ok(request);
            }
        }
        Ok(None)
    }

    /// One timer tick. Returns the auto-submit request when time runs out.
    pub fn tick(&mut self) -> Option<SubmissionRequest> {
        match self.session.tick() {
            TickOutcome::Expired(request) => {
                self.submit_error = None;
                Some(request)
            }
            TickOutcome::Running { .. } | TickOutcome::Ignored => None,
        }
    }

    /// Freeze again after a failed submission and hand back the same answers.
    pub fn retry(&mut self) -> Option<SubmissionRequest> {
        if self.session.phase() != SessionPhase::SubmitFailed {
            return None;
        }
        self.apply(TestIntent::Submit).ok().flatten()
    }

    /// Apply the scoring outcome for `request`.
    ///
    /// # Errors
    ///
    /// Returns the `ViewError` to show next to the retry button.
    pub fn resolve(
        &mut self,
        service: &TestSessionService,
        request: &SubmissionRequest,
        outcome: Result<GradedResult, StorageError>,
    ) -> Result<HandoffKey, ViewError> {
        match service.resolve_submission(&mut self.session, request, outcome) {
            Ok(receipt) => Ok(receipt.key),
            Err(err) => {
                let view_err = ViewError::from(&err);
                self.submit_error = Some(view_err);
                Err(view_err)
            }
        }
    }
}

/// # Errors
///
/// Returns `ViewError::EmptySession` when no questions are available, or
/// `ViewError::Fetch` when they could not be loaded.
pub async fn start_test(service: &TestSessionService) -> Result<TestVm, ViewError> {
    let session = service
        .start_session()
        .await
        .map_err(|err| ViewError::from(&err))?;
    Ok(TestVm::new(session))
}
