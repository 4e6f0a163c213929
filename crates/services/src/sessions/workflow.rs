use std::sync::Arc;

use mock_core::model::{GradedResult, HandoffKey};
use mock_core::{SessionPhase, SubmissionRequest, SubmitTrigger, TestSession};
use storage::handoff::ResultHandoff;
use storage::repository::{QuestionSource, ScoringService, StorageError};
use tracing::{info, instrument, warn};

use crate::Clock;
use crate::config::TestSettings;
use crate::error::SessionError;

/// Outcome of a successful submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionReceipt {
    pub key: HandoffKey,
    pub result: GradedResult,
    pub trigger: SubmitTrigger,
}

/// Orchestrates session start, submission and retry against the collaborators.
#[derive(Clone)]
pub struct TestSessionService {
    clock: Clock,
    settings: TestSettings,
    questions: Arc<dyn QuestionSource>,
    scoring: Arc<dyn ScoringService>,
    handoff: ResultHandoff,
}

impl TestSessionService {
    #[must_use]
    pub fn new(
        clock: Clock,
        questions: Arc<dyn QuestionSource>,
        scoring: Arc<dyn ScoringService>,
        handoff: ResultHandoff,
    ) -> Self {
        Self {
            clock,
            settings: TestSettings::default(),
            questions,
            scoring,
            handoff,
        }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: TestSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn settings(&self) -> TestSettings {
        self.settings
    }

    /// Fetch the questions and open a fresh session over them.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Fetch` if the source fails (retryable), or
    /// `SessionError::Empty` if it has no questions.
    #[instrument(skip(self))]
    pub async fn start_session(&self) -> Result<TestSession, SessionError> {
        let questions = self
            .questions
            .fetch_questions()
            .await
            .map_err(|err| {
                warn!(error = %err, "question fetch failed");
                SessionError::Fetch(err)
            })?;
        if questions.is_empty() {
            info!("question source returned no questions");
            return Err(SessionError::Empty);
        }
        let count = questions.len();
        let session = TestSession::new(questions, self.settings.countdown(), self.clock.now())?;
        info!(
            questions = count,
            duration_secs = self.settings.duration_secs(),
            "test session started"
        );
        Ok(session)
    }

    /// Manual submit: freeze the session, send its answers and resolve.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InFlight` if a request is already pending, or
    /// `SessionError::Submission` if scoring fails. A failed session keeps its
    /// answers and can be retried.
    pub async fn submit(
        &self,
        session: &mut TestSession,
    ) -> Result<SubmissionReceipt, SessionError> {
        let request = session.begin_submit().ok_or(SessionError::InFlight)?;
        self.deliver(session, request).await
    }

    /// Send a request the session already produced, e.g. from countdown expiry.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Submission` if scoring fails.
    pub async fn deliver(
        &self,
        session: &mut TestSession,
        request: SubmissionRequest,
    ) -> Result<SubmissionReceipt, SessionError> {
        let outcome = self.score(&request).await;
        self.resolve_submission(session, &request, outcome)
    }

    /// Resend the identical answers after a failed submission.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotRetryable` unless the last submission failed.
    pub async fn retry_submit(
        &self,
        session: &mut TestSession,
    ) -> Result<SubmissionReceipt, SessionError> {
        if session.phase() != SessionPhase::SubmitFailed {
            return Err(SessionError::NotRetryable);
        }
        let request = session.begin_submit().ok_or(SessionError::InFlight)?;
        info!(trigger = ?request.trigger(), "retrying submission");
        self.deliver(session, request).await
    }

    /// The network half of a submission. Does not touch the session.
    ///
    /// # Errors
    ///
    /// Returns the scoring collaborator's `StorageError`.
    #[instrument(
        skip(self, request),
        fields(trigger = ?request.trigger(), answered = request.slate().answered_count())
    )]
    pub async fn score(&self, request: &SubmissionRequest) -> Result<GradedResult, StorageError> {
        self.scoring.submit_answers(request.slate()).await
    }

    /// Apply a scoring outcome to the session that produced `request`.
    ///
    /// On success the result is parked in the hand-off store and the caller
    /// should drop the session. On failure the session moves to `SubmitFailed`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Submission` for a scoring failure, or
    /// `SessionError::Storage` if the hand-off store rejects the result.
    pub fn resolve_submission(
        &self,
        session: &mut TestSession,
        request: &SubmissionRequest,
        outcome: Result<GradedResult, StorageError>,
    ) -> Result<SubmissionReceipt, SessionError> {
        let result = match outcome {
            Ok(result) => result,
            Err(err) => {
                warn!(error = %err, "submission failed");
                session.submission_failed();
                return Err(SessionError::Submission(err));
            }
        };
        let key = match self.handoff.put(&result) {
            Ok(key) => key,
            Err(err) => {
                session.submission_failed();
                return Err(SessionError::Storage(err));
            }
        };
        info!(
            %key,
            score = result.score(),
            total = result.total_questions(),
            trigger = ?request.trigger(),
            "submission graded"
        );
        Ok(SubmissionReceipt {
            key,
            result,
            trigger: request.trigger(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mock_core::model::{AnswerSlate, Question, QuestionId};
    use mock_core::time::fixed_clock;
    use mock_core::TickOutcome;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    struct FixedQuestions(Result<Vec<Question>, u16>);

    #[async_trait]
    impl QuestionSource for FixedQuestions {
        async fn fetch_questions(&self) -> Result<Vec<Question>, StorageError> {
            self.0.clone().map_err(StorageError::Status)
        }
    }

    #[derive(Default)]
    struct ScriptedScoring {
        failures_left: Mutex<usize>,
        seen: Mutex<VecDeque<AnswerSlate>>,
    }

    impl ScriptedScoring {
        fn failing(times: usize) -> Self {
            Self {
                failures_left: Mutex::new(times),
                seen: Mutex::default(),
            }
        }

        fn seen(&self) -> Vec<AnswerSlate> {
            self.seen.lock().unwrap().iter().cloned().collect()
        }
    }

    #[async_trait]
    impl ScoringService for ScriptedScoring {
        async fn submit_answers(&self, slate: &AnswerSlate) -> Result<GradedResult, StorageError> {
            self.seen.lock().unwrap().push_back(slate.clone());
            let mut failures = self.failures_left.lock().unwrap();
            if *failures > 0 {
                *failures -= 1;
                return Err(StorageError::Connection("refused".into()));
            }
            let total = u32::try_from(slate.len()).unwrap();
            GradedResult::new(0, total, 0.0, Vec::new(), slate.clone(), None)
                .map_err(|e| StorageError::Serialization(e.to_string()))
        }
    }

    fn questions(n: u64) -> Vec<Question> {
        (1..=n)
            .map(|id| {
                Question::new(
                    QuestionId::new(id),
                    format!("Question {id}"),
                    vec!["A".into(), "B".into(), "C".into(), "D".into()],
                )
                .unwrap()
            })
            .collect()
    }

    fn service(
        source: FixedQuestions,
        scoring: Arc<ScriptedScoring>,
    ) -> (TestSessionService, ResultHandoff) {
        let handoff = ResultHandoff::new(fixed_clock());
        let service = TestSessionService::new(
            fixed_clock(),
            Arc::new(source),
            scoring,
            handoff.clone(),
        );
        (service, handoff)
    }

    #[tokio::test]
    async fn start_session_opens_fresh_slate() {
        let (service, _) = service(FixedQuestions(Ok(questions(3))), Arc::default());
        let session = service.start_session().await.unwrap();
        assert_eq!(session.question_count(), 3);
        assert_eq!(session.answered_count(), 0);
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.countdown().remaining(), 3600);
    }

    #[tokio::test]
    async fn empty_source_is_not_retryable() {
        let (service, _) = service(FixedQuestions(Ok(Vec::new())), Arc::default());
        let err = service.start_session().await.unwrap_err();
        assert!(matches!(err, SessionError::Empty));
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn fetch_failure_is_retryable() {
        let (service, _) = service(FixedQuestions(Err(500)), Arc::default());
        let err = service.start_session().await.unwrap_err();
        assert!(matches!(err, SessionError::Fetch(StorageError::Status(500))));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn manual_submit_hands_off_result() {
        let scoring = Arc::new(ScriptedScoring::default());
        let (service, handoff) = service(FixedQuestions(Ok(questions(3))), scoring.clone());
        let mut session = service.start_session().await.unwrap();
        session.select_answer(1).unwrap();

        let receipt = service.submit(&mut session).await.unwrap();
        assert_eq!(receipt.trigger, SubmitTrigger::Manual);
        assert_eq!(scoring.seen()[0].to_wire(), vec![1, -1, -1]);
        assert_eq!(handoff.take(receipt.key).unwrap(), Some(receipt.result));
    }

    #[tokio::test]
    async fn failed_submit_keeps_answers_and_retry_resends_them() {
        let scoring = Arc::new(ScriptedScoring::failing(1));
        let (service, _) = service(FixedQuestions(Ok(questions(2))), scoring.clone());
        let mut session = service.start_session().await.unwrap();
        session.select_answer(3).unwrap();
        session.advance();

        let err = service.submit(&mut session).await.unwrap_err();
        assert!(matches!(err, SessionError::Submission(_)));
        assert_eq!(session.phase(), SessionPhase::SubmitFailed);
        assert_eq!(session.current_index(), 1);

        let receipt = service.retry_submit(&mut session).await.unwrap();
        let seen = scoring.seen();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], seen[1]);
        assert_eq!(receipt.result.user_answers(), &seen[0]);
    }

    #[tokio::test]
    async fn retry_requires_failed_submission() {
        let (service, _) = service(FixedQuestions(Ok(questions(1))), Arc::default());
        let mut session = service.start_session().await.unwrap();
        assert!(matches!(
            service.retry_submit(&mut session).await,
            Err(SessionError::NotRetryable)
        ));
    }

    #[tokio::test]
    async fn expiry_delivers_with_expiry_trigger() {
        let scoring = Arc::new(ScriptedScoring::default());
        let (service, _) = service(FixedQuestions(Ok(questions(2))), scoring.clone());
        let service = service.with_settings(TestSettings::with_duration_secs(2).unwrap());
        let mut session = service.start_session().await.unwrap();

        assert!(matches!(session.tick(), TickOutcome::Running { remaining: 1 }));
        let TickOutcome::Expired(request) = session.tick() else {
            panic!("expected expiry");
        };
        assert!(matches!(
            service.submit(&mut session).await,
            Err(SessionError::InFlight)
        ));

        let receipt = service.deliver(&mut session, request).await.unwrap();
        assert_eq!(receipt.trigger, SubmitTrigger::Expiry);
        assert_eq!(scoring.seen().len(), 1);
    }
}
