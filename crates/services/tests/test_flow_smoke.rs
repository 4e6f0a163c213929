use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mock_core::model::{AnswerSlate, GradedResult, QuestionDraft};
use mock_core::time::fixed_now;
use mock_core::{SessionPhase, SubmitTrigger, TickOutcome};
use services::{AppServices, Clock, SessionError, TestSettings};
use storage::repository::{ScoringService, Storage, StorageError};

/// Grades against a fixed answer key and can be told to fail the next call.
struct KeyedScoring {
    key: Vec<usize>,
    fail_next: Mutex<bool>,
}

#[async_trait]
impl ScoringService for KeyedScoring {
    async fn submit_answers(&self, slate: &AnswerSlate) -> Result<GradedResult, StorageError> {
        {
            let mut fail = self.fail_next.lock().unwrap();
            if *fail {
                *fail = false;
                return Err(StorageError::Connection("connection reset".into()));
            }
        }
        let correct: Vec<usize> = self
            .key
            .iter()
            .enumerate()
            .filter(|(index, option)| {
                slate.get(*index).and_then(|a| a.selected()) == Some(**option)
            })
            .map(|(index, _)| index)
            .collect();
        let total = u32::try_from(self.key.len()).unwrap();
        let score = u32::try_from(correct.len()).unwrap();
        let percentage = f64::from(score) * 100.0 / f64::from(total);
        GradedResult::new(score, total, percentage, correct, slate.clone(), None)
            .and_then(|result| result.with_answer_key(Some(self.key.clone())))
            .map_err(|e| StorageError::Serialization(e.to_string()))
    }
}

async fn app(key: Vec<usize>, fail_first: bool, duration_secs: u32) -> AppServices {
    let scoring = Arc::new(KeyedScoring {
        key: key.clone(),
        fail_next: Mutex::new(fail_first),
    });
    let storage = Storage::in_memory(scoring);
    let services = AppServices::from_storage(
        &storage,
        TestSettings::with_duration_secs(duration_secs).unwrap(),
        Clock::fixed(fixed_now()),
    );
    for (n, correct) in key.iter().enumerate() {
        services
            .admin()
            .create_question(QuestionDraft {
                text: format!("Question {}", n + 1),
                options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
                correct_answer: *correct,
            })
            .await
            .unwrap();
    }
    services
}

#[tokio::test]
async fn manual_submit_reaches_results() {
    let services = app(vec![2, 0, 3], false, 3600).await;
    let sessions = services.test_sessions();
    let mut session = sessions.start_session().await.unwrap();

    session.select_answer(2).unwrap();
    session.advance();
    session.advance();
    session.select_answer(3).unwrap();

    let receipt = sessions.submit(&mut session).await.unwrap();
    assert_eq!(receipt.trigger, SubmitTrigger::Manual);

    let result = services.results().load(receipt.key).unwrap();
    assert_eq!(result.score(), 2);
    assert_eq!(result.user_answers().to_wire(), vec![2, -1, 3]);
    assert_eq!(result.correct_option(1), Some(0));
}

#[tokio::test]
async fn countdown_expiry_submits_whatever_is_answered() {
    let services = app(vec![1, 1], false, 3).await;
    let sessions = services.test_sessions();
    let mut session = sessions.start_session().await.unwrap();
    session.select_answer(1).unwrap();

    let request = loop {
        match session.tick() {
            TickOutcome::Running { .. } => {}
            TickOutcome::Expired(request) => break request,
            TickOutcome::Ignored => panic!("session froze early"),
        }
    };
    assert!(matches!(session.tick(), TickOutcome::Ignored));

    let receipt = sessions.deliver(&mut session, request).await.unwrap();
    assert_eq!(receipt.trigger, SubmitTrigger::Expiry);
    assert_eq!(receipt.result.user_answers().to_wire(), vec![1, -1]);
}

#[tokio::test]
async fn failed_submit_can_be_retried_once_fixed() {
    let services = app(vec![0, 1], true, 3600).await;
    let sessions = services.test_sessions();
    let mut session = sessions.start_session().await.unwrap();
    session.select_answer(0).unwrap();

    let err = sessions.submit(&mut session).await.unwrap_err();
    assert!(matches!(err, SessionError::Submission(_)));
    assert_eq!(session.phase(), SessionPhase::SubmitFailed);

    let receipt = sessions.retry_submit(&mut session).await.unwrap();
    assert_eq!(receipt.result.score(), 1);
    assert!(services.results().load(receipt.key).is_ok());
}

#[tokio::test]
async fn empty_bank_has_nothing_to_start() {
    let services = app(Vec::new(), false, 3600).await;
    assert!(matches!(
        services.test_sessions().start_session().await,
        Err(SessionError::Empty)
    ));
}
