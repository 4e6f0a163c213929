use async_trait::async_trait;
use mock_core::model::{AnswerSlate, GradedResult, Question};
use tracing::{debug, instrument};

use super::mapping::{QuestionDto, SubmitRequestDto};
use super::{HttpRepository, read_json, transport};
use crate::repository::{QuestionSource, ScoringService, StorageError};

#[async_trait]
impl QuestionSource for HttpRepository {
    #[instrument(skip(self))]
    async fn fetch_questions(&self) -> Result<Vec<Question>, StorageError> {
        let response = self
            .client
            .get(self.url("test/questions"))
            .send()
            .await
            .map_err(transport)?;
        let questions: Vec<QuestionDto> = read_json(response).await?;
        debug!(count = questions.len(), "fetched test questions");
        questions
            .into_iter()
            .map(QuestionDto::into_question)
            .collect()
    }
}

#[async_trait]
impl ScoringService for HttpRepository {
    #[instrument(skip(self, slate), fields(answers = slate.len()))]
    async fn submit_answers(&self, slate: &AnswerSlate) -> Result<GradedResult, StorageError> {
        let response = self
            .client
            .post(self.url("test/submit"))
            .json(&SubmitRequestDto { answers: slate })
            .send()
            .await
            .map_err(transport)?;
        read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::http::HttpConfig;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn repo(server: &MockServer) -> HttpRepository {
        HttpRepository::connect(&HttpConfig {
            base_url: format!("{}/api", server.uri()),
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn fetch_questions_preserves_order_and_options() {
        let server = MockServer::start().await;
        let body = serde_json::json!([
            {"id": 7, "questionText": "Pick the antonym of 'ancient'.", "options": ["old", "modern", "aged", "past"]},
            {"id": 3, "questionText": "Choose the correct article.", "options": ["a", "an", "the", "none"]}
        ]);
        Mock::given(method("GET"))
            .and(path("/api/test/questions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let questions = repo(&server).fetch_questions().await.unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].id().value(), 7);
        assert_eq!(questions[1].options()[1], "an");
    }

    #[tokio::test]
    async fn empty_question_list_is_not_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/test/questions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        assert!(repo(&server).fetch_questions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn malformed_questions_surface_as_serialization_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/test/questions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 1, "questionText": "Q", "options": []}
            ])))
            .mount(&server)
            .await;

        let err = repo(&server).fetch_questions().await.unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)), "{err:?}");
    }

    #[tokio::test]
    async fn server_error_surfaces_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/test/questions"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = repo(&server).fetch_questions().await.unwrap_err();
        assert!(matches!(err, StorageError::Status(503)));
    }

    #[tokio::test]
    async fn submit_posts_slate_and_decodes_result() {
        let server = MockServer::start().await;
        let result = serde_json::json!({
            "score": 1,
            "totalQuestions": 3,
            "percentage": 33.3,
            "correctAnswers": [0],
            "userAnswers": [2, -1, 0],
            "feedback": ""
        });
        Mock::given(method("POST"))
            .and(path("/api/test/submit"))
            .and(body_json(serde_json::json!({"answers": [2, -1, 0]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(&result))
            .expect(1)
            .mount(&server)
            .await;

        let slate = AnswerSlate::from_wire(&[2, -1, 0]).unwrap();
        let graded = repo(&server).submit_answers(&slate).await.unwrap();
        assert_eq!(graded.score(), 1);
        assert_eq!(graded.total_questions(), 3);
        assert_eq!(graded.user_answers(), &slate);
        assert!(graded.is_correct(0));
    }

    #[tokio::test]
    async fn unreachable_scoring_is_a_connection_error() {
        let server = MockServer::start().await;
        let repo = repo(&server);
        drop(server);

        let err = repo
            .submit_answers(&AnswerSlate::unanswered(2))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Connection(_)), "{err:?}");
    }
}
