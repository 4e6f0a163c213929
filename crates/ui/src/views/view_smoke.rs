use super::test_harness::{
    HOME_MARKER, StubScoring, ViewKind, offline_services, seeded_services, setup_view_harness,
};

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_start_link() {
    let services = seeded_services(0, StubScoring { fail: false }).await;
    let mut harness = setup_view_harness(ViewKind::Home, services);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("IELTS Mock Test Platform"), "missing title in {html}");
    assert!(html.contains("Start Test"), "missing start link in {html}");
    assert!(html.contains("Timed Test (60 min)"), "missing duration in {html}");
    assert!(html.contains("Admin Access"), "missing admin link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn test_view_smoke_renders_first_question() {
    let services = seeded_services(3, StubScoring { fail: false }).await;
    let mut harness = setup_view_harness(ViewKind::Test, services);
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Which word completes sentence 1?"), "missing prompt in {html}");
    assert!(html.contains("Question 1 of 3"), "missing position in {html}");
    assert!(html.contains("0/3 answered"), "missing answered count in {html}");
    assert!(html.contains("60:00"), "missing timer in {html}");
    assert!(html.contains("Question Overview"), "missing overview in {html}");
    assert!(html.contains("Next"), "missing next button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn test_view_smoke_renders_no_content_state() {
    let services = seeded_services(0, StubScoring { fail: false }).await;
    let mut harness = setup_view_harness(ViewKind::Test, services);
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("No questions available."), "missing empty text in {html}");
    assert!(html.contains("Go Home"), "missing home link in {html}");
    assert!(!html.contains("Try Again"), "empty bank should not offer retry: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn test_view_smoke_offers_retry_when_questions_fail_to_load() {
    let mut harness = setup_view_harness(ViewKind::Test, offline_services());
    harness.settle().await;

    let html = harness.render();
    assert!(
        html.contains("Failed to load questions. Please try again."),
        "missing fetch error in {html}"
    );
    assert!(html.contains("Try Again"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_smoke_renders_analysis() {
    let services = seeded_services(2, StubScoring { fail: false }).await;
    let sessions = services.test_sessions();
    let mut session = sessions.start_session().await.unwrap();
    session.select_answer(2).unwrap();
    let receipt = sessions.submit(&mut session).await.unwrap();

    let mut harness = setup_view_harness(ViewKind::Results(receipt.key.to_string()), services);
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Test Results"), "missing title in {html}");
    assert!(html.contains("0/2"), "missing score in {html}");
    assert!(html.contains("0.0%"), "missing percentage in {html}");
    assert!(html.contains("Needs Improvement"), "missing band in {html}");
    assert!(html.contains("Your answer: Option 3"), "missing answer in {html}");
    assert!(html.contains("Your answer: Not answered"), "missing skipped in {html}");
    assert!(html.contains("Retake Test"), "missing retake in {html}");
    assert!(!html.contains(HOME_MARKER), "stored result should not redirect: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_without_result_redirects_home() {
    let services = seeded_services(0, StubScoring { fail: false }).await;
    let mut harness = setup_view_harness(ViewKind::Results("missing".into()), services);
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains(HOME_MARKER), "expected redirect home, got {html}");
    assert!(!html.contains("Test Results"), "results should not render: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_redirects_home_once_result_is_dismissed() {
    let services = seeded_services(1, StubScoring { fail: false }).await;
    let sessions = services.test_sessions();
    let mut session = sessions.start_session().await.unwrap();
    let receipt = sessions.submit(&mut session).await.unwrap();
    services.results().dismiss(receipt.key).unwrap();

    let mut harness = setup_view_harness(ViewKind::Results(receipt.key.to_string()), services);
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains(HOME_MARKER), "expected redirect home, got {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn admin_view_smoke_lists_questions_with_stats() {
    let services = seeded_services(2, StubScoring { fail: false }).await;
    let mut harness = setup_view_harness(ViewKind::Admin, services);
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Admin Panel"), "missing title in {html}");
    assert!(html.contains("Total Questions"), "missing stats in {html}");
    assert!(html.contains("Filtered Results"), "missing filter count in {html}");
    assert!(html.contains("Which word completes sentence 2?"), "missing row in {html}");
    assert!(html.contains("badge correct"), "missing correct badge in {html}");
    assert!(html.contains("Search questions..."), "missing search in {html}");
    assert!(!html.contains("Add New Question"), "form should start closed: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn admin_view_smoke_shows_empty_bank_hint() {
    let services = seeded_services(0, StubScoring { fail: false }).await;
    let mut harness = setup_view_harness(ViewKind::Admin, services);
    harness.settle().await;

    let html = harness.render();
    assert!(
        html.contains("No questions available. Add some questions to get started."),
        "missing empty hint in {html}"
    );
}
