use crate::views::test_harness::{StubScoring, ViewKind, seeded_services, setup_view_harness};

use super::actions::AdminIntent;

#[tokio::test(flavor = "current_thread")]
async fn admin_intents_smoke_create_edit_search_delete() {
    let services = seeded_services(1, StubScoring { fail: false }).await;
    let admin = services.admin();
    let mut harness = setup_view_harness(ViewKind::Admin, services);
    harness.settle().await;

    let dispatch = harness.admin_handles.clone().expect("admin handles").dispatch();

    dispatch.call(AdminIntent::OpenAdd);
    harness.drive_rounds(2).await;
    let html = harness.render();
    assert!(html.contains("Add New Question"), "form should open: {html}");

    // A blank form is rejected before anything is stored.
    dispatch.call(AdminIntent::Save);
    harness.drive_rounds(3).await;
    let html = harness.render();
    assert!(html.contains("Please fill in all fields"), "missing notice in {html}");
    assert_eq!(admin.list_questions().await.expect("list").len(), 1);

    dispatch.call(AdminIntent::EditText("Pick the synonym of rapid.".into()));
    for (index, text) in ["slow", "late", "quick", "calm"].into_iter().enumerate() {
        dispatch.call(AdminIntent::EditOption(index, text.into()));
    }
    dispatch.call(AdminIntent::SetCorrect(2));
    dispatch.call(AdminIntent::Save);
    harness.drive_rounds(4).await;

    let records = admin.list_questions().await.expect("list created");
    assert_eq!(records.len(), 2);
    let created = records
        .iter()
        .find(|record| record.question.text() == "Pick the synonym of rapid.")
        .expect("created question")
        .clone();
    assert_eq!(created.correct_answer, 2);
    let html = harness.render();
    assert!(!html.contains("Add New Question"), "form should close: {html}");
    assert!(html.contains("Pick the synonym of rapid."), "missing new row in {html}");

    dispatch.call(AdminIntent::OpenEdit(created.id()));
    harness.drive_rounds(2).await;
    let html = harness.render();
    assert!(html.contains("Edit Question"), "edit form should open: {html}");
    dispatch.call(AdminIntent::EditText("Pick the synonym of swift.".into()));
    dispatch.call(AdminIntent::Save);
    harness.drive_rounds(4).await;

    let edited = admin.get_question(created.id()).await.expect("edited");
    assert_eq!(edited.question.text(), "Pick the synonym of swift.");
    assert_eq!(edited.correct_answer, 2);

    dispatch.call(AdminIntent::Search("swift".into()));
    harness.drive_rounds(2).await;
    let html = harness.render();
    assert!(html.contains("Pick the synonym of swift."), "search lost match: {html}");
    assert!(
        !html.contains("Which word completes sentence 1?"),
        "search kept non-match: {html}"
    );
    dispatch.call(AdminIntent::Search(String::new()));

    dispatch.call(AdminIntent::RequestDelete(created.id()));
    harness.drive_rounds(2).await;
    let html = harness.render();
    assert!(
        html.contains("Are you sure you want to delete this question?"),
        "missing confirm in {html}"
    );
    dispatch.call(AdminIntent::CancelDelete);
    harness.drive_rounds(2).await;
    assert_eq!(admin.list_questions().await.expect("list kept").len(), 2);

    dispatch.call(AdminIntent::RequestDelete(created.id()));
    dispatch.call(AdminIntent::ConfirmDelete);
    harness.drive_rounds(4).await;

    let records = admin.list_questions().await.expect("list deleted");
    assert_eq!(records.len(), 1);
    let html = harness.render();
    assert!(!html.contains("Pick the synonym of swift."), "row should be gone: {html}");
    assert!(!html.contains("Are you sure"), "confirm should close: {html}");
}
