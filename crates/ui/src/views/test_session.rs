use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use mock_core::SubmissionRequest;
use services::SessionTimer;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{TestIntent, TestVm, start_test};

#[component]
pub fn TestView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let service = ctx.test_sessions();
    let mut vm = use_signal(|| None::<TestVm>);

    let load_service = service.clone();
    let mut resource = use_resource(move || {
        let service = load_service.clone();
        async move {
            let test = start_test(&service).await?;
            vm.set(Some(test));
            Ok::<_, ViewError>(())
        }
    });
    let state = view_state_from_resource(&resource);

    let send = use_callback(move |request: SubmissionRequest| {
        let service = service.clone();
        spawn(async move {
            let outcome = service.score(&request).await;
            let resolved = vm
                .write()
                .as_mut()
                .map(|test| test.resolve(&service, &request, outcome));
            if let Some(Ok(key)) = resolved {
                vm.set(None);
                let _ = navigator.replace(Route::Results {
                    id: key.to_string(),
                });
            }
        });
    });

    let dispatch = use_callback(move |intent: TestIntent| {
        let outcome = vm.write().as_mut().map(|test| test.apply(intent));
        if let Some(Ok(Some(request))) = outcome {
            send.call(request);
        }
    });

    // Dropping the handle on unmount stops the ticks, so no auto-submit can fire
    // against a session the user walked away from.
    let _ticker = use_future(move || async move {
        let mut timer = SessionTimer::default().start();
        while timer.next_tick().await.is_some() {
            let expired = vm.write().as_mut().and_then(TestVm::tick);
            if let Some(request) = expired {
                send.call(request);
            }
        }
    });

    let retry_submit = move |_: MouseEvent| {
        let request = vm.write().as_mut().and_then(TestVm::retry);
        if let Some(request) = request {
            send.call(request);
        }
    };

    rsx! {
        div { class: "page test",
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { class: "loading", "Loading test questions..." }
                },
                ViewState::Error(err) if err.is_retryable() => rsx! {
                    div { class: "notice error",
                        p { "{err.message()}" }
                        button {
                            id: "test-retry-load",
                            onclick: move |_| resource.restart(),
                            "Try Again"
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    div { class: "notice",
                        p { "{err.message()}" }
                        Link { to: Route::Home {}, class: "button", "Go Home" }
                    }
                },
                ViewState::Ready(()) => match vm.read().as_ref() {
                    Some(test) => rsx! {
                        TestBody {
                            view: TestBodyVm::from(test),
                            dispatch,
                            on_retry: retry_submit,
                        }
                    },
                    None => rsx! {
                        p { class: "loading", "Loading your results..." }
                    },
                },
            }
        }
    }
}

/// Render-ready snapshot of the live session.
#[derive(Clone, Debug, PartialEq)]
struct TestBodyVm {
    card: crate::vm::QuestionCardVm,
    overview: Vec<crate::vm::OverviewCellVm>,
    answered_label: String,
    position_label: String,
    progress_percent: f64,
    timer_label: String,
    timer_class: &'static str,
    can_go_back: bool,
    is_last: bool,
    is_submitting: bool,
    submit_label: &'static str,
    submit_error: Option<ViewError>,
    hint: Option<String>,
}

impl From<&TestVm> for TestBodyVm {
    fn from(test: &TestVm) -> Self {
        Self {
            card: test.question_card(),
            overview: test.overview(),
            answered_label: test.answered_label(),
            position_label: test.position_label(),
            progress_percent: test.progress_percent(),
            timer_label: test.timer_label(),
            timer_class: test.timer_class(),
            can_go_back: test.can_go_back(),
            is_last: test.is_last_question(),
            is_submitting: test.is_submitting(),
            submit_label: test.submit_label(),
            submit_error: test.submit_error(),
            hint: test.completion_hint(),
        }
    }
}

#[component]
fn TestBody(
    view: TestBodyVm,
    dispatch: Callback<TestIntent>,
    on_retry: EventHandler<MouseEvent>,
) -> Element {
    let card = view.card.clone();
    let progress_style = format!("width: {:.0}%", view.progress_percent);

    rsx! {
        div { class: "test-header",
            Link { to: Route::Home {}, class: "button ghost", "Back to Home" }
            span { class: "answered", "{view.answered_label}" }
            span { class: "{view.timer_class}", id: "test-timer", "{view.timer_label}" }
        }

        div { class: "test-progress",
            h1 { "IELTS Mock Test" }
            span { "{view.position_label}" }
            div { class: "progress", div { class: "progress-bar", style: "{progress_style}" } }
        }

        section { class: "card question",
            h2 { "Question {card.number}" }
            p { class: "question-text", "{card.text}" }
            div { class: "options", role: "radiogroup",
                for option in card.options.clone() {
                    button {
                        key: "{option.index}",
                        class: if option.selected { "option selected" } else { "option" },
                        role: "radio",
                        aria_checked: "{option.selected}",
                        disabled: view.is_submitting,
                        onclick: move |_| dispatch.call(TestIntent::Select(option.index)),
                        "{option.label}"
                    }
                }
            }
        }

        if let Some(err) = view.submit_error {
            div { class: "notice error", id: "test-submit-error",
                p { "{err.message()}" }
                button {
                    id: "test-retry-submit",
                    onclick: move |evt| on_retry.call(evt),
                    "Retry Submit"
                }
            }
        }

        div { class: "test-nav",
            button {
                id: "test-prev",
                disabled: !view.can_go_back,
                onclick: move |_| dispatch.call(TestIntent::Previous),
                "Previous"
            }
            if view.is_last {
                div { class: "submit",
                    if let Some(hint) = view.hint.clone() {
                        span { class: "hint", "{hint}" }
                    }
                    button {
                        id: "test-submit",
                        class: "primary",
                        disabled: view.is_submitting || view.submit_error.is_some(),
                        onclick: move |_| dispatch.call(TestIntent::Submit),
                        "{view.submit_label}"
                    }
                }
            } else {
                button {
                    id: "test-next",
                    class: "primary",
                    onclick: move |_| dispatch.call(TestIntent::Next),
                    "Next"
                }
            }
        }

        section { class: "card overview",
            h3 { "Question Overview" }
            div { class: "overview-grid",
                for cell in view.overview.clone() {
                    button {
                        key: "{cell.index}",
                        class: "{cell.class}",
                        disabled: view.is_submitting,
                        onclick: move |_| dispatch.call(TestIntent::Jump(cell.index)),
                        "{cell.number}"
                    }
                }
            }
        }
    }
}
