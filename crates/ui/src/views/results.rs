use dioxus::prelude::*;
use dioxus_router::use_navigator;

use mock_core::model::HandoffKey;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{QuestionAnalysisVm, ResultsVm, map_results};

#[component]
pub fn ResultsView(id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let results = ctx.results();

    let load = results.clone();
    let route_key = id.clone();
    let resource = use_resource(move || {
        let results = load.clone();
        let key = route_key.clone();
        async move {
            let result = results.load_str(&key).map_err(|err| ViewError::from(&err))?;
            Ok::<_, ViewError>(map_results(&result))
        }
    });
    let state = view_state_from_resource(&resource);

    let mut redirected = use_signal(|| false);
    use_effect(move || {
        let missing = matches!(
            resource.value().read().as_ref(),
            Some(Err(ViewError::NoResult))
        );
        if missing && !*redirected.peek() {
            redirected.set(true);
            let _ = navigator.replace(Route::Home {});
        }
    });

    let parsed_key = id.parse::<HandoffKey>().ok();
    let leave = move |target: Route| {
        if let Some(key) = parsed_key {
            // Nothing useful to do if the entry is already gone.
            let _ = results.dismiss(key);
        }
        let _ = navigator.push(target);
    };
    let leave_retake = leave.clone();
    let leave_home = leave;

    rsx! {
        div { class: "page results",
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { class: "loading", "Loading your results..." }
                },
                ViewState::Error(err) => rsx! {
                    div { class: "notice",
                        p { "{err.message()}" }
                        button { onclick: move |_| leave_home(Route::Home {}), "Go Home" }
                    }
                },
                ViewState::Ready(vm) => rsx! {
                    ResultsDetails { vm }
                    div { class: "results-actions",
                        button {
                            id: "results-retake",
                            class: "primary",
                            onclick: move |_| leave_retake(Route::Test {}),
                            "Retake Test"
                        }
                        button {
                            id: "results-home",
                            onclick: move |_| leave_home(Route::Home {}),
                            "Back to Home"
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn ResultsDetails(vm: ResultsVm) -> Element {
    let meter = format!("width: {:.0}%", vm.percentage);

    rsx! {
        header { class: "results-header",
            h1 { "Test Results" }
            p { "Here's how you performed on your IELTS mock test" }
        }

        div { class: "summary-cards",
            section { class: "card",
                h3 { "Overall Score" }
                div { class: "big", "{vm.score_label}" }
                span { class: "{vm.level_class}", "{vm.level_label}" }
            }
            section { class: "card",
                h3 { "Percentage" }
                div { class: "big", "{vm.percentage_label}" }
                div { class: "progress", div { class: "progress-bar", style: "{meter}" } }
            }
            section { class: "card",
                h3 { "Accuracy" }
                dl { class: "accuracy",
                    dt { "Correct" }
                    dd { class: "correct", "{vm.correct}" }
                    dt { "Incorrect" }
                    dd { class: "incorrect", "{vm.incorrect}" }
                }
            }
        }

        section { class: "card feedback",
            h3 { "Performance Feedback" }
            p { "{vm.feedback}" }
        }

        section { class: "card analysis",
            h3 { "Question by Question Analysis" }
            for row in vm.questions.clone() {
                AnalysisRow { key: "{row.number}", row }
            }
        }
    }
}

#[component]
fn AnalysisRow(row: QuestionAnalysisVm) -> Element {
    rsx! {
        div { class: "analysis-row",
            span { class: "number", "Question {row.number}" }
            if row.is_correct {
                span { class: "badge correct", "Correct" }
            } else {
                span { class: "badge incorrect", "Incorrect" }
            }
            span { class: "answer", "Your answer: {row.your_answer}" }
            if let Some(correct) = row.correct_answer.clone() {
                span { class: "answer correct", "Correct answer: {correct}" }
            }
        }
    }
}
