use dioxus::prelude::*;
use mock_core::model::QuestionDraft;

use crate::vm::{AdminRowVm, AdminVm, option_letter};

use super::actions::AdminIntent;
use super::state::Dialog;

#[component]
pub fn AdminStats(vm: AdminVm) -> Element {
    rsx! {
        div { class: "summary-cards admin-stats",
            section { class: "card",
                div { class: "big", "{vm.total}" }
                span { "Total Questions" }
            }
            section { class: "card",
                div { class: "big", "{vm.filtered}" }
                span { "Filtered Results" }
            }
            section { class: "card",
                div { class: "big status-active", "Active" }
                span { "System Status" }
            }
        }
    }
}

#[component]
pub fn QuestionList(vm: AdminVm, busy: bool, dispatch: Callback<AdminIntent>) -> Element {
    if let Some(empty) = vm.empty_text {
        return rsx! {
            section { class: "card empty", p { "{empty}" } }
        };
    }

    rsx! {
        div { class: "admin-list",
            for row in vm.rows.clone() {
                QuestionRow { key: "{row.id}", row, busy, dispatch }
            }
        }
    }
}

#[component]
fn QuestionRow(row: AdminRowVm, busy: bool, dispatch: Callback<AdminIntent>) -> Element {
    let id = row.id;

    rsx! {
        section { class: "card admin-row",
            div { class: "admin-row-header",
                div {
                    h3 { "Question {row.number}" }
                    p { class: "question-text", "{row.text}" }
                }
                div { class: "admin-row-actions",
                    button {
                        class: "button ghost",
                        disabled: busy,
                        onclick: move |_| dispatch.call(AdminIntent::OpenEdit(id)),
                        "Edit"
                    }
                    button {
                        class: "button danger",
                        disabled: busy,
                        onclick: move |_| dispatch.call(AdminIntent::RequestDelete(id)),
                        "Delete"
                    }
                }
            }
            ul { class: "admin-options",
                for option in row.options.clone() {
                    li { key: "{option.letter}",
                        span {
                            class: if option.is_correct { "badge correct" } else { "badge" },
                            "{option.letter}"
                        }
                        span { "{option.text}" }
                    }
                }
            }
        }
    }
}

#[component]
pub fn QuestionFormModal(
    dialog: Dialog,
    form: QuestionDraft,
    busy: bool,
    dispatch: Callback<AdminIntent>,
) -> Element {
    let (title, description, confirm) = match dialog {
        Dialog::Closed => return rsx! {},
        Dialog::Add => (
            "Add New Question",
            "Create a new question for the IELTS mock test.",
            "Add Question",
        ),
        Dialog::Edit(_) => ("Edit Question", "Update the question details.", "Save Changes"),
    };
    let correct = form.correct_answer;
    let slots: Vec<(usize, char, String)> = form
        .options
        .iter()
        .enumerate()
        .map(|(index, text)| (index, option_letter(index), text.clone()))
        .collect();

    rsx! {
        div {
            class: "modal-overlay",
            onclick: move |_| dispatch.call(AdminIntent::CloseDialog),
            div {
                class: "modal",
                onclick: move |evt| evt.stop_propagation(),
                h3 { class: "modal-title", "{title}" }
                p { class: "modal-body", "{description}" }

                label { r#for: "question-text", "Question Text" }
                textarea {
                    id: "question-text",
                    rows: 4,
                    placeholder: "Enter the question text...",
                    value: "{form.text}",
                    oninput: move |evt| dispatch.call(AdminIntent::EditText(evt.value())),
                }

                label { "Answer Options" }
                for (index, letter, text) in slots.clone() {
                    input {
                        key: "{index}",
                        placeholder: "Option {letter}",
                        value: "{text}",
                        oninput: move |evt| {
                            dispatch.call(AdminIntent::EditOption(index, evt.value()));
                        },
                    }
                }

                label { "Correct Answer" }
                div { class: "correct-picker", role: "radiogroup",
                    for (index, letter, _) in slots {
                        button {
                            key: "{index}",
                            class: if index == correct { "option selected" } else { "option" },
                            role: "radio",
                            aria_checked: index == correct,
                            onclick: move |_| dispatch.call(AdminIntent::SetCorrect(index)),
                            "{letter}"
                        }
                    }
                }

                div { class: "modal-actions",
                    button {
                        class: "button ghost",
                        onclick: move |_| dispatch.call(AdminIntent::CloseDialog),
                        "Cancel"
                    }
                    button {
                        class: "button primary",
                        disabled: busy,
                        onclick: move |_| dispatch.call(AdminIntent::Save),
                        "{confirm}"
                    }
                }
            }
        }
    }
}

#[component]
pub fn DeleteConfirmModal(busy: bool, dispatch: Callback<AdminIntent>) -> Element {
    rsx! {
        div {
            class: "modal-overlay",
            onclick: move |_| dispatch.call(AdminIntent::CancelDelete),
            div {
                class: "modal",
                onclick: move |evt| evt.stop_propagation(),
                h3 { class: "modal-title", "Delete Question" }
                p { class: "modal-body",
                    "Are you sure you want to delete this question? This action cannot be undone."
                }
                div { class: "modal-actions",
                    button {
                        class: "button ghost",
                        onclick: move |_| dispatch.call(AdminIntent::CancelDelete),
                        "Cancel"
                    }
                    button {
                        class: "button danger",
                        disabled: busy,
                        onclick: move |_| dispatch.call(AdminIntent::ConfirmDelete),
                        "Delete"
                    }
                }
            }
        }
    }
}
