use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::AdminVm;

use super::actions::{AdminIntent, use_admin_dispatcher};
use super::components::{AdminStats, DeleteConfirmModal, QuestionFormModal, QuestionList};
use super::state::use_admin_state;

#[component]
pub fn AdminView() -> Element {
    let ctx = use_context::<AppContext>();
    let admin = ctx.admin();
    let state = use_admin_state();
    let dispatch = use_admin_dispatcher(state, &admin);

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<AdminTestHandles>() {
                handles.register(dispatch);
            }
        }
    }

    let mut records = state.records;
    let mut resource = use_resource(move || {
        let admin = admin.clone();
        async move {
            let loaded = admin.list_questions().await.map_err(|_| ViewError::Fetch)?;
            records.set(Some(loaded));
            Ok::<_, ViewError>(())
        }
    });
    let load_state = view_state_from_resource(&resource);

    let search = state.search.read().clone();
    let busy = *state.busy.read();
    let dialog = *state.dialog.read();
    let form = state.form.read().clone();
    let confirming = state.pending_delete.read().is_some();
    let notice = *state.notice.read();

    rsx! {
        div { class: "page admin",
            header { class: "admin-header",
                div {
                    h1 { "Admin Panel" }
                    p { "Manage IELTS test questions" }
                }
                Link { to: Route::Home {}, class: "button ghost", "Back to Home" }
            }

            if let Some(notice) = notice {
                div { class: "notice error", id: "admin-notice", p { "{notice.message()}" } }
            }

            match load_state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { class: "loading", "Loading questions..." }
                },
                ViewState::Error(err) => rsx! {
                    div { class: "notice error",
                        p { "{err.message()}" }
                        button {
                            id: "admin-retry-load",
                            onclick: move |_| resource.restart(),
                            "Try Again"
                        }
                    }
                },
                ViewState::Ready(()) => {
                    let vm = AdminVm::build(records.read().clone().unwrap_or_default(), &search);
                    rsx! {
                        div { class: "admin-controls",
                            input {
                                id: "admin-search",
                                placeholder: "Search questions...",
                                value: "{search}",
                                oninput: move |evt| dispatch.call(AdminIntent::Search(evt.value())),
                            }
                            button {
                                id: "admin-add",
                                class: "button primary",
                                onclick: move |_| dispatch.call(AdminIntent::OpenAdd),
                                "Add Question"
                            }
                        }
                        AdminStats { vm: vm.clone() }
                        QuestionList { vm, busy, dispatch }
                    }
                }
            }

            QuestionFormModal { dialog, form, busy, dispatch }
            if confirming {
                DeleteConfirmModal { busy, dispatch }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct AdminTestHandles {
    dispatch: std::rc::Rc<std::cell::RefCell<Option<Callback<AdminIntent>>>>,
}

#[cfg(test)]
impl AdminTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<AdminIntent>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
    }

    pub(crate) fn dispatch(&self) -> Callback<AdminIntent> {
        (*self.dispatch.borrow()).expect("admin dispatch registered")
    }
}
