use std::sync::Arc;

use dioxus::prelude::*;
use mock_core::model::{QuestionDraft, QuestionId, QuestionPatch, QuestionRecord};
use services::{AdminError, QuestionAdminService};

use super::state::{
    AdminNotice, AdminState, Dialog, remove_record, set_correct, set_option, upsert_record,
};

#[derive(Clone, Debug, PartialEq)]
pub enum AdminIntent {
    Search(String),
    OpenAdd,
    OpenEdit(QuestionId),
    CloseDialog,
    EditText(String),
    EditOption(usize, String),
    SetCorrect(usize),
    Save,
    RequestDelete(QuestionId),
    CancelDelete,
    ConfirmDelete,
}

pub fn use_admin_dispatcher(
    state: AdminState,
    admin: &Arc<QuestionAdminService>,
) -> Callback<AdminIntent> {
    let save = build_save_action(state, Arc::clone(admin));
    let delete = build_delete_action(state, Arc::clone(admin));

    use_callback(move |intent: AdminIntent| {
        let mut state = state;
        match intent {
            AdminIntent::Search(term) => state.search.set(term),
            AdminIntent::OpenAdd => open_form(&mut state, Dialog::Add, QuestionDraft::blank()),
            AdminIntent::OpenEdit(id) => {
                let draft = state
                    .records
                    .peek()
                    .as_ref()
                    .and_then(|records| records.iter().find(|record| record.id() == id))
                    .map(QuestionRecord::to_draft);
                if let Some(draft) = draft {
                    open_form(&mut state, Dialog::Edit(id), draft);
                }
            }
            AdminIntent::CloseDialog => close_form(&mut state),
            AdminIntent::EditText(text) => state.form.write().text = text,
            AdminIntent::EditOption(index, value) => {
                set_option(&mut state.form.write(), index, value);
            }
            AdminIntent::SetCorrect(index) => set_correct(&mut state.form.write(), index),
            AdminIntent::Save => save.call(()),
            AdminIntent::RequestDelete(id) => state.pending_delete.set(Some(id)),
            AdminIntent::CancelDelete => state.pending_delete.set(None),
            AdminIntent::ConfirmDelete => delete.call(()),
        }
    })
}

fn open_form(state: &mut AdminState, dialog: Dialog, draft: QuestionDraft) {
    state.form.set(draft);
    state.dialog.set(dialog);
    state.notice.set(None);
}

fn close_form(state: &mut AdminState) {
    state.dialog.set(Dialog::Closed);
    state.form.set(QuestionDraft::blank());
    state.notice.set(None);
}

fn build_save_action(state: AdminState, admin: Arc<QuestionAdminService>) -> Callback<()> {
    use_callback(move |()| {
        let mut state = state;
        if *state.busy.peek() {
            return;
        }
        let dialog = *state.dialog.peek();
        let draft = state.form.peek().clone();
        let admin = Arc::clone(&admin);
        match dialog {
            Dialog::Closed => {}
            Dialog::Add => {
                state.busy.set(true);
                spawn(async move {
                    let outcome = admin.create_question(draft).await;
                    finish_save(state, outcome, AdminNotice::AddFailed);
                });
            }
            Dialog::Edit(id) => {
                state.busy.set(true);
                spawn(async move {
                    let outcome = admin
                        .update_question(id, QuestionPatch::from_draft(draft))
                        .await;
                    finish_save(state, outcome, AdminNotice::UpdateFailed);
                });
            }
        }
    })
}

fn finish_save(
    mut state: AdminState,
    outcome: Result<QuestionRecord, AdminError>,
    failed: AdminNotice,
) {
    state.busy.set(false);
    match outcome {
        Ok(record) => {
            if let Some(records) = state.records.write().as_mut() {
                upsert_record(records, record);
            }
            close_form(&mut state);
        }
        Err(err) => state.notice.set(Some(AdminNotice::from_error(&err, failed))),
    }
}

fn build_delete_action(state: AdminState, admin: Arc<QuestionAdminService>) -> Callback<()> {
    use_callback(move |()| {
        let mut state = state;
        let Some(id) = *state.pending_delete.peek() else {
            return;
        };
        state.pending_delete.set(None);
        let admin = Arc::clone(&admin);
        state.busy.set(true);
        spawn(async move {
            let outcome = admin.delete_question(id).await;
            state.busy.set(false);
            match outcome {
                Ok(()) => {
                    if let Some(records) = state.records.write().as_mut() {
                        remove_record(records, id);
                    }
                    state.notice.set(None);
                }
                Err(_) => state.notice.set(Some(AdminNotice::DeleteFailed)),
            }
        });
    })
}
