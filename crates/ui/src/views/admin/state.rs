use dioxus::prelude::*;
use mock_core::model::{QuestionDraft, QuestionId, QuestionRecord};
use services::AdminError;

/// Which form, if any, is open over the question list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dialog {
    Closed,
    Add,
    Edit(QuestionId),
}

/// Banner shown above the list after a failed action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdminNotice {
    Incomplete,
    AddFailed,
    UpdateFailed,
    DeleteFailed,
}

impl AdminNotice {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Incomplete => "Please fill in all fields",
            Self::AddFailed => "Failed to add question. Please try again.",
            Self::UpdateFailed => "Failed to update question. Please try again.",
            Self::DeleteFailed => "Failed to delete question. Please try again.",
        }
    }

    /// Validation problems point at the form; everything else is the action failing.
    #[must_use]
    pub fn from_error(err: &AdminError, failed: Self) -> Self {
        match err {
            AdminError::Validation(_) => Self::Incomplete,
            _ => failed,
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
pub struct AdminState {
    pub records: Signal<Option<Vec<QuestionRecord>>>,
    pub search: Signal<String>,
    pub dialog: Signal<Dialog>,
    pub form: Signal<QuestionDraft>,
    pub pending_delete: Signal<Option<QuestionId>>,
    pub busy: Signal<bool>,
    pub notice: Signal<Option<AdminNotice>>,
}

pub fn use_admin_state() -> AdminState {
    AdminState {
        records: use_signal(|| None),
        search: use_signal(String::new),
        dialog: use_signal(|| Dialog::Closed),
        form: use_signal(QuestionDraft::blank),
        pending_delete: use_signal(|| None),
        busy: use_signal(|| false),
        notice: use_signal(|| None),
    }
}

pub fn set_option(form: &mut QuestionDraft, index: usize, value: String) {
    if let Some(slot) = form.options.get_mut(index) {
        *slot = value;
    }
}

pub fn set_correct(form: &mut QuestionDraft, index: usize) {
    if index < form.options.len() {
        form.correct_answer = index;
    }
}

/// Replace the record with the same id, or append a new one.
pub fn upsert_record(records: &mut Vec<QuestionRecord>, record: QuestionRecord) {
    match records.iter_mut().find(|existing| existing.id() == record.id()) {
        Some(existing) => *existing = record,
        None => records.push(record),
    }
}

pub fn remove_record(records: &mut Vec<QuestionRecord>, id: QuestionId) {
    records.retain(|record| record.id() != id);
}
