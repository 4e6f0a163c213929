use dioxus::prelude::*;
use services::SessionError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    EmptySession,
    Fetch,
    Submit,
    NoResult,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::EmptySession => "No questions available.",
            Self::Fetch => "Failed to load questions. Please try again.",
            Self::Submit => "Failed to submit test. Please try again.",
            Self::NoResult => "No test results found.",
            Self::Unknown => "Something went wrong. Please try again.",
        }
    }

    /// Missing content or results send the user home instead.
    #[must_use]
    pub fn is_retryable(self) -> bool {
        matches!(self, Self::Fetch | Self::Submit | Self::Unknown)
    }
}

impl From<&SessionError> for ViewError {
    fn from(err: &SessionError) -> Self {
        match err {
            SessionError::Empty => Self::EmptySession,
            SessionError::Fetch(_) => Self::Fetch,
            SessionError::Submission(_) => Self::Submit,
            SessionError::NoResult => Self::NoResult,
            _ => Self::Unknown,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
