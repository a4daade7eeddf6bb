use dioxus::prelude::*;
use services::QuizError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unknown,
    StillLoading,
    NoDataset,
    ConflictingModes,
    InvalidCoordinates,
}

impl ViewError {
    #[must_use]
    pub fn from_quiz(err: &QuizError) -> Self {
        match err {
            QuizError::Loading => Self::StillLoading,
            QuizError::NoDataset | QuizError::Data(_) => Self::NoDataset,
            QuizError::Config(_) => Self::ConflictingModes,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::Unknown => "Something went wrong. Please try again.",
            Self::StillLoading => "Places are still loading, please wait.",
            Self::NoDataset => "No places loaded. Pick a dataset first.",
            Self::ConflictingModes => "Hard mode and training mode cannot be combined.",
            Self::InvalidCoordinates => "Enter a latitude and a longitude in degrees.",
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
