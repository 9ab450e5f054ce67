use std::fmt;

use dioxus::prelude::*;
use tracing::warn;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::Unknown => "Something went wrong. Please try again.",
        }
    }
}

/// Log a failed read and collapse it into the opaque view error.
pub fn read_failed<E: fmt::Display>(read: &'static str) -> impl FnOnce(E) -> ViewError {
    move |err| {
        warn!(read, %err, "read failed");
        ViewError::Unknown
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

/// Value of a counter read, or zero while it is loading or after it failed.
#[must_use]
pub fn count_or_zero(resource: &Resource<Result<u64, ViewError>>) -> u64 {
    resource
        .value()
        .read()
        .as_ref()
        .and_then(|result| result.as_ref().ok().copied())
        .unwrap_or(0)
}
