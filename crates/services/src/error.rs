//! Shared error types for the services crate.

use goals_core::model::GoalId;
use thiserror::Error;

/// Errors surfaced by a `GoalSource`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GoalSourceError {
    #[error("goal {0} not found")]
    NotFound(GoalId),
    #[error("goal source request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("goal source unavailable: {0}")]
    Unavailable(String),
}

/// Errors emitted by `GoalsService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GoalsServiceError {
    #[error(transparent)]
    Source(#[from] GoalSourceError),
}

/// Errors emitted while reading API configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiConfigError {
    #[error("invalid goals api url {raw}: {source}")]
    InvalidUrl {
        raw: String,
        #[source]
        source: url::ParseError,
    },
    #[error("goals api url must use http or https: {0}")]
    UnsupportedScheme(String),
}
