#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod goals_service;
pub mod http_source;
pub mod in_memory;
pub mod query_cache;
pub mod source;

pub use app_services::{AppServices, GoalBackend};
pub use error::{ApiConfigError, GoalSourceError, GoalsServiceError};
pub use goals_service::{DeletePolicy, GoalsService};
pub use http_source::{GoalsApiConfig, HttpGoalSource};
pub use in_memory::InMemoryGoalSource;
pub use query_cache::QueryCache;
pub use source::GoalSource;
