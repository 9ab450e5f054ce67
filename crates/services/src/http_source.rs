use std::env;

use async_trait::async_trait;
use goals_core::model::{Goal, GoalId, GoalKind, StudentId};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::error::{ApiConfigError, GoalSourceError};
use crate::source::GoalSource;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Where the goals API lives and how to authenticate against it.
#[derive(Clone, Debug)]
pub struct GoalsApiConfig {
    base_url: Url,
    token: Option<String>,
}

impl GoalsApiConfig {
    /// Validate `base_url` and build a config.
    ///
    /// # Errors
    ///
    /// Returns `ApiConfigError` if the url does not parse or is not http(s).
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, ApiConfigError> {
        let raw = base_url.trim();
        let parsed = Url::parse(raw).map_err(|source| ApiConfigError::InvalidUrl {
            raw: raw.to_owned(),
            source,
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiConfigError::UnsupportedScheme(raw.to_owned()));
        }
        let token = token.filter(|token| !token.trim().is_empty());
        Ok(Self {
            base_url: parsed,
            token,
        })
    }

    /// Read `GOALS_API_URL` and `GOALS_API_TOKEN`.
    ///
    /// # Errors
    ///
    /// Returns `ApiConfigError` if `GOALS_API_URL` is set to an invalid url.
    pub fn from_env() -> Result<Self, ApiConfigError> {
        let base_url = env::var("GOALS_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());
        Self::new(&base_url, env::var("GOALS_API_TOKEN").ok())
    }

    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|token| !token.trim().is_empty());
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn goals_path(student: StudentId) -> String {
    format!("student/{student}/goals")
}

fn goal_path(student: StudentId, goal: GoalId) -> String {
    format!("student/{student}/goals/{goal}")
}

fn today_progress_path(student: StudentId) -> String {
    format!("student/{student}/today-progress")
}

fn week_progress_path(student: StudentId) -> String {
    format!("student/{student}/week-progress")
}

/// `GoalSource` backed by the goals REST API.
#[derive(Clone)]
pub struct HttpGoalSource {
    client: Client,
    config: GoalsApiConfig,
}

impl HttpGoalSource {
    #[must_use]
    pub fn new(config: GoalsApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &GoalsApiConfig {
        &self.config
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, GoalSourceError> {
        let url = self.config.endpoint(path);
        debug!(%url, "goals api GET");
        let response = self.authorized(self.client.get(url)).send().await?;

        if !response.status().is_success() {
            return Err(GoalSourceError::HttpStatus(response.status()));
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl GoalSource for HttpGoalSource {
    async fn list_goals(&self, student: StudentId) -> Result<Vec<Goal>, GoalSourceError> {
        let records: Vec<GoalRecord> = self.get_json(&goals_path(student)).await?;
        Ok(goals_from_records(records))
    }

    async fn today_progress(&self, student: StudentId) -> Result<u64, GoalSourceError> {
        let body: TodayProgressBody = self.get_json(&today_progress_path(student)).await?;
        Ok(body.completed_today.unwrap_or(0))
    }

    async fn week_progress(&self, student: StudentId) -> Result<u64, GoalSourceError> {
        let body: WeekProgressBody = self.get_json(&week_progress_path(student)).await?;
        Ok(body.completed_week.unwrap_or(0))
    }

    async fn delete_goal(&self, student: StudentId, goal: GoalId) -> Result<(), GoalSourceError> {
        let url = self.config.endpoint(&goal_path(student, goal));
        debug!(%url, "goals api DELETE");
        let response = self.authorized(self.client.delete(url)).send().await?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::NOT_FOUND => Err(GoalSourceError::NotFound(goal)),
            status => Err(GoalSourceError::HttpStatus(status)),
        }
    }
}

/// Goal as the API returns it.
#[derive(Debug, Deserialize)]
struct GoalRecord {
    id: u64,
    #[serde(rename = "type")]
    kind: String,
    target: i64,
    #[serde(default)]
    current: Option<u64>,
    #[serde(default)]
    date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TodayProgressBody {
    #[serde(default)]
    completed_today: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct WeekProgressBody {
    #[serde(default)]
    completed_week: Option<u64>,
}

fn goals_from_records(records: Vec<GoalRecord>) -> Vec<Goal> {
    records
        .into_iter()
        .filter_map(|record| match record.kind.parse::<GoalKind>() {
            Ok(kind) => Some(Goal::new(
                GoalId::new(record.id),
                kind,
                record.target,
                record.current.unwrap_or(0),
                record.date.unwrap_or_default(),
            )),
            Err(err) => {
                warn!(goal_id = record.id, %err, "skipping goal");
                None
            }
        })
        .collect()
}
