use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::GoalId;

/// Period a goal's target applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalKind {
    Daily,
    Weekly,
}

impl GoalKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            GoalKind::Daily => "daily",
            GoalKind::Weekly => "weekly",
        }
    }
}

impl fmt::Display for GoalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for GoalKind {
    type Err = GoalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(GoalKind::Daily),
            "weekly" => Ok(GoalKind::Weekly),
            other => Err(GoalError::UnknownKind(other.to_owned())),
        }
    }
}

/// A target count of problems to solve within a period.
///
/// Goals are owned by the remote data source. This is a read-only copy; the
/// displayed progress comes from the live counters, not from `current`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Goal {
    id: GoalId,
    kind: GoalKind,
    target: i64,
    current: u64,
    date: String,
}

impl Goal {
    #[must_use]
    pub fn new(
        id: GoalId,
        kind: GoalKind,
        target: i64,
        current: u64,
        date: impl Into<String>,
    ) -> Self {
        Self {
            id,
            kind,
            target,
            current,
            date: date.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> GoalId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> GoalKind {
        self.kind
    }

    /// Problems to solve. Expected to be positive but not enforced here.
    #[must_use]
    pub fn target(&self) -> i64 {
        self.target
    }

    /// Server-reported baseline.
    #[must_use]
    pub fn current(&self) -> u64 {
        self.current
    }

    #[must_use]
    pub fn date(&self) -> &str {
        &self.date
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GoalError {
    #[error("unknown goal kind: {0}")]
    UnknownKind(String),
}
