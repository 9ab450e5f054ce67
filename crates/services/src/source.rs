use async_trait::async_trait;
use goals_core::model::{Goal, GoalId, StudentId};

use crate::error::GoalSourceError;

/// Remote data source that owns a student's goals and progress counters.
#[async_trait]
pub trait GoalSource: Send + Sync {
    /// List the student's goals in source order.
    ///
    /// # Errors
    ///
    /// Returns `GoalSourceError` if the goals cannot be read.
    async fn list_goals(&self, student: StudentId) -> Result<Vec<Goal>, GoalSourceError>;

    /// Problems solved today.
    ///
    /// # Errors
    ///
    /// Returns `GoalSourceError` if the counter cannot be read.
    async fn today_progress(&self, student: StudentId) -> Result<u64, GoalSourceError>;

    /// Problems solved this week.
    ///
    /// # Errors
    ///
    /// Returns `GoalSourceError` if the counter cannot be read.
    async fn week_progress(&self, student: StudentId) -> Result<u64, GoalSourceError>;

    /// Delete a goal.
    ///
    /// # Errors
    ///
    /// Returns `GoalSourceError::NotFound` if the goal is already gone, or other
    /// source errors.
    async fn delete_goal(&self, student: StudentId, goal: GoalId) -> Result<(), GoalSourceError>;
}
