use std::sync::Arc;

use goals_core::model::{Goal, GoalId, ProgressCounters, StudentId};
use goals_core::progress::GoalsOverview;
use goals_core::query::{QueryKey, QueryResource};
use tracing::{info, warn};

use crate::error::GoalsServiceError;
use crate::query_cache::QueryCache;
use crate::source::GoalSource;

/// Which cached reads a successful delete invalidates besides the goal list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeletePolicy {
    /// Also drop today/week counters. Off by default: the counters do not
    /// depend on which goals exist.
    pub invalidate_progress: bool,
}

/// Cached goal reads and the delete mutation for the goals widget.
pub struct GoalsService {
    source: Arc<dyn GoalSource>,
    goals: QueryCache<Arc<Vec<Goal>>>,
    counters: QueryCache<u64>,
    policy: DeletePolicy,
}

impl GoalsService {
    #[must_use]
    pub fn new(source: Arc<dyn GoalSource>) -> Self {
        Self {
            source,
            goals: QueryCache::new(),
            counters: QueryCache::new(),
            policy: DeletePolicy::default(),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: DeletePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// What a successful delete invalidates. Views use it to decide which
    /// reads to restart.
    #[must_use]
    pub fn policy(&self) -> DeletePolicy {
        self.policy
    }

    /// The student's goals, in source order.
    ///
    /// # Errors
    ///
    /// Returns `GoalsServiceError::Source` if the read fails.
    pub async fn goals(&self, student: StudentId) -> Result<Arc<Vec<Goal>>, GoalsServiceError> {
        let source = Arc::clone(&self.source);
        let goals = self
            .goals
            .fetch(QueryKey::goals(student), || async move {
                source.list_goals(student).await.map(Arc::new)
            })
            .await?;
        Ok(goals)
    }

    /// Problems solved today.
    ///
    /// # Errors
    ///
    /// Returns `GoalsServiceError::Source` if the read fails.
    pub async fn today_progress(&self, student: StudentId) -> Result<u64, GoalsServiceError> {
        let source = Arc::clone(&self.source);
        let count = self
            .counters
            .fetch(QueryKey::today_progress(student), || async move {
                source.today_progress(student).await
            })
            .await?;
        Ok(count)
    }

    /// Problems solved this week.
    ///
    /// # Errors
    ///
    /// Returns `GoalsServiceError::Source` if the read fails.
    pub async fn week_progress(&self, student: StudentId) -> Result<u64, GoalsServiceError> {
        let source = Arc::clone(&self.source);
        let count = self
            .counters
            .fetch(QueryKey::week_progress(student), || async move {
                source.week_progress(student).await
            })
            .await?;
        Ok(count)
    }

    /// Run the three reads concurrently and derive the cards to show.
    ///
    /// A failed counter read counts as zero progress; only a failed goal read
    /// is an error.
    ///
    /// # Errors
    ///
    /// Returns `GoalsServiceError::Source` if the goal list cannot be read.
    pub async fn overview(&self, student: StudentId) -> Result<GoalsOverview, GoalsServiceError> {
        let (goals, today, week) = tokio::join!(
            self.goals(student),
            self.today_progress(student),
            self.week_progress(student),
        );
        let goals = goals?;
        let counters = ProgressCounters::new(
            count_or_zero(QueryKey::today_progress(student), today),
            count_or_zero(QueryKey::week_progress(student), week),
        );
        Ok(GoalsOverview::derive(&goals, counters))
    }

    /// Delete a goal and invalidate the reads it affects.
    ///
    /// Nothing is invalidated when the source rejects the delete.
    ///
    /// # Errors
    ///
    /// Returns `GoalsServiceError::Source` if the source rejects the delete.
    pub async fn delete_goal(
        &self,
        student: StudentId,
        goal: GoalId,
    ) -> Result<(), GoalsServiceError> {
        if let Err(err) = self.source.delete_goal(student, goal).await {
            warn!(%student, %goal, %err, "goal delete failed");
            return Err(err.into());
        }

        info!(%student, %goal, "goal deleted");
        self.invalidate(QueryKey::goals(student));
        if self.policy.invalidate_progress {
            self.invalidate(QueryKey::today_progress(student));
            self.invalidate(QueryKey::week_progress(student));
        }
        Ok(())
    }

    /// Drop every cached read for `student`.
    pub fn refresh(&self, student: StudentId) {
        self.goals.invalidate_student(student);
        self.counters.invalidate_student(student);
    }

    pub fn invalidate(&self, key: QueryKey) {
        match key.resource() {
            QueryResource::Goals => self.goals.invalidate(key),
            QueryResource::TodayProgress | QueryResource::WeekProgress => {
                self.counters.invalidate(key);
            }
        }
    }

    #[must_use]
    pub fn is_cached(&self, key: QueryKey) -> bool {
        match key.resource() {
            QueryResource::Goals => self.goals.contains(key),
            QueryResource::TodayProgress | QueryResource::WeekProgress => {
                self.counters.contains(key)
            }
        }
    }
}

fn count_or_zero(key: QueryKey, result: Result<u64, GoalsServiceError>) -> u64 {
    result.unwrap_or_else(|err| {
        warn!(%key, %err, "progress read failed; showing zero");
        0
    })
}
