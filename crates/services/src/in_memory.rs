use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use goals_core::model::{Goal, GoalId, GoalKind, ProgressCounters, StudentId};

use crate::error::GoalSourceError;
use crate::source::GoalSource;

#[derive(Debug, Default)]
struct StudentRecord {
    goals: Vec<Goal>,
    counters: ProgressCounters,
}

/// Process-local `GoalSource` for tests and demo mode.
///
/// Clones share the same data. Call counters let tests observe how often the
/// source was actually hit.
#[derive(Clone, Default)]
pub struct InMemoryGoalSource {
    students: Arc<Mutex<HashMap<StudentId, StudentRecord>>>,
    fail_reads: Arc<AtomicBool>,
    fail_deletes: Arc<AtomicBool>,
    goal_reads: Arc<AtomicUsize>,
    deleted: Arc<Mutex<Vec<GoalId>>>,
}

impl InMemoryGoalSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A source pre-filled with one daily and one weekly goal.
    #[must_use]
    pub fn demo(student: StudentId) -> Self {
        let record = StudentRecord {
            goals: vec![
                Goal::new(GoalId::new(1), GoalKind::Daily, 5, 0, "2024-05-01"),
                Goal::new(GoalId::new(2), GoalKind::Weekly, 30, 0, "2024-04-29"),
            ],
            counters: ProgressCounters::new(4, 12),
        };
        Self {
            students: Arc::new(Mutex::new(HashMap::from([(student, record)]))),
            ..Self::default()
        }
    }

    /// Replace the student's goals.
    ///
    /// # Errors
    ///
    /// Returns `GoalSourceError::Unavailable` if the store lock is poisoned.
    pub fn set_goals(&self, student: StudentId, goals: Vec<Goal>) -> Result<(), GoalSourceError> {
        let mut guard = self
            .students
            .lock()
            .map_err(|e| GoalSourceError::Unavailable(e.to_string()))?;
        guard.entry(student).or_default().goals = goals;
        Ok(())
    }

    /// Replace the student's progress counters.
    ///
    /// # Errors
    ///
    /// Returns `GoalSourceError::Unavailable` if the store lock is poisoned.
    pub fn set_counters(
        &self,
        student: StudentId,
        counters: ProgressCounters,
    ) -> Result<(), GoalSourceError> {
        let mut guard = self
            .students
            .lock()
            .map_err(|e| GoalSourceError::Unavailable(e.to_string()))?;
        guard.entry(student).or_default().counters = counters;
        Ok(())
    }

    /// Make every read fail with `GoalSourceError::Unavailable`.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every delete fail with `GoalSourceError::Unavailable`.
    pub fn fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    /// How many times `list_goals` reached this source.
    #[must_use]
    pub fn goal_reads(&self) -> usize {
        self.goal_reads.load(Ordering::SeqCst)
    }

    /// Goal ids that were successfully deleted, in order.
    #[must_use]
    pub fn deleted(&self) -> Vec<GoalId> {
        self.deleted
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    fn check_reads(&self) -> Result<(), GoalSourceError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(GoalSourceError::Unavailable("reads disabled".into()));
        }
        Ok(())
    }

    fn counters(&self, student: StudentId) -> Result<ProgressCounters, GoalSourceError> {
        self.check_reads()?;
        let guard = self
            .students
            .lock()
            .map_err(|e| GoalSourceError::Unavailable(e.to_string()))?;
        Ok(guard
            .get(&student)
            .map(|record| record.counters)
            .unwrap_or_default())
    }
}

#[async_trait]
impl GoalSource for InMemoryGoalSource {
    async fn list_goals(&self, student: StudentId) -> Result<Vec<Goal>, GoalSourceError> {
        self.goal_reads.fetch_add(1, Ordering::SeqCst);
        self.check_reads()?;
        let guard = self
            .students
            .lock()
            .map_err(|e| GoalSourceError::Unavailable(e.to_string()))?;
        Ok(guard
            .get(&student)
            .map(|record| record.goals.clone())
            .unwrap_or_default())
    }

    async fn today_progress(&self, student: StudentId) -> Result<u64, GoalSourceError> {
        Ok(self.counters(student)?.today)
    }

    async fn week_progress(&self, student: StudentId) -> Result<u64, GoalSourceError> {
        Ok(self.counters(student)?.week)
    }

    async fn delete_goal(&self, student: StudentId, goal: GoalId) -> Result<(), GoalSourceError> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(GoalSourceError::Unavailable("deletes disabled".into()));
        }

        let mut guard = self
            .students
            .lock()
            .map_err(|e| GoalSourceError::Unavailable(e.to_string()))?;
        let record = guard
            .get_mut(&student)
            .ok_or(GoalSourceError::NotFound(goal))?;
        let before = record.goals.len();
        record.goals.retain(|existing| existing.id() != goal);
        if record.goals.len() == before {
            return Err(GoalSourceError::NotFound(goal));
        }
        drop(guard);

        self.deleted
            .lock()
            .map_err(|e| GoalSourceError::Unavailable(e.to_string()))?
            .push(goal);
        Ok(())
    }
}
