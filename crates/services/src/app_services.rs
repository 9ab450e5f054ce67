use std::sync::Arc;

use goals_core::model::StudentId;

use crate::goals_service::{DeletePolicy, GoalsService};
use crate::http_source::{GoalsApiConfig, HttpGoalSource};
use crate::in_memory::InMemoryGoalSource;
use crate::source::GoalSource;

/// Where goal data comes from.
#[derive(Clone, Debug)]
pub enum GoalBackend {
    Http(GoalsApiConfig),
    /// Seeded in-process data; no network.
    Demo,
}

/// Assembles app-facing services for one student.
#[derive(Clone)]
pub struct AppServices {
    student_id: StudentId,
    goals: Arc<GoalsService>,
}

impl AppServices {
    #[must_use]
    pub fn new(backend: GoalBackend, student_id: StudentId, policy: DeletePolicy) -> Self {
        let source: Arc<dyn GoalSource> = match backend {
            GoalBackend::Http(config) => Arc::new(HttpGoalSource::new(config)),
            GoalBackend::Demo => Arc::new(InMemoryGoalSource::demo(student_id)),
        };
        Self::with_source(source, student_id, policy)
    }

    #[must_use]
    pub fn with_source(
        source: Arc<dyn GoalSource>,
        student_id: StudentId,
        policy: DeletePolicy,
    ) -> Self {
        Self {
            student_id,
            goals: Arc::new(GoalsService::new(source).with_policy(policy)),
        }
    }

    #[must_use]
    pub fn student_id(&self) -> StudentId {
        self.student_id
    }

    #[must_use]
    pub fn goals(&self) -> Arc<GoalsService> {
        Arc::clone(&self.goals)
    }
}
