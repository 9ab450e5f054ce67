use std::sync::Arc;

use goals_core::model::StudentId;
use services::GoalsService;

pub trait UiApp: Send + Sync {
    fn student_id(&self) -> StudentId;

    fn goals_service(&self) -> Arc<GoalsService>;
}

#[derive(Clone)]
pub struct AppContext {
    student_id: StudentId,
    goals: Arc<GoalsService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            student_id: app.student_id(),
            goals: app.goals_service(),
        }
    }

    #[must_use]
    pub fn student_id(&self) -> StudentId {
        self.student_id
    }

    #[must_use]
    pub fn goals_service(&self) -> Arc<GoalsService> {
        Arc::clone(&self.goals)
    }
}

// Provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
