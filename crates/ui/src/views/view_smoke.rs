use std::sync::Arc;

use goals_core::model::{Goal, GoalId, GoalKind, ProgressCounters, StudentId};
use goals_core::query::QueryKey;
use services::{DeletePolicy, GoalSource, GoalSourceError, GoalsService, InMemoryGoalSource};
use tokio::sync::Semaphore;

use super::GoalsIntent;
use super::test_harness::{TEST_STUDENT, setup_goals_harness, setup_goals_harness_with_service};

fn source_with(goals: Vec<Goal>, counters: ProgressCounters) -> InMemoryGoalSource {
    let source = InMemoryGoalSource::new();
    source.set_goals(TEST_STUDENT, goals).expect("seed goals");
    source
        .set_counters(TEST_STUDENT, counters)
        .expect("seed counters");
    source
}

#[tokio::test(flavor = "current_thread")]
async fn goals_view_renders_completed_daily_card_only() {
    let source = source_with(
        vec![Goal::new(GoalId::new(1), GoalKind::Daily, 10, 0, "2024-05-01")],
        ProgressCounters::new(10, 0),
    );
    let mut harness = setup_goals_harness(Arc::new(source));

    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Daily Goal"), "missing daily card in {html}");
    assert!(html.contains("Completed"), "missing status in {html}");
    assert!(html.contains("10 / 10 problems"), "missing progress in {html}");
    assert!(html.contains("100%"), "missing percentage in {html}");
    assert!(!html.contains("Weekly Goal"), "unexpected weekly card in {html}");
    assert!(!html.contains("No goals set yet."), "unexpected empty state in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn goals_view_renders_both_tiers() {
    let source = source_with(
        vec![
            Goal::new(GoalId::new(1), GoalKind::Daily, 4, 0, ""),
            Goal::new(GoalId::new(2), GoalKind::Weekly, 20, 0, ""),
        ],
        ProgressCounters::new(3, 5),
    );
    let mut harness = setup_goals_harness(Arc::new(source));

    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Almost There"), "missing daily tier in {html}");
    assert!(html.contains("Just Started"), "missing weekly tier in {html}");
    assert!(html.contains("goal-card-high"), "missing tier class in {html}");
    assert!(html.contains("width: 25%;"), "missing bar width in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn goals_view_renders_empty_state() {
    let source = source_with(Vec::new(), ProgressCounters::default());
    let mut harness = setup_goals_harness(Arc::new(source));

    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("No goals set yet."), "missing empty state in {html}");
    assert!(!html.contains("goal-card "), "unexpected card in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn goals_view_survives_zero_target() {
    let source = source_with(
        vec![Goal::new(GoalId::new(3), GoalKind::Weekly, 0, 0, "")],
        ProgressCounters::new(0, 7),
    );
    let mut harness = setup_goals_harness(Arc::new(source));

    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Weekly Goal"), "missing weekly card in {html}");
    assert!(html.contains("0%"), "missing fallback percentage in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn goals_view_reflects_delete_after_refetch() {
    let source = source_with(
        vec![
            Goal::new(GoalId::new(1), GoalKind::Daily, 10, 0, ""),
            Goal::new(GoalId::new(2), GoalKind::Weekly, 40, 0, ""),
        ],
        ProgressCounters::new(1, 1),
    );
    let mut harness = setup_goals_harness(Arc::new(source.clone()));
    harness.settle().await;
    assert!(harness.render().contains("Daily Goal"));

    let goals = Arc::clone(&harness.goals);
    goals
        .delete_goal(TEST_STUDENT, GoalId::new(1))
        .await
        .expect("delete");
    assert_eq!(source.deleted(), vec![GoalId::new(1)]);
    assert!(!goals.is_cached(QueryKey::goals(TEST_STUDENT)));

    // Remount over the same cache: the invalidated goal list is fetched again.
    let mut harness = setup_goals_harness_with_service(goals);
    harness.settle().await;
    let html = harness.render();
    assert!(!html.contains("Daily Goal"), "deleted goal still shown in {html}");
    assert!(html.contains("Weekly Goal"), "missing weekly card in {html}");
}

fn daily_and_weekly() -> InMemoryGoalSource {
    source_with(
        vec![
            Goal::new(GoalId::new(1), GoalKind::Daily, 10, 0, ""),
            Goal::new(GoalId::new(2), GoalKind::Weekly, 40, 0, ""),
        ],
        ProgressCounters::new(1, 1),
    )
}

#[tokio::test(flavor = "current_thread")]
async fn confirmed_delete_removes_card_and_shows_notice() {
    let source = daily_and_weekly();
    let mut harness = setup_goals_harness(Arc::new(source.clone()));
    harness.settle().await;

    harness.dispatch(GoalsIntent::RequestDelete(GoalId::new(1))).await;
    let html = harness.render();
    assert!(html.contains("Delete goal?"), "missing prompt in {html}");
    assert!(source.deleted().is_empty());

    harness.dispatch(GoalsIntent::ConfirmDelete).await;
    let html = harness.render();
    assert_eq!(source.deleted(), vec![GoalId::new(1)]);
    assert!(html.contains("Goal deleted"), "missing notice in {html}");
    assert!(!html.contains("Delete goal?"), "prompt still open in {html}");
    assert!(!html.contains("Daily Goal"), "deleted goal still shown in {html}");
    assert!(html.contains("Weekly Goal"), "missing weekly card in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn failed_delete_keeps_card_and_shows_error_notice() {
    let source = daily_and_weekly();
    source.fail_deletes(true);
    let mut harness = setup_goals_harness(Arc::new(source.clone()));
    harness.settle().await;

    harness.dispatch(GoalsIntent::RequestDelete(GoalId::new(1))).await;
    harness.dispatch(GoalsIntent::ConfirmDelete).await;
    let html = harness.render();

    assert!(source.deleted().is_empty());
    assert!(html.contains("Failed to delete goal"), "missing notice in {html}");
    assert!(!html.contains("Goal deleted"), "unexpected success in {html}");
    assert!(html.contains("Daily Goal"), "goal should stay listed in {html}");
    assert!(harness.goals.is_cached(QueryKey::goals(TEST_STUDENT)));
}

#[tokio::test(flavor = "current_thread")]
async fn cancelled_prompt_deletes_nothing() {
    let source = daily_and_weekly();
    let mut harness = setup_goals_harness(Arc::new(source.clone()));
    harness.settle().await;

    harness.dispatch(GoalsIntent::RequestDelete(GoalId::new(2))).await;
    harness.dispatch(GoalsIntent::CancelDelete).await;
    let html = harness.render();

    assert!(!html.contains("Delete goal?"), "prompt still open in {html}");
    assert!(source.deleted().is_empty());
    assert!(html.contains("Weekly Goal"), "missing weekly card in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn progress_policy_refreshes_counters_after_delete() {
    let source = daily_and_weekly();
    let service = GoalsService::new(Arc::new(source.clone())).with_policy(DeletePolicy {
        invalidate_progress: true,
    });
    let mut harness = setup_goals_harness_with_service(Arc::new(service));
    harness.settle().await;
    assert!(harness.render().contains("1 / 40 problems"));

    source
        .set_counters(TEST_STUDENT, ProgressCounters::new(1, 8))
        .expect("update counters");
    harness.dispatch(GoalsIntent::RequestDelete(GoalId::new(1))).await;
    harness.dispatch(GoalsIntent::ConfirmDelete).await;
    let html = harness.render();

    assert!(html.contains("8 / 40 problems"), "stale weekly counter in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn default_policy_keeps_cached_counters_after_delete() {
    let source = daily_and_weekly();
    let mut harness = setup_goals_harness(Arc::new(source.clone()));
    harness.settle().await;

    source
        .set_counters(TEST_STUDENT, ProgressCounters::new(1, 8))
        .expect("update counters");
    harness.dispatch(GoalsIntent::RequestDelete(GoalId::new(1))).await;
    harness.dispatch(GoalsIntent::ConfirmDelete).await;
    let html = harness.render();

    assert!(html.contains("1 / 40 problems"), "counter refetched in {html}");
}

/// Holds every delete until the test hands out permits.
struct GatedDeleteSource {
    inner: InMemoryGoalSource,
    gate: Arc<Semaphore>,
}

#[async_trait::async_trait]
impl GoalSource for GatedDeleteSource {
    async fn list_goals(&self, student: StudentId) -> Result<Vec<Goal>, GoalSourceError> {
        self.inner.list_goals(student).await
    }

    async fn today_progress(&self, student: StudentId) -> Result<u64, GoalSourceError> {
        self.inner.today_progress(student).await
    }

    async fn week_progress(&self, student: StudentId) -> Result<u64, GoalSourceError> {
        self.inner.week_progress(student).await
    }

    async fn delete_goal(&self, student: StudentId, goal: GoalId) -> Result<(), GoalSourceError> {
        let permit = self
            .gate
            .acquire()
            .await
            .map_err(|e| GoalSourceError::Unavailable(e.to_string()))?;
        permit.forget();
        self.inner.delete_goal(student, goal).await
    }
}

#[tokio::test(flavor = "current_thread")]
async fn deletes_of_two_goals_can_be_in_flight_together() {
    let inner = daily_and_weekly();
    let gate = Arc::new(Semaphore::new(0));
    let source = GatedDeleteSource {
        inner: inner.clone(),
        gate: Arc::clone(&gate),
    };
    let mut harness = setup_goals_harness(Arc::new(source));
    harness.settle().await;

    harness.dispatch(GoalsIntent::RequestDelete(GoalId::new(1))).await;
    harness.dispatch(GoalsIntent::ConfirmDelete).await;
    let html = harness.render();
    assert_eq!(html.matches("Deleting...").count(), 1, "first delete not pending in {html}");

    harness.dispatch(GoalsIntent::RequestDelete(GoalId::new(2))).await;
    let html = harness.render();
    assert!(html.contains("Delete goal?"), "second prompt did not open in {html}");

    harness.dispatch(GoalsIntent::ConfirmDelete).await;
    let html = harness.render();
    assert_eq!(html.matches("Deleting...").count(), 2, "both deletes should be pending in {html}");

    gate.add_permits(2);
    for _ in 0..4 {
        harness.drive_async().await;
    }
    let html = harness.render();
    assert_eq!(inner.deleted().len(), 2);
    assert!(html.contains("No goals set yet."), "cards still listed in {html}");
    assert_eq!(html.matches("Goal deleted").count(), 2, "missing notices in {html}");
}

struct FailingGoalSource;

#[async_trait::async_trait]
impl GoalSource for FailingGoalSource {
    async fn list_goals(&self, _student: StudentId) -> Result<Vec<Goal>, GoalSourceError> {
        Err(GoalSourceError::Unavailable("fail".to_string()))
    }

    async fn today_progress(&self, _student: StudentId) -> Result<u64, GoalSourceError> {
        Err(GoalSourceError::Unavailable("fail".to_string()))
    }

    async fn week_progress(&self, _student: StudentId) -> Result<u64, GoalSourceError> {
        Err(GoalSourceError::Unavailable("fail".to_string()))
    }

    async fn delete_goal(&self, _student: StudentId, goal: GoalId) -> Result<(), GoalSourceError> {
        Err(GoalSourceError::NotFound(goal))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn goals_view_renders_error_state() {
    let mut harness = setup_goals_harness(Arc::new(FailingGoalSource));

    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Something went wrong"), "missing error in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
}
