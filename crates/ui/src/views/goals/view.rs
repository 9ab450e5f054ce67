use std::sync::Arc;
use std::time::Duration;

use dioxus::prelude::*;
use goals_core::model::{DeleteFlow, Goal, GoalId, ProgressCounters};
use goals_core::progress::GoalsOverview;
use tracing::{debug, warn};

use crate::context::AppContext;
use crate::views::{ViewState, count_or_zero, read_failed, view_state_from_resource};
use crate::vm::{NoticeQueue, map_goal_cards, notice_for_delete};

use super::components::{DeleteGoalModal, EmptyGoals, GoalCard, NoticeStack};

const NOTICE_TTL: Duration = Duration::from_secs(4);

/// User actions on the goals page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GoalsIntent {
    RequestDelete(GoalId),
    CancelDelete,
    ConfirmDelete,
    DismissNotice(u64),
    Retry,
}

#[component]
pub fn GoalsView() -> Element {
    let ctx = use_context::<AppContext>();
    let service = ctx.goals_service();
    let student = ctx.student_id();
    let delete_flow = use_signal(DeleteFlow::default);
    let notices = use_signal(NoticeQueue::default);

    // Three independent reads; each settles on its own.
    let goals_service = Arc::clone(&service);
    let goals = use_resource(move || {
        let service = Arc::clone(&goals_service);
        async move { service.goals(student).await.map_err(read_failed("goals")) }
    });
    let today_service = Arc::clone(&service);
    let today = use_resource(move || {
        let service = Arc::clone(&today_service);
        async move {
            service
                .today_progress(student)
                .await
                .map_err(read_failed("today_progress"))
        }
    });
    let week_service = Arc::clone(&service);
    let week = use_resource(move || {
        let service = Arc::clone(&week_service);
        async move {
            service
                .week_progress(student)
                .await
                .map_err(read_failed("week_progress"))
        }
    });

    let state = view_state_from_resource(&goals);
    let counters = ProgressCounters::new(count_or_zero(&today), count_or_zero(&week));

    let intent_service = Arc::clone(&service);
    let dispatch = use_callback(move |intent: GoalsIntent| {
        let mut delete_flow = delete_flow;
        let mut notices = notices;
        let mut goals = goals;
        let mut today = today;
        let mut week = week;
        match intent {
            GoalsIntent::RequestDelete(goal) => {
                if let Err(err) = delete_flow.write().request(goal) {
                    debug!(%err, "delete request ignored");
                }
            }
            GoalsIntent::CancelDelete => delete_flow.write().cancel(),
            GoalsIntent::ConfirmDelete => {
                let confirmed = delete_flow.write().confirm();
                let goal = match confirmed {
                    Ok(goal) => goal,
                    Err(err) => {
                        debug!(%err, "confirm ignored");
                        return;
                    }
                };
                let service = Arc::clone(&intent_service);
                spawn(async move {
                    let result = service.delete_goal(student, goal).await;
                    if let Err(err) = &result {
                        warn!(%goal, %err, "goal delete failed");
                    }
                    let finished = delete_flow.write().finish(goal, result.is_ok());
                    let outcome = match finished {
                        Ok(outcome) => outcome,
                        Err(err) => {
                            debug!(%err, "delete result dropped");
                            return;
                        }
                    };
                    let (kind, message) = notice_for_delete(outcome);
                    let notice_id = notices.write().push(kind, message);
                    if outcome.is_success() {
                        goals.restart();
                        if service.policy().invalidate_progress {
                            today.restart();
                            week.restart();
                        }
                    }
                    spawn(async move {
                        tokio::time::sleep(NOTICE_TTL).await;
                        notices.write().dismiss(notice_id);
                    });
                });
            }
            GoalsIntent::DismissNotice(id) => notices.write().dismiss(id),
            GoalsIntent::Retry => {
                intent_service.refresh(student);
                goals.restart();
                today.restart();
                week.restart();
            }
        }
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<GoalsTestHandles>() {
                handles.register(dispatch);
            }
        }
    }

    let on_request_delete =
        use_callback(move |goal: GoalId| dispatch.call(GoalsIntent::RequestDelete(goal)));
    let on_cancel_delete = use_callback(move |()| dispatch.call(GoalsIntent::CancelDelete));
    let on_confirm_delete = use_callback(move |()| dispatch.call(GoalsIntent::ConfirmDelete));
    let on_dismiss_notice =
        use_callback(move |id: u64| dispatch.call(GoalsIntent::DismissNotice(id)));

    let flow = delete_flow.read().clone();
    let deleting: Vec<GoalId> = flow.in_flight().collect();
    let visible_notices = notices.read().notices().to_vec();

    rsx! {
        div { class: "page goals-page",
            header { class: "view-header",
                h2 { class: "view-title", "My Goals" }
                p { class: "view-subtitle", "Daily and weekly targets for problems solved." }
            }
            div { class: "view-divider" }

            if !visible_notices.is_empty() {
                NoticeStack { notices: visible_notices, on_dismiss: on_dismiss_notice }
            }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| dispatch.call(GoalsIntent::Retry),
                        "Retry"
                    }
                },
                ViewState::Ready(data) => rsx! {
                    GoalCards {
                        goals: data,
                        counters,
                        deleting,
                        on_delete: on_request_delete,
                    }
                },
            }

            if flow.is_confirming() {
                DeleteGoalModal { on_cancel: on_cancel_delete, on_confirm: on_confirm_delete }
            }
        }
    }
}

#[component]
fn GoalCards(
    goals: Arc<Vec<Goal>>,
    counters: ProgressCounters,
    deleting: Vec<GoalId>,
    on_delete: Callback<GoalId>,
) -> Element {
    let overview = GoalsOverview::derive(&goals, counters);
    if overview.is_empty() {
        return rsx! { EmptyGoals {} };
    }
    let cards = map_goal_cards(&overview).into_iter().map(|card| {
        let key = card.id.to_string();
        let is_deleting = deleting.contains(&card.id);
        rsx! {
            GoalCard { key: "{key}", card, deleting: is_deleting, on_delete }
        }
    });

    rsx! {
        div { class: "goal-cards", {cards} }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct GoalsTestHandles {
    dispatch: std::rc::Rc<std::cell::RefCell<Option<Callback<GoalsIntent>>>>,
}

#[cfg(test)]
impl GoalsTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<GoalsIntent>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
    }

    pub(crate) fn dispatch(&self) -> Callback<GoalsIntent> {
        (*self.dispatch.borrow()).expect("goals dispatch registered")
    }
}
