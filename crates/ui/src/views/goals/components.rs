use dioxus::prelude::*;
use goals_core::model::GoalId;

use crate::vm::{GoalCardVm, Notice};

#[component]
pub fn GoalCard(card: GoalCardVm, deleting: bool, on_delete: Callback<GoalId>) -> Element {
    let id = card.id;
    let bar_style = card.bar_style();
    rsx! {
        article { class: card.card_class(),
            header { class: "goal-card-header",
                h3 { class: "goal-card-title", "{card.title}" }
                span { class: "goal-status", "{card.status_label}" }
            }
            p { class: "goal-progress-label", "{card.progress_label}" }
            div { class: "goal-bar",
                div { class: "goal-bar-fill", style: bar_style }
            }
            div { class: "goal-card-footer",
                span { class: "goal-percentage", "{card.percentage_label}" }
                if let Some(date) = card.date_label.clone() {
                    span { class: "goal-date", "{date}" }
                }
                button {
                    class: "btn btn-secondary goal-delete",
                    r#type: "button",
                    disabled: deleting,
                    onclick: move |_| on_delete.call(id),
                    if deleting { "Deleting..." } else { "Delete" }
                }
            }
        }
    }
}

#[component]
pub fn EmptyGoals() -> Element {
    rsx! {
        div { class: "goals-empty",
            p { class: "goals-empty-title", "No goals set yet." }
            p { class: "goals-empty-body",
                "Set a daily or weekly target to start tracking your progress."
            }
        }
    }
}

#[component]
pub fn DeleteGoalModal(on_cancel: Callback<()>, on_confirm: Callback<()>) -> Element {
    rsx! {
        div {
            class: "modal-overlay",
            onclick: move |_| on_cancel.call(()),
            div {
                class: "modal",
                onclick: move |evt| evt.stop_propagation(),
                h3 { class: "modal-title", "Delete goal?" }
                p { class: "modal-body",
                    "This removes the goal. Your solved problems are kept."
                }
                div { class: "modal-actions",
                    button {
                        class: "btn modal-cancel",
                        r#type: "button",
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    button {
                        class: "btn modal-confirm",
                        r#type: "button",
                        onclick: move |_| on_confirm.call(()),
                        "Delete"
                    }
                }
            }
        }
    }
}

#[component]
pub fn NoticeStack(notices: Vec<Notice>, on_dismiss: Callback<u64>) -> Element {
    let items = notices.into_iter().map(|notice| {
        let id = notice.id;
        rsx! {
            div { key: "{id}", class: notice.kind.class(), role: "status",
                span { "{notice.message}" }
                button {
                    class: "notice-dismiss",
                    r#type: "button",
                    onclick: move |_| on_dismiss.call(id),
                    "×"
                }
            }
        }
    });

    rsx! {
        div { class: "notice-stack", {items} }
    }
}
