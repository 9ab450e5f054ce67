use goals_core::model::{GoalId, GoalKind};
use goals_core::progress::{GoalProgress, GoalsOverview};

use crate::vm::time_fmt::format_goal_date;

/// UI-ready representation of one goal card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GoalCardVm {
    pub id: GoalId,
    pub title: &'static str,
    pub progress_label: String,
    pub percentage: u8,
    pub percentage_label: String,
    pub status_label: &'static str,
    pub tier: &'static str,
    pub date_label: Option<String>,
}

impl GoalCardVm {
    /// Inline width for the progress bar fill.
    #[must_use]
    pub fn bar_style(&self) -> String {
        format!("width: {}%;", self.percentage)
    }

    #[must_use]
    pub fn card_class(&self) -> String {
        format!("goal-card goal-card-{}", self.tier)
    }
}

impl From<&GoalProgress> for GoalCardVm {
    fn from(item: &GoalProgress) -> Self {
        let classification = item.classification;
        Self {
            id: item.goal.id(),
            title: goal_title(item.goal.kind()),
            progress_label: format!("{} / {} problems", item.progress, item.goal.target()),
            percentage: classification.percentage,
            percentage_label: format!("{}%", classification.percentage),
            status_label: classification.status.label(),
            tier: classification.tier.as_str(),
            date_label: format_goal_date(item.goal.date()),
        }
    }
}

fn goal_title(kind: GoalKind) -> &'static str {
    match kind {
        GoalKind::Daily => "Daily Goal",
        GoalKind::Weekly => "Weekly Goal",
    }
}

/// Cards in display order: daily, then weekly.
#[must_use]
pub fn map_goal_cards(overview: &GoalsOverview) -> Vec<GoalCardVm> {
    overview.cards().map(GoalCardVm::from).collect()
}
