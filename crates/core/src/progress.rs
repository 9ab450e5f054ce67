//! Percentage completion and status tiers for goals.
//!
//! Everything here is pure: the same goals and counters always produce the
//! same overview.

use crate::model::{Goal, GoalKind, ProgressCounters};

/// Human-facing completion status, derived only from the percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgressStatus {
    JustStarted,
    InProgress,
    AlmostThere,
    Completed,
}

impl ProgressStatus {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ProgressStatus::JustStarted => "Just Started",
            ProgressStatus::InProgress => "In Progress",
            ProgressStatus::AlmostThere => "Almost There",
            ProgressStatus::Completed => "Completed",
        }
    }
}

/// Presentation tier for the same thresholds. Styling is left to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgressTier {
    Low,
    Mid,
    High,
    Complete,
}

impl ProgressTier {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ProgressTier::Low => "low",
            ProgressTier::Mid => "mid",
            ProgressTier::High => "high",
            ProgressTier::Complete => "complete",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub percentage: u8,
    pub status: ProgressStatus,
    pub tier: ProgressTier,
}

/// Rounded completion in `0..=100`.
///
/// Rounds half away from zero and clamps over-achievement to 100. A target
/// of zero or below has no meaningful ratio and yields 0.
#[must_use]
pub fn percentage(progress: u64, target: i64) -> u8 {
    let Ok(target) = u64::try_from(target) else {
        return 0;
    };
    if target == 0 {
        return 0;
    }
    let scaled = u128::from(progress) * 200 + u128::from(target);
    let rounded = scaled / (u128::from(target) * 2);
    // Clamped to 100 just above, so the cast cannot truncate.
    rounded.min(100) as u8
}

/// Thresholds are checked from the top down.
#[must_use]
pub fn status_for(percentage: u8) -> (ProgressStatus, ProgressTier) {
    if percentage >= 100 {
        (ProgressStatus::Completed, ProgressTier::Complete)
    } else if percentage >= 75 {
        (ProgressStatus::AlmostThere, ProgressTier::High)
    } else if percentage >= 50 {
        (ProgressStatus::InProgress, ProgressTier::Mid)
    } else {
        (ProgressStatus::JustStarted, ProgressTier::Low)
    }
}

#[must_use]
pub fn classify(progress: u64, target: i64) -> Classification {
    let percentage = percentage(progress, target);
    let (status, tier) = status_for(percentage);
    Classification {
        percentage,
        status,
        tier,
    }
}

/// At most one goal per kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GoalSelection<'a> {
    pub daily: Option<&'a Goal>,
    pub weekly: Option<&'a Goal>,
}

/// Pick the first goal of each kind, in the order the source returned them.
#[must_use]
pub fn select_goals(goals: &[Goal]) -> GoalSelection<'_> {
    GoalSelection {
        daily: goals.iter().find(|goal| goal.kind() == GoalKind::Daily),
        weekly: goals.iter().find(|goal| goal.kind() == GoalKind::Weekly),
    }
}

/// A selected goal paired with the live counter for its period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalProgress {
    pub goal: Goal,
    pub progress: u64,
    pub classification: Classification,
}

impl GoalProgress {
    #[must_use]
    pub fn new(goal: Goal, progress: u64) -> Self {
        let classification = classify(progress, goal.target());
        Self {
            goal,
            progress,
            classification,
        }
    }
}

/// Everything the goals widget renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalsOverview {
    pub daily: Option<GoalProgress>,
    pub weekly: Option<GoalProgress>,
}

impl GoalsOverview {
    #[must_use]
    pub fn derive(goals: &[Goal], counters: ProgressCounters) -> Self {
        let selection = select_goals(goals);
        Self {
            daily: selection
                .daily
                .map(|goal| GoalProgress::new(goal.clone(), counters.today)),
            weekly: selection
                .weekly
                .map(|goal| GoalProgress::new(goal.clone(), counters.week)),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.daily.is_none() && self.weekly.is_none()
    }

    /// Present cards, daily first.
    pub fn cards(&self) -> impl Iterator<Item = &GoalProgress> {
        self.daily.iter().chain(self.weekly.iter())
    }
}
