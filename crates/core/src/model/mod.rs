mod counters;
mod delete_flow;
mod goal;
mod ids;

pub use counters::ProgressCounters;
pub use delete_flow::{DeleteFlow, DeleteFlowError, DeleteOutcome};
pub use goal::{Goal, GoalError, GoalKind};
pub use ids::{GoalId, ParseIdError, StudentId};
