use std::collections::BTreeSet;

use thiserror::Error;

use crate::model::GoalId;

/// Where the confirm-then-delete interaction currently stands.
///
/// At most one prompt is open at a time. Confirmed deletes are tracked per
/// goal, so deletes of different goals run independently.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteFlow {
    confirming: Option<GoalId>,
    in_flight: BTreeSet<GoalId>,
}

/// Result of a finished delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(GoalId),
    Failed(GoalId),
}

impl DeleteOutcome {
    #[must_use]
    pub fn goal_id(self) -> GoalId {
        match self {
            DeleteOutcome::Deleted(id) | DeleteOutcome::Failed(id) => id,
        }
    }

    #[must_use]
    pub fn is_success(self) -> bool {
        matches!(self, DeleteOutcome::Deleted(_))
    }
}

impl DeleteFlow {
    /// The goal the open prompt refers to, if any.
    #[must_use]
    pub fn prompt(&self) -> Option<GoalId> {
        self.confirming
    }

    #[must_use]
    pub fn is_confirming(&self) -> bool {
        self.confirming.is_some()
    }

    #[must_use]
    pub fn is_deleting(&self, goal: GoalId) -> bool {
        self.in_flight.contains(&goal)
    }

    /// Goals whose delete request has been sent but not answered.
    pub fn in_flight(&self) -> impl Iterator<Item = GoalId> + '_ {
        self.in_flight.iter().copied()
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.confirming.is_none() && self.in_flight.is_empty()
    }

    /// Open the confirmation prompt for `goal`.
    ///
    /// Re-requesting while a prompt is open retargets it.
    ///
    /// # Errors
    ///
    /// Returns `DeleteFlowError::Busy` while a delete of the same goal is in
    /// flight.
    pub fn request(&mut self, goal: GoalId) -> Result<(), DeleteFlowError> {
        if self.in_flight.contains(&goal) {
            return Err(DeleteFlowError::Busy(goal));
        }
        self.confirming = Some(goal);
        Ok(())
    }

    /// Close the prompt without deleting. In-flight deletes are unaffected.
    pub fn cancel(&mut self) {
        self.confirming = None;
    }

    /// Accept the prompt and return the goal to delete.
    ///
    /// # Errors
    ///
    /// Returns `DeleteFlowError::NotConfirming` unless a prompt is open.
    pub fn confirm(&mut self) -> Result<GoalId, DeleteFlowError> {
        let goal = self.confirming.take().ok_or(DeleteFlowError::NotConfirming)?;
        self.in_flight.insert(goal);
        Ok(goal)
    }

    /// Record the result of the in-flight request for `goal`.
    ///
    /// # Errors
    ///
    /// Returns `DeleteFlowError::NotDeleting` when no request for `goal` is in
    /// flight.
    pub fn finish(&mut self, goal: GoalId, succeeded: bool) -> Result<DeleteOutcome, DeleteFlowError> {
        if !self.in_flight.remove(&goal) {
            return Err(DeleteFlowError::NotDeleting(goal));
        }
        Ok(if succeeded {
            DeleteOutcome::Deleted(goal)
        } else {
            DeleteOutcome::Failed(goal)
        })
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeleteFlowError {
    #[error("delete of goal {0} is still in flight")]
    Busy(GoalId),
    #[error("no delete is awaiting confirmation")]
    NotConfirming,
    #[error("no delete of goal {0} is in flight")]
    NotDeleting(GoalId),
}
