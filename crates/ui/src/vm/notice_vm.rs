use goals_core::model::DeleteOutcome;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            NoticeKind::Success => "notice notice-success",
            NoticeKind::Error => "notice notice-error",
        }
    }
}

/// A transient message shown above the goal cards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub message: String,
}

/// Visible notices, oldest first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NoticeQueue {
    next_id: u64,
    notices: Vec<Notice>,
}

impl NoticeQueue {
    pub const MAX_VISIBLE: usize = 3;

    /// Add a notice and return its id. The oldest notice is dropped once
    /// more than `MAX_VISIBLE` are shown.
    pub fn push(&mut self, kind: NoticeKind, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.notices.push(Notice {
            id,
            kind,
            message: message.into(),
        });
        if self.notices.len() > Self::MAX_VISIBLE {
            let overflow = self.notices.len() - Self::MAX_VISIBLE;
            self.notices.drain(..overflow);
        }
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.notices.retain(|notice| notice.id != id);
    }

    #[must_use]
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}

#[must_use]
pub fn notice_for_delete(outcome: DeleteOutcome) -> (NoticeKind, &'static str) {
    match outcome {
        DeleteOutcome::Deleted(_) => (NoticeKind::Success, "Goal deleted"),
        DeleteOutcome::Failed(_) => (NoticeKind::Error, "Failed to delete goal"),
    }
}
