mod goal_vm;
mod notice_vm;
mod time_fmt;

pub use goal_vm::{GoalCardVm, map_goal_cards};
pub use notice_vm::{Notice, NoticeKind, NoticeQueue, notice_for_delete};
