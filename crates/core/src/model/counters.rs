/// Live problem counts for the current day and week.
///
/// These are reported independently of `Goal::current`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressCounters {
    pub today: u64,
    pub week: u64,
}

impl ProgressCounters {
    #[must_use]
    pub fn new(today: u64, week: u64) -> Self {
        Self { today, week }
    }
}
