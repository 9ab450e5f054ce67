//! Typed cache keys shared by readers and invalidators.

use std::fmt;

use crate::model::StudentId;

/// Remote read a cache entry holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryResource {
    Goals,
    TodayProgress,
    WeekProgress,
}

impl QueryResource {
    pub const ALL: [QueryResource; 3] = [
        QueryResource::Goals,
        QueryResource::TodayProgress,
        QueryResource::WeekProgress,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            QueryResource::Goals => "goals",
            QueryResource::TodayProgress => "today-progress",
            QueryResource::WeekProgress => "week-progress",
        }
    }
}

/// Cache key: one student, one resource.
///
/// Build keys only through the constructors below so reads and invalidations
/// always agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueryKey {
    student: StudentId,
    resource: QueryResource,
}

impl QueryKey {
    #[must_use]
    pub fn goals(student: StudentId) -> Self {
        Self::new(student, QueryResource::Goals)
    }

    #[must_use]
    pub fn today_progress(student: StudentId) -> Self {
        Self::new(student, QueryResource::TodayProgress)
    }

    #[must_use]
    pub fn week_progress(student: StudentId) -> Self {
        Self::new(student, QueryResource::WeekProgress)
    }

    /// Every key belonging to `student`.
    pub fn all_for(student: StudentId) -> impl Iterator<Item = QueryKey> {
        QueryResource::ALL
            .into_iter()
            .map(move |resource| Self::new(student, resource))
    }

    fn new(student: StudentId, resource: QueryResource) -> Self {
        Self { student, resource }
    }

    #[must_use]
    pub fn student(&self) -> StudentId {
        self.student
    }

    #[must_use]
    pub fn resource(&self) -> QueryResource {
        self.resource
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "student/{}/{}", self.student, self.resource.as_str())
    }
}
