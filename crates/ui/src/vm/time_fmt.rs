use chrono::{DateTime, NaiveDate};

/// Human-readable goal date. Unparseable values are shown as-is.
#[must_use]
pub fn format_goal_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()));
    Some(date.map_or_else(|| raw.to_owned(), |date| date.format("%b %-d, %Y").to_string()))
}
