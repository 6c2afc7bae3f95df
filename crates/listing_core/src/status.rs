use std::sync::LazyLock;

use chrono::{DateTime, TimeDelta, Utc};
use regex::Regex;

/// Status category of one listing item, as shown by the host page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    #[default]
    Normal,
    Viewed,
    Applied,
}

/// Derived, per-pass view of one item. Never cached across passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Classification {
    pub status: Status,
    pub recency: Option<DateTime<Utc>>,
}

impl Classification {
    pub fn is_viewed(&self) -> bool {
        self.status == Status::Viewed
    }

    pub fn is_applied(&self) -> bool {
        self.status == Status::Applied
    }
}

static RELATIVE_AGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d+)\s+(minute|hour|day|week)s?\s+ago\b").expect("static pattern")
});

/// Classify an item from its status and time fragments.
///
/// Missing or unrecognised fragments degrade to `Normal` / no recency.
pub fn classify_fragments(
    status_text: Option<&str>,
    time_text: Option<&str>,
    now: DateTime<Utc>,
) -> Classification {
    Classification {
        status: status_text.map(parse_status).unwrap_or_default(),
        recency: time_text.and_then(|text| parse_relative_age(text, now)),
    }
}

/// "viewed" takes precedence over "applied"; anything else is `Normal`.
pub fn parse_status(text: &str) -> Status {
    let normalized = text.trim().to_lowercase();
    if normalized.contains("viewed") {
        Status::Viewed
    } else if normalized.contains("applied") {
        Status::Applied
    } else {
        Status::Normal
    }
}

/// Parse `<n> <unit>[s] ago` into `now - n * unit`.
///
/// Only minutes, hours, days and weeks are understood. Values that do not
/// fit the calendar yield `None`.
pub fn parse_relative_age(text: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let captures = RELATIVE_AGE.captures(text)?;
    let value: i64 = captures.get(1)?.as_str().parse().ok()?;
    let unit = captures.get(2)?.as_str().to_ascii_lowercase();
    let age = match unit.as_str() {
        "minute" => TimeDelta::try_minutes(value)?,
        "hour" => TimeDelta::try_hours(value)?,
        "day" => TimeDelta::try_days(value)?,
        "week" => TimeDelta::try_weeks(value)?,
        _ => return None,
    };
    now.checked_sub_signed(age)
}
