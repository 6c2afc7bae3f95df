use chrono::{TimeDelta, TimeZone, Utc};
use listing_core::{classify_fragments, parse_relative_age, Status};

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 4, 9, 30, 0).unwrap()
}

#[test]
fn padded_mixed_case_viewed_is_viewed() {
    let classification = classify_fragments(Some(" Viewed "), None, now());
    assert_eq!(classification.status, Status::Viewed);
    assert_eq!(classification.recency, None);
}

#[test]
fn missing_fragments_degrade_to_normal_without_recency() {
    let classification = classify_fragments(None, None, now());
    assert_eq!(classification.status, Status::Normal);
    assert_eq!(classification.recency, None);
}

#[test]
fn applied_status_and_recency_are_derived_together() {
    let classification = classify_fragments(Some("Applied 2d"), Some("2 hours ago"), now());
    assert_eq!(classification.status, Status::Applied);
    assert_eq!(classification.recency, Some(now() - TimeDelta::hours(2)));
}

#[test]
fn one_week_is_exactly_seven_days_of_seconds() {
    let parsed = parse_relative_age("1 week ago", now()).unwrap();
    assert_eq!(now() - parsed, TimeDelta::seconds(7 * 24 * 3600));
}

#[test]
fn minutes_and_hours_use_their_own_units() {
    let minutes = parse_relative_age("59 minutes ago", now()).unwrap();
    let hour = parse_relative_age("1 hour ago", now()).unwrap();

    assert_eq!(now() - minutes, TimeDelta::seconds(59 * 60));
    assert_eq!(now() - hour, TimeDelta::seconds(3600));
    assert_ne!(minutes, hour);
    assert!(hour < minutes);
}

#[test]
fn units_are_case_insensitive_and_plural_is_optional() {
    assert_eq!(
        parse_relative_age("1 Day ago", now()),
        parse_relative_age("1 DAYS AGO", now())
    );
    assert_eq!(
        parse_relative_age("3 Minutes Ago", now()),
        Some(now() - TimeDelta::minutes(3))
    );
}

#[test]
fn malformed_time_text_yields_no_recency() {
    for text in ["", "yesterday", "about an hour ago", "2 fortnights ago"] {
        let classification = classify_fragments(Some("Promoted"), Some(text), now());
        assert_eq!(classification.recency, None, "{text:?}");
        assert_eq!(classification.status, Status::Normal);
    }
}
