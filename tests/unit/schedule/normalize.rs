use super::*;
use crate::schedule::raw::{ChannelRecord, RawCategory, RawChannels, RawEvent};
use chrono::TimeZone;
use proptest::prelude::*;

fn london(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Tz> {
    chrono_tz::Europe::London
        .with_ymd_and_hms(y, mo, d, h, mi, 0)
        .unwrap()
}

fn rec(time: &str, title: &str) -> RawEvent {
    RawEvent {
        time: Some(time.to_owned()),
        title: Some(title.to_owned()),
        channels: RawChannels::default(),
    }
}

fn cat(name: &str, events: Vec<RawEvent>) -> RawCategory {
    RawCategory {
        name: name.to_owned(),
        events,
    }
}

fn scenario() -> RawSchedule {
    RawSchedule {
        date_header: Some("Saturday 25th Oct 2025 - Schedule Time UK GMT".to_owned()),
        categories: vec![
            cat(
                "Football",
                vec![rec("14:00", "Arsenal vs Chelsea"), rec("23:50", "Late Kickoff")],
            ),
            cat(
                "TV Shows – Drama",
                vec![rec("18:00", "Drama Hour"), rec("22:00", "Crime Night")],
            ),
        ],
    }
}

#[test]
fn reference_scenario_keeps_recent_and_future_events() {
    let now = london(2025, 10, 25, 16, 30);
    let out = normalize(&scenario(), now, &NormalizeOptions::default());

    let names: Vec<&str> = out.groups.names().collect();
    assert_eq!(names, vec!["Football"]);
    let football = out.groups.get("Football").unwrap();
    let starts: Vec<DateTime<Tz>> = football.events.iter().map(|e| e.start).collect();
    assert_eq!(
        starts,
        vec![london(2025, 10, 25, 14, 0), london(2025, 10, 25, 23, 50)]
    );
    assert!(!out.report.date_fallback);
    assert_eq!(out.report.excluded_categories, 1);
    assert_eq!(out.report.retained(), 2);
}

#[test]
fn expired_events_are_counted_not_kept() {
    let now = london(2025, 10, 25, 17, 1);
    let out = normalize(&scenario(), now, &NormalizeOptions::default());
    let football = out.groups.get("Football").unwrap();
    assert_eq!(football.events.len(), 1);
    assert_eq!(football.events[0].title, "Late Kickoff");
    assert_eq!(out.report.expired, 1);
}

#[test]
fn excluded_categories_match_any_casing() {
    for name in ["TV Show", "tv shows", "Popular TV SHOWS", "Kids tV ShOw Block"] {
        assert!(is_excluded_category(name), "{name}");
    }
    for name in ["Football", "TV", "Shows", "Tennis Showcase"] {
        assert!(!is_excluded_category(name), "{name}");
    }
}

#[test]
fn malformed_records_are_dropped_and_counted() {
    let raw = RawSchedule {
        date_header: Some("2025-10-25".to_owned()),
        categories: vec![cat(
            "Darts",
            vec![
                rec("19:00", "Final"),
                RawEvent {
                    time: None,
                    title: Some("No time".to_owned()),
                    channels: RawChannels::default(),
                },
                RawEvent {
                    time: Some("20:00".to_owned()),
                    title: Some("   ".to_owned()),
                    channels: RawChannels::default(),
                },
                rec("TBC", "Unknown start"),
            ],
        )],
    };
    let out = normalize(&raw, london(2025, 10, 25, 9, 0), &NormalizeOptions::default());
    assert_eq!(out.groups.event_count(), 1);
    assert_eq!(out.report.dropped_missing_fields, 2);
    assert_eq!(out.report.dropped_bad_time, 1);
    assert_eq!(out.report.records_seen, 4);
    assert_eq!(out.report.dropped_total(), 3);
}

#[test]
fn unreadable_date_falls_back_to_today_in_zone() {
    let raw = RawSchedule {
        date_header: Some("Schedule Time UK GMT".to_owned()),
        categories: vec![cat("Snooker", vec![rec("21:00", "Masters")])],
    };
    let now = london(2025, 11, 3, 10, 0);
    let out = normalize(&raw, now, &NormalizeOptions::default());
    assert!(out.report.date_fallback);
    assert_eq!(
        out.report.reference_date,
        NaiveDate::from_ymd_opt(2025, 11, 3).unwrap()
    );
    assert_eq!(
        out.groups.get("Snooker").unwrap().events[0].start,
        london(2025, 11, 3, 21, 0)
    );
}

#[test]
fn fallback_date_uses_civil_zone_not_utc() {
    // 23:30 UTC on Nov 3 is still Nov 3 in London, but Nov 4 in Tokyo.
    let now = chrono::Utc
        .with_ymd_and_hms(2025, 11, 3, 23, 30, 0)
        .unwrap()
        .with_timezone(&chrono_tz::Asia::Tokyo);
    let (date, fallback) = resolve_reference_date(None, now);
    assert!(fallback);
    assert_eq!(date, NaiveDate::from_ymd_opt(2025, 11, 4).unwrap());
}

#[test]
fn channels_are_canonicalized() {
    let raw = RawSchedule {
        date_header: Some("2025-10-25".to_owned()),
        categories: vec![cat(
            "Cricket",
            vec![RawEvent {
                time: Some("10:00".to_owned()),
                title: Some("Test Match".to_owned()),
                channels: RawChannels::Records(vec![
                    ChannelRecord {
                        name: Some("Sky Cricket".to_owned()),
                    },
                    ChannelRecord {
                        name: Some("Sky Cricket".to_owned()),
                    },
                ]),
            }],
        )],
    };
    let out = normalize(&raw, london(2025, 10, 25, 9, 0), &NormalizeOptions::default());
    let event = &out.groups.get("Cricket").unwrap().events[0];
    assert_eq!(event.channels, vec!["Sky Cricket", "Sky Cricket"]);
}

#[test]
fn unnamed_categories_are_dropped() {
    let raw = RawSchedule {
        date_header: Some("2025-10-25".to_owned()),
        categories: vec![cat("  ", vec![rec("10:00", "Orphan")])],
    };
    let out = normalize(&raw, london(2025, 10, 25, 9, 0), &NormalizeOptions::default());
    assert!(out.groups.is_empty());
    assert_eq!(out.report.dropped_unnamed_category, 1);
}

#[test]
fn empty_input_yields_no_groups() {
    let out = normalize(
        &RawSchedule::default(),
        london(2025, 10, 25, 9, 0),
        &NormalizeOptions::default(),
    );
    assert!(out.groups.is_empty());
    assert!(out.report.date_fallback);
}

#[test]
fn retention_edge_is_inclusive() {
    let start = london(2025, 10, 25, 14, 0);
    let three = TimeDelta::hours(3);
    assert!(is_retained(start, london(2025, 10, 25, 17, 0), three));
    assert!(!is_retained(
        start,
        london(2025, 10, 25, 17, 0) + TimeDelta::seconds(1),
        three
    ));
}

proptest! {
    #[test]
    fn retention_matches_window(start_min in 0i64..2880, offset_secs in -30_000i64..30_000) {
        let base = london(2025, 10, 24, 0, 0);
        let start = base + TimeDelta::minutes(start_min);
        let window = TimeDelta::hours(3);
        let now = start + window + TimeDelta::seconds(offset_secs);
        prop_assert_eq!(is_retained(start, now, window), offset_secs <= 0);
    }
}
