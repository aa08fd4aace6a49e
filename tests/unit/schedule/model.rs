use super::*;
use chrono::TimeZone;

fn ev(category: &str, hour: u32, minute: u32, title: &str) -> Event {
    Event {
        category: category.to_owned(),
        start: chrono_tz::Europe::London
            .with_ymd_and_hms(2025, 10, 25, hour, minute, 0)
            .unwrap(),
        title: title.to_owned(),
        channels: Vec::new(),
    }
}

#[test]
fn groups_sort_case_insensitively_then_by_start() {
    let groups = CategoryGroups::from_events(vec![
        ev("tennis", 9, 0, "t1"),
        ev("Football", 20, 0, "f2"),
        ev("Basketball", 18, 0, "b1"),
        ev("Football", 14, 0, "f1"),
    ]);
    let names: Vec<&str> = groups.names().collect();
    assert_eq!(names, vec!["Basketball", "Football", "tennis"]);

    let football = groups.get("Football").unwrap();
    let titles: Vec<&str> = football.events.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["f1", "f2"]);
    assert_eq!(groups.event_count(), 4);
}

#[test]
fn case_variants_stay_separate_groups() {
    let groups = CategoryGroups::from_events(vec![
        ev("football", 15, 0, "late-lower"),
        ev("Football", 12, 0, "early-upper"),
        ev("football", 10, 0, "earliest-lower"),
    ]);
    // Sorting puts "earliest-lower" first, so "football" is seen first.
    let names: Vec<&str> = groups.names().collect();
    assert_eq!(names, vec!["football", "Football"]);
    assert_eq!(groups.get("football").unwrap().events.len(), 2);
    assert_eq!(groups.get("Football").unwrap().events.len(), 1);
}

#[test]
fn events_within_group_are_non_decreasing() {
    let groups = CategoryGroups::from_events(vec![
        ev("Rugby", 23, 50, "c"),
        ev("Rugby", 1, 0, "a"),
        ev("Rugby", 13, 0, "b"),
        ev("Rugby", 13, 0, "b2"),
    ]);
    for group in &groups {
        assert!(group.events.windows(2).all(|w| w[0].start <= w[1].start));
    }
    // Equal starts keep input order.
    let titles: Vec<&str> = groups.get("Rugby").unwrap().events.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["a", "b", "b2", "c"]);
}

#[test]
fn empty_input_gives_empty_groups() {
    let groups = CategoryGroups::from_events(Vec::new());
    assert!(groups.is_empty());
    assert_eq!(groups.len(), 0);
    assert_eq!(groups.event_count(), 0);
}
