use super::*;

const FEED: &str = r#"{
  "Saturday 25th Oct 2025 - Schedule Time UK GMT": {
    "Football": [
      { "time": "14:00", "event": "Arsenal vs Chelsea",
        "channels": [ { "channel_name": "Sky Sports 1", "channel_id": "1" } ] },
      { "time": "16:30", "title": "Derby", "channels": ["BBC One", "BBC Two"] },
      { "time": "18:00", "event": "Single", "channels": { "channel_name": "ESPN" } },
      { "event": "No time" },
      "garbage"
    ],
    "Tennis": { "not": "a list" }
  },
  "Sunday 26th Oct 2025": {}
}"#;

#[test]
fn first_key_is_date_header() {
    let raw = JsonSource.parse(FEED.as_bytes()).unwrap();
    assert_eq!(
        raw.date_header.as_deref(),
        Some("Saturday 25th Oct 2025 - Schedule Time UK GMT")
    );
    let names: Vec<&str> = raw.categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Football", "Tennis"]);
    assert!(raw.categories[1].events.is_empty());
}

#[test]
fn channel_shapes_and_title_aliases() {
    let raw = JsonSource.parse(FEED.as_bytes()).unwrap();
    let events = &raw.categories[0].events;
    assert_eq!(events.len(), 5);
    assert_eq!(events[0].channels.clone().into_names(), vec!["Sky Sports 1"]);
    assert_eq!(events[1].title.as_deref(), Some("Derby"));
    assert_eq!(
        events[1].channels.clone().into_names(),
        vec!["BBC One", "BBC Two"]
    );
    assert_eq!(events[2].channels.clone().into_names(), vec!["ESPN"]);
    assert_eq!(events[3].time, None);
    assert_eq!(events[4], RawEvent::default());
}

#[test]
fn malformed_channels_do_not_drop_the_record() {
    let raw = JsonSource
        .parse(br#"{"2025-10-25": {"Golf": [{"time": "09:00", "event": "Open", "channels": 7}]}}"#)
        .unwrap();
    let ev = &raw.categories[0].events[0];
    assert_eq!(ev.title.as_deref(), Some("Open"));
    assert!(ev.channels.clone().into_names().is_empty());
}

#[test]
fn non_object_documents_are_parse_errors() {
    assert!(matches!(
        JsonSource.parse(b"[1, 2, 3]"),
        Err(ReelError::Parse(_))
    ));
    assert!(matches!(
        JsonSource.parse(b"{not json"),
        Err(ReelError::Parse(_))
    ));
    assert!(matches!(
        JsonSource.parse(br#"{"2025-10-25": 5}"#),
        Err(ReelError::Parse(_))
    ));
}

#[test]
fn empty_object_is_an_empty_schedule() {
    let raw = JsonSource.parse(b"{}").unwrap();
    assert_eq!(raw, RawSchedule::default());
}

#[test]
fn event_key_wins_when_title_is_also_present() {
    let raw = JsonSource
        .parse(
            br#"{"2025-10-25": {"Football": [
                {"time": "20:00", "event": "A vs B", "title": "A vs B (alt)", "channels": ["S1"]},
                {"time": "21:00", "event": null, "title": "C vs D"}
            ]}}"#,
        )
        .unwrap();
    let events = &raw.categories[0].events;
    assert_eq!(events[0].time.as_deref(), Some("20:00"));
    assert_eq!(events[0].title.as_deref(), Some("A vs B"));
    assert_eq!(events[0].channels.clone().into_names(), vec!["S1"]);
    assert_eq!(events[1].title.as_deref(), Some("C vs D"));
}

#[test]
fn bad_channel_elements_drop_only_themselves() {
    let raw = JsonSource
        .parse(
            br#"{"2025-10-25": {"Football": [
                {"time": "20:00", "event": "A", "channels": [
                    {"channel_name": "S2", "name": "S2b"},
                    {"channel_id": "9"},
                    {"name": "S3"},
                    null
                ]},
                {"time": "21:00", "event": "B", "channels": ["S4", 5, false, " "]},
                {"time": "22:00", "event": "C", "channels": {"channel": "S6", "channel_id": "6"}}
            ]}}"#,
        )
        .unwrap();
    let events = &raw.categories[0].events;
    assert_eq!(events[0].channels.clone().into_names(), vec!["S2", "S3"]);
    assert_eq!(events[1].channels.clone().into_names(), vec!["S4", "5"]);
    assert_eq!(events[2].channels.clone().into_names(), vec!["S6"]);
}
