use super::*;

#[test]
fn all_channel_shapes_normalize_to_names() {
    let names = RawChannels::Names(vec!["A".into(), " B ".into(), "".into(), "A".into()]);
    assert_eq!(names.into_names(), vec!["A", "B", "A"]);

    let records = RawChannels::Records(vec![
        ChannelRecord {
            name: Some("Sky".into()),
        },
        ChannelRecord { name: None },
        ChannelRecord {
            name: Some("BBC".into()),
        },
    ]);
    assert_eq!(records.into_names(), vec!["Sky", "BBC"]);

    let single = RawChannels::Single(ChannelRecord {
        name: Some("ESPN".into()),
    });
    assert_eq!(single.into_names(), vec!["ESPN"]);
}

#[test]
fn record_count_sums_categories() {
    let raw = RawSchedule {
        date_header: None,
        categories: vec![
            RawCategory {
                name: "A".into(),
                events: vec![RawEvent::default(), RawEvent::default()],
            },
            RawCategory {
                name: "B".into(),
                events: vec![RawEvent::default()],
            },
        ],
    };
    assert_eq!(raw.record_count(), 3);
}
