use super::*;
use chrono::Utc;
use chrono_tz::Tz;

fn london(s: &str) -> DateTime<Tz> {
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .unwrap()
        .and_local_timezone(chrono_tz::Europe::London)
        .earliest()
        .unwrap()
}

#[test]
fn hourly_trigger_waits_for_the_configured_minute() {
    let p = TriggerPolicy::HourlyAt { minute: 55 };
    assert_eq!(
        p.next_after(&london("2025-10-25 10:20:13")),
        london("2025-10-25 10:55:00")
    );
}

#[test]
fn hourly_trigger_fires_now_when_exactly_on_time() {
    let p = TriggerPolicy::HourlyAt { minute: 55 };
    let now = london("2025-10-25 10:55:00");
    assert_eq!(p.next_after(&now), now);
}

#[test]
fn hourly_trigger_rolls_to_next_hour_once_passed() {
    let p = TriggerPolicy::HourlyAt { minute: 55 };
    assert_eq!(
        p.next_after(&london("2025-10-25 10:55:01")),
        london("2025-10-25 11:55:00")
    );
    assert_eq!(
        p.next_after(&london("2025-10-25 23:58:00")),
        london("2025-10-26 00:55:00")
    );
}

#[test]
fn hourly_trigger_uses_local_minutes_in_half_hour_zones() {
    let p = TriggerPolicy::HourlyAt { minute: 55 };
    let kolkata = chrono_tz::Asia::Kolkata;
    let now = Utc.with_ymd_and_hms(2025, 10, 25, 5, 0, 0).unwrap().with_timezone(&kolkata);
    // 05:00 UTC is 10:30 IST.
    let next = p.next_after(&now);
    assert_eq!((next.hour(), next.minute()), (10, 55));
}

#[test]
fn hourly_trigger_crosses_dst_end() {
    // 2025-10-26 01:58 BST; the next local 01:55 is the repeated hour in GMT.
    let p = TriggerPolicy::HourlyAt { minute: 55 };
    let now = Utc.with_ymd_and_hms(2025, 10, 26, 0, 58, 0).unwrap();
    let next = p.next_after(&now.with_timezone(&chrono_tz::Europe::London));
    assert_eq!(next.with_timezone(&Utc), Utc.with_ymd_and_hms(2025, 10, 26, 1, 55, 0).unwrap());
}

#[test]
fn interval_trigger_adds_the_pause() {
    let p = TriggerPolicy::Interval { secs: 600 };
    assert_eq!(
        p.next_after(&london("2025-10-25 10:20:00")),
        london("2025-10-25 10:30:00")
    );
}

#[test]
fn validation_rejects_out_of_range_values() {
    assert!(TriggerPolicy::HourlyAt { minute: 60 }.validate().is_err());
    assert!(TriggerPolicy::Interval { secs: 0 }.validate().is_err());
    assert!(TriggerPolicy::default().validate().is_ok());
}

#[test]
fn policies_deserialize_from_tagged_json() {
    let p: TriggerPolicy = serde_json::from_str(r#"{"kind":"hourly_at","minute":50}"#).unwrap();
    assert_eq!(p, TriggerPolicy::HourlyAt { minute: 50 });
    let p: TriggerPolicy = serde_json::from_str(r#"{"kind":"interval","secs":3600}"#).unwrap();
    assert_eq!(p, TriggerPolicy::Interval { secs: 3600 });
}
