use super::*;
use chrono::TimeZone;

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 25, 10, 0, 0).unwrap()
}

#[test]
fn manual_clock_jumps_to_deadline() {
    let clock = ManualClock::new(t0());
    let shutdown = Shutdown::new();
    let deadline = t0() + TimeDelta::minutes(55);

    assert!(clock.sleep_until(deadline, &shutdown));
    assert_eq!(clock.now(), deadline);
    assert_eq!(clock.sleeps(), vec![deadline]);
}

#[test]
fn manual_clock_never_goes_backwards() {
    let clock = ManualClock::new(t0());
    assert!(clock.sleep_until(t0() - TimeDelta::minutes(5), &Shutdown::new()));
    assert_eq!(clock.now(), t0());
    clock.advance(TimeDelta::seconds(30));
    assert_eq!(clock.now(), t0() + TimeDelta::seconds(30));
}

#[test]
fn triggered_shutdown_cancels_sleep() {
    let clock = ManualClock::new(t0());
    let shutdown = Shutdown::new();
    shutdown.trigger();
    assert!(!clock.sleep_until(t0() + TimeDelta::hours(1), &shutdown));
    assert_eq!(clock.now(), t0());
}

#[test]
fn system_clock_wait_is_interrupted_by_another_thread() {
    let shutdown = Shutdown::new();
    let remote = shutdown.clone();
    let waker = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(50));
        remote.trigger();
    });

    let started = std::time::Instant::now();
    let completed = SystemClock.sleep_until(Utc::now() + TimeDelta::hours(1), &shutdown);
    waker.join().unwrap();

    assert!(!completed);
    assert!(started.elapsed() < Duration::from_secs(30));
    assert!(shutdown.is_triggered());
}

#[test]
fn system_clock_returns_immediately_for_past_deadlines() {
    assert!(SystemClock.sleep_until(Utc::now() - TimeDelta::seconds(1), &Shutdown::new()));
}

#[test]
fn wait_timeout_elapses_without_trigger() {
    let shutdown = Shutdown::new();
    assert!(!shutdown.wait_timeout(Duration::from_millis(10)));
}
