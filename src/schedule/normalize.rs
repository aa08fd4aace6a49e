use chrono::{DateTime, NaiveDate, TimeDelta};
use chrono_tz::Tz;

use crate::schedule::model::{CategoryGroups, Event};
use crate::schedule::raw::RawSchedule;
use crate::schedule::time::{localize, parse_reference_date, parse_time_of_day};

/// Inputs that stay fixed for one normalization pass.
#[derive(Clone, Copy, Debug)]
pub struct NormalizeOptions {
    /// Civil zone every time-of-day is localized into.
    pub time_zone: Tz,
    /// How long an event stays listed after its start.
    pub retention: TimeDelta,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            time_zone: chrono_tz::Europe::London,
            retention: TimeDelta::hours(3),
        }
    }
}

/// Counters describing what happened to the raw records.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalizeReport {
    /// Date every event was combined with.
    pub reference_date: NaiveDate,
    /// `true` when the header could not be parsed and today's date was used.
    pub date_fallback: bool,
    /// Raw records seen across all categories, excluded ones included.
    pub records_seen: usize,
    /// Records that became events.
    pub parsed: usize,
    /// Records lacking a time or a title.
    pub dropped_missing_fields: usize,
    /// Records whose time-of-day did not parse.
    pub dropped_bad_time: usize,
    /// Records inside categories without a readable name.
    pub dropped_unnamed_category: usize,
    /// Categories removed by the TV-show exclusion.
    pub excluded_categories: usize,
    /// Events older than the retention window.
    pub expired: usize,
}

impl NormalizeReport {
    /// Total records that did not make it into the grouped output.
    pub fn dropped_total(&self) -> usize {
        self.records_seen - self.retained()
    }

    /// Events that survived every filter.
    pub fn retained(&self) -> usize {
        self.parsed - self.expired
    }
}

/// Output of [`normalize`].
#[derive(Clone, Debug)]
pub struct Normalized {
    /// Surviving events, grouped and ordered.
    pub groups: CategoryGroups,
    /// What was dropped and why.
    pub report: NormalizeReport,
}

/// `true` when a category is a TV-show listing that must not appear in the output.
pub fn is_excluded_category(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower.contains("tv show") || lower.contains("tv shows")
}

/// `true` while `now` is still inside the retention window of an event starting at `start`.
///
/// The boundary is inclusive: an event is still shown at exactly `start + retention`.
pub fn is_retained(start: DateTime<Tz>, now: DateTime<Tz>, retention: TimeDelta) -> bool {
    start + retention >= now
}

/// Resolve the reference date from the header, falling back to `now`'s civil date.
pub fn resolve_reference_date(header: Option<&str>, now: DateTime<Tz>) -> (NaiveDate, bool) {
    match header.and_then(parse_reference_date) {
        Some(date) => (date, false),
        None => {
            let today = now.date_naive();
            tracing::warn!(
                header = header.unwrap_or("<missing>"),
                %today,
                "could not parse schedule date; assuming today"
            );
            (today, true)
        }
    }
}

/// Turn raw records into canonical, filtered, grouped events.
///
/// Never fails: malformed records are dropped and counted in the report. `now` is the single
/// instant the retention window is evaluated against for the whole pass.
#[tracing::instrument(skip_all, fields(categories = raw.categories.len()))]
pub fn normalize(raw: &RawSchedule, now: DateTime<Tz>, opts: &NormalizeOptions) -> Normalized {
    let now = now.with_timezone(&opts.time_zone);
    let (reference_date, date_fallback) =
        resolve_reference_date(raw.date_header.as_deref(), now);

    let mut report = NormalizeReport {
        reference_date,
        date_fallback,
        records_seen: raw.record_count(),
        parsed: 0,
        dropped_missing_fields: 0,
        dropped_bad_time: 0,
        dropped_unnamed_category: 0,
        excluded_categories: 0,
        expired: 0,
    };

    let mut events = Vec::new();
    for category in &raw.categories {
        let name = category.name.trim();
        if name.is_empty() {
            report.dropped_unnamed_category += category.events.len();
            continue;
        }
        if is_excluded_category(name) {
            tracing::debug!(category = name, "skipping excluded category");
            report.excluded_categories += 1;
            continue;
        }

        for record in &category.events {
            let time = record.time.as_deref().map(str::trim).filter(|s| !s.is_empty());
            let title = record.title.as_deref().map(str::trim).filter(|s| !s.is_empty());
            let (Some(time), Some(title)) = (time, title) else {
                report.dropped_missing_fields += 1;
                continue;
            };
            let Some(tod) = parse_time_of_day(time) else {
                tracing::debug!(time, title, "unparseable event time; dropping record");
                report.dropped_bad_time += 1;
                continue;
            };

            report.parsed += 1;
            events.push(Event {
                category: name.to_owned(),
                start: localize(reference_date, tod, opts.time_zone),
                title: title.to_owned(),
                channels: record.channels.clone().into_names(),
            });
        }
    }

    let before = events.len();
    events.retain(|e| is_retained(e.start, now, opts.retention));
    report.expired = before - events.len();

    let groups = CategoryGroups::from_events(events);
    tracing::info!(
        reference_date = %report.reference_date,
        kept = report.retained(),
        dropped = report.dropped_total(),
        missing_fields = report.dropped_missing_fields,
        bad_time = report.dropped_bad_time,
        expired = report.expired,
        excluded_categories = report.excluded_categories,
        "normalized schedule"
    );

    Normalized { groups, report }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/normalize.rs"]
mod tests;
