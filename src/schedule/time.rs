//! Tolerant date and time-of-day parsing for schedule headers and event rows.

use chrono::{DateTime, LocalResult, NaiveDate, NaiveTime, TimeDelta, TimeZone};
use chrono_tz::Tz;

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Parse the schedule's reference date out of a free-form header.
///
/// Only the part before the first `" - "` is considered, so
/// `"Saturday 25th Oct 2025 - Schedule Time UK GMT"` yields 2025-10-25. Numeric forms
/// (`2025-10-25`, `25/10/2025`, `25.10.2025`) are accepted as well.
pub fn parse_reference_date(header: &str) -> Option<NaiveDate> {
    let head = header.split(" - ").next().unwrap_or(header).trim();
    if head.is_empty() {
        return None;
    }

    for fmt in ["%Y-%m-%d", "%d/%m/%Y", "%d.%m.%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(head, fmt) {
            return Some(d);
        }
    }

    let mut day: Option<u32> = None;
    let mut month: Option<u32> = None;
    let mut year: Option<i32> = None;
    for token in head
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| !t.is_empty())
    {
        let digits_end = token
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(token.len());
        let (digits, rest) = token.split_at(digits_end);

        if !digits.is_empty() {
            let ordinal = matches!(
                rest.to_ascii_lowercase().as_str(),
                "" | "st" | "nd" | "rd" | "th"
            );
            if !ordinal {
                continue;
            }
            if digits.len() == 4 && rest.is_empty() && year.is_none() {
                year = digits.parse().ok();
            } else if digits.len() <= 2 && day.is_none() {
                day = digits.parse().ok();
            }
        } else if month.is_none() {
            month = month_from_name(token);
        }
    }

    NaiveDate::from_ymd_opt(year?, month?, day?)
}

fn month_from_name(token: &str) -> Option<u32> {
    if token.len() < 3 {
        return None;
    }
    let lower = token.to_ascii_lowercase();
    MONTHS
        .iter()
        .position(|m| m.starts_with(lower.as_str()))
        .map(|i| i as u32 + 1)
}

/// Parse a time-of-day such as `15:57`, `9:05`, `15.57`, `21:00:30`, `3:57 PM` or `3pm`.
pub fn parse_time_of_day(s: &str) -> Option<NaiveTime> {
    let compact: String = s
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase()
        .replace("a.m.", "am")
        .replace("p.m.", "pm");
    if compact.is_empty() {
        return None;
    }

    let (body, meridiem) = if let Some(b) = compact.strip_suffix("am") {
        (b, Some(false))
    } else if let Some(b) = compact.strip_suffix("pm") {
        (b, Some(true))
    } else {
        (compact.as_str(), None)
    };

    let parts: Vec<&str> = body.split([':', '.']).collect();
    if parts.iter().any(|p| p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit())) {
        return None;
    }
    let nums: Vec<u32> = parts.iter().map(|p| p.parse().ok()).collect::<Option<_>>()?;

    let (hour, minute, second) = match nums.as_slice() {
        [h] if meridiem.is_some() => (*h, 0, 0),
        [h, m] => (*h, *m, 0),
        [h, m, s] => (*h, *m, *s),
        _ => return None,
    };

    let hour = match meridiem {
        None => hour,
        Some(_) if hour == 0 || hour > 12 => return None,
        Some(false) => hour % 12,
        Some(true) => hour % 12 + 12,
    };

    NaiveTime::from_hms_opt(hour, minute, second)
}

/// Combine a calendar date and time-of-day into an instant in the civil zone `tz`.
///
/// Ambiguous wall-clock times (clocks going back) resolve to the later, standard-time instant.
/// Wall-clock times skipped by a forward jump are read one hour later.
pub fn localize(date: NaiveDate, time: NaiveTime, tz: Tz) -> DateTime<Tz> {
    let naive = date.and_time(time);
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(_, later) => later,
        LocalResult::None => tz
            .from_local_datetime(&(naive + TimeDelta::hours(1)))
            .earliest()
            .unwrap_or_else(|| tz.from_utc_datetime(&naive)),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/time.rs"]
mod tests;
