use chrono::{DateTime, TimeDelta, TimeZone, Timelike};

use crate::foundation::error::{ReelError, ReelResult};

const MAX_INTERVAL_SECS: u64 = 366 * 24 * 3600;

/// When the next generation cycle starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TriggerPolicy {
    /// Every hour at `minute:00` local time, ahead of the swap at the top of the hour.
    HourlyAt {
        /// Minute past the hour, `0..60`.
        minute: u32,
    },
    /// A fixed pause after each completed cycle.
    Interval {
        /// Seconds between cycles, `> 0`.
        secs: u64,
    },
}

impl Default for TriggerPolicy {
    fn default() -> Self {
        Self::HourlyAt { minute: 55 }
    }
}

impl TriggerPolicy {
    /// Check the policy parameters.
    pub fn validate(&self) -> ReelResult<()> {
        match *self {
            Self::HourlyAt { minute } if minute >= 60 => Err(ReelError::validation(format!(
                "trigger minute must be in 0..60, got {minute}"
            ))),
            Self::Interval { secs } if secs == 0 || secs > MAX_INTERVAL_SECS => {
                Err(ReelError::validation(format!(
                    "trigger interval must be in 1..={MAX_INTERVAL_SECS} seconds, got {secs}"
                )))
            }
            _ => Ok(()),
        }
    }

    /// The first trigger instant at or after `now`.
    ///
    /// Hourly triggers are computed from the local minute and second of `now`, so zones with
    /// non-hour offsets and DST changes keep firing at the configured local minute.
    pub fn next_after<Z: TimeZone>(&self, now: &DateTime<Z>) -> DateTime<Z> {
        match *self {
            Self::HourlyAt { minute } => {
                let into_hour = TimeDelta::seconds(i64::from(now.minute() * 60 + now.second()))
                    + TimeDelta::nanoseconds(i64::from(now.nanosecond() % 1_000_000_000));
                let candidate =
                    now.clone() - into_hour + TimeDelta::minutes(i64::from(minute));
                if candidate < *now {
                    candidate + TimeDelta::hours(1)
                } else {
                    candidate
                }
            }
            Self::Interval { secs } => {
                now.clone() + TimeDelta::seconds(secs.min(MAX_INTERVAL_SECS) as i64)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scheduler/trigger.rs"]
mod tests;
