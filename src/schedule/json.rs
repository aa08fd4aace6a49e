use serde_json::Value;

use crate::foundation::error::{ReelError, ReelResult};
use crate::schedule::raw::{ChannelRecord, RawCategory, RawChannels, RawEvent, RawSchedule};
use crate::schedule::source::ScheduleSource;

/// Adapter for the JSON schedule feed.
///
/// Expected shape: a top-level object whose first key is the date header and whose value maps
/// category names to arrays of event records:
///
/// ```json
/// { "Saturday 25th Oct 2025 - Schedule Time UK GMT": {
///     "Football": [ { "time": "14:00", "event": "A vs B", "channels": [ ... ] } ] } }
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonSource;

/// Keys a channel record may carry its name under, in order of preference.
const CHANNEL_NAME_KEYS: [&str; 3] = ["channel_name", "name", "channel"];

impl JsonSource {
    /// Convert an already-parsed JSON document into raw schedule records.
    pub fn from_value(&self, doc: &Value) -> ReelResult<RawSchedule> {
        let Value::Object(top) = doc else {
            return Err(ReelError::parse("json schedule must be an object"));
        };
        let Some((date_header, days)) = top.iter().next() else {
            return Ok(RawSchedule::default());
        };
        let Value::Object(days) = days else {
            return Err(ReelError::parse(format!(
                "json schedule entry '{date_header}' must map categories to events"
            )));
        };

        let categories = days
            .iter()
            .map(|(name, events)| RawCategory {
                name: name.trim().to_owned(),
                events: match events {
                    Value::Array(items) => items.iter().map(raw_event).collect(),
                    _ => {
                        tracing::debug!(category = name.as_str(), "category value is not a list");
                        Vec::new()
                    }
                },
            })
            .collect();

        Ok(RawSchedule {
            date_header: Some(date_header.clone()),
            categories,
        })
    }
}

impl ScheduleSource for JsonSource {
    fn name(&self) -> &'static str {
        "json"
    }

    fn parse(&self, body: &[u8]) -> ReelResult<RawSchedule> {
        let doc: Value = serde_json::from_slice(body)
            .map_err(|e| ReelError::parse(format!("invalid json schedule: {e}")))?;
        self.from_value(&doc)
    }
}

/// Fields are read individually so extra or conflicting keys never cost the record.
fn raw_event(item: &Value) -> RawEvent {
    let Value::Object(obj) = item else {
        return RawEvent::default();
    };
    RawEvent {
        time: obj.get("time").and_then(scalar_text),
        title: obj
            .get("event")
            .and_then(scalar_text)
            .or_else(|| obj.get("title").and_then(scalar_text)),
        channels: obj.get("channels").map(raw_channels).unwrap_or_default(),
    }
}

fn raw_channels(v: &Value) -> RawChannels {
    match v {
        Value::Array(items) if items.iter().all(Value::is_string) => {
            RawChannels::Names(items.iter().filter_map(scalar_text).collect())
        }
        Value::Array(items) => RawChannels::Records(items.iter().map(channel_record).collect()),
        Value::Object(_) => RawChannels::Single(channel_record(v)),
        _ => RawChannels::default(),
    }
}

fn channel_record(v: &Value) -> ChannelRecord {
    let name = match v {
        Value::Object(obj) => CHANNEL_NAME_KEYS
            .iter()
            .filter_map(|k| obj.get(*k).and_then(scalar_text))
            .find(|n| !n.trim().is_empty()),
        other => scalar_text(other),
    };
    ChannelRecord { name }
}

fn scalar_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/json.rs"]
mod tests;
