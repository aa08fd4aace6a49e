//! Source-agnostic raw schedule records, as handed over by the HTML/JSON adapters.
//!
//! Nothing in here is validated yet. The normalizer decides which records survive.

/// One parsed schedule document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawSchedule {
    /// Date-bearing header string, e.g. `"Saturday 25th Oct 2025 - Schedule Time UK GMT"`.
    pub date_header: Option<String>,
    /// Category blocks in document order.
    pub categories: Vec<RawCategory>,
}

impl RawSchedule {
    /// Total number of raw event records across all categories.
    pub fn record_count(&self) -> usize {
        self.categories.iter().map(|c| c.events.len()).sum()
    }
}

/// One category block with its display name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawCategory {
    /// Display name; empty when the source block carried no readable header.
    pub name: String,
    /// Event records in document order.
    pub events: Vec<RawEvent>,
}

/// One event record. Any field may be missing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawEvent {
    /// Time-of-day string as found in the source.
    pub time: Option<String>,
    /// Event title.
    pub title: Option<String>,
    /// Channel field in whichever shape the source used.
    pub channels: RawChannels,
}

/// The three channel-list shapes seen in the wild.
#[derive(Clone, Debug, PartialEq)]
pub enum RawChannels {
    /// `["Sky Sports 1", "BBC One"]`
    Names(Vec<String>),
    /// `[{"channel_name": "Sky Sports 1"}, ...]`
    Records(Vec<ChannelRecord>),
    /// `{"channel_name": "Sky Sports 1"}`
    Single(ChannelRecord),
}

impl Default for RawChannels {
    fn default() -> Self {
        Self::Names(Vec::new())
    }
}

/// A channel record carrying a name field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChannelRecord {
    /// Channel display name.
    pub name: Option<String>,
}

impl RawChannels {
    /// Canonical channel list: trimmed, non-empty names in source order, duplicates kept.
    pub fn into_names(self) -> Vec<String> {
        let names: Vec<String> = match self {
            Self::Names(v) => v,
            Self::Records(v) => v.into_iter().filter_map(|r| r.name).collect(),
            Self::Single(r) => r.name.into_iter().collect(),
        };
        names
            .into_iter()
            .map(|n| n.trim().to_owned())
            .filter(|n| !n.is_empty())
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/raw.rs"]
mod tests;
