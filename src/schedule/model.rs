use chrono::DateTime;
use chrono_tz::Tz;
use std::collections::HashMap;

/// One canonical schedule entry.
///
/// `start` always carries the cycle's reference date combined with the parsed time-of-day, in the
/// configured civil zone. `category` is never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    /// Display name of the category the event was listed under.
    pub category: String,
    /// Localized start instant.
    pub start: DateTime<Tz>,
    /// Event title.
    pub title: String,
    /// Channels in source order, duplicates kept; may be empty.
    pub channels: Vec<String>,
}

/// Events sharing one category display name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryGroup {
    /// Raw display name used as the grouping key.
    pub name: String,
    /// Events sorted by `start` ascending.
    pub events: Vec<Event>,
}

/// Ordered mapping from category name to its events.
///
/// Built from events already sorted by `(lowercased category, start)`; groups appear in
/// first-seen order under that sort. Names differing only by case stay separate groups.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryGroups {
    groups: Vec<CategoryGroup>,
}

impl CategoryGroups {
    /// Sort `events` by `(lowercased category, start)` and group them by raw category name.
    pub fn from_events(mut events: Vec<Event>) -> Self {
        events.sort_by_cached_key(|e| (e.category.to_lowercase(), e.start));

        let mut groups: Vec<CategoryGroup> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        for event in events {
            let slot = *index.entry(event.category.clone()).or_insert_with(|| {
                groups.push(CategoryGroup {
                    name: event.category.clone(),
                    events: Vec::new(),
                });
                groups.len() - 1
            });
            groups[slot].events.push(event);
        }
        Self { groups }
    }

    /// Groups in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, CategoryGroup> {
        self.groups.iter()
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// `true` when no event survived normalization.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of events across all groups.
    pub fn event_count(&self) -> usize {
        self.groups.iter().map(|g| g.events.len()).sum()
    }

    /// Look a group up by its exact display name.
    pub fn get(&self, name: &str) -> Option<&CategoryGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Category names in display order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.name.as_str())
    }
}

impl<'a> IntoIterator for &'a CategoryGroups {
    type Item = &'a CategoryGroup;
    type IntoIter = std::slice::Iter<'a, CategoryGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/model.rs"]
mod tests;
