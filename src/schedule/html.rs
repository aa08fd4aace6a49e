use scraper::{ElementRef, Html, Selector};

use crate::foundation::error::{ReelError, ReelResult};
use crate::schedule::raw::{RawCategory, RawChannels, RawEvent, RawSchedule};
use crate::schedule::source::ScheduleSource;

const DAY_TITLE: &str = "div.schedule__dayTitle";
const CATEGORY: &str = "div.schedule__category";
const CATEGORY_HEADER: &str = "div.schedule__catHeader";
const CATEGORY_NAME: &str = "div.card__meta";
const EVENT: &str = "div.schedule__event";
const EVENT_TIME: &str = "span.schedule__time";
const EVENT_TITLE: &str = "span.schedule__eventTitle";
const CHANNELS: &str = "div.schedule__channels";
const CHANNEL_LINK: &str = "a";

/// Adapter for the HTML schedule page.
pub struct HtmlSource {
    day_title: Selector,
    category: Selector,
    category_header: Selector,
    category_name: Selector,
    event: Selector,
    event_time: Selector,
    event_title: Selector,
    channels: Selector,
    channel_link: Selector,
}

impl HtmlSource {
    /// Compile the schedule page selectors.
    pub fn new() -> ReelResult<Self> {
        Ok(Self {
            day_title: selector(DAY_TITLE)?,
            category: selector(CATEGORY)?,
            category_header: selector(CATEGORY_HEADER)?,
            category_name: selector(CATEGORY_NAME)?,
            event: selector(EVENT)?,
            event_time: selector(EVENT_TIME)?,
            event_title: selector(EVENT_TITLE)?,
            channels: selector(CHANNELS)?,
            channel_link: selector(CHANNEL_LINK)?,
        })
    }

    /// Parse an HTML document into raw schedule records.
    pub fn parse_document(&self, html: &str) -> RawSchedule {
        let doc = Html::parse_document(html);

        let date_header = doc.select(&self.day_title).next().map(element_text);

        let categories: Vec<RawCategory> = doc
            .select(&self.category)
            .map(|block| self.parse_category(block))
            .collect();
        if categories.is_empty() {
            tracing::warn!("html document contains no schedule category blocks");
        }

        RawSchedule {
            date_header,
            categories,
        }
    }

    fn parse_category(&self, block: ElementRef<'_>) -> RawCategory {
        let name = block
            .select(&self.category_header)
            .next()
            .and_then(|header| header.select(&self.category_name).next())
            .map(element_text)
            .unwrap_or_default();

        let events = block
            .select(&self.event)
            .map(|ev| RawEvent {
                time: ev.select(&self.event_time).next().map(element_text),
                title: ev.select(&self.event_title).next().map(element_text),
                channels: RawChannels::Names(
                    ev.select(&self.channels)
                        .next()
                        .map(|c| c.select(&self.channel_link).map(element_text).collect())
                        .unwrap_or_default(),
                ),
            })
            .collect();

        RawCategory { name, events }
    }
}

impl ScheduleSource for HtmlSource {
    fn name(&self) -> &'static str {
        "html"
    }

    fn parse(&self, body: &[u8]) -> ReelResult<RawSchedule> {
        Ok(self.parse_document(&String::from_utf8_lossy(body)))
    }
}

fn selector(css: &str) -> ReelResult<Selector> {
    Selector::parse(css)
        .map_err(|e| ReelError::validation(format!("invalid css selector {css:?}: {e:?}")))
}

/// Text content with runs of whitespace collapsed to single spaces.
fn element_text(el: ElementRef<'_>) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/html.rs"]
mod tests;
