use crate::foundation::error::ReelResult;
use crate::schedule::html::HtmlSource;
use crate::schedule::json::JsonSource;
use crate::schedule::raw::RawSchedule;

/// Feed document format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceFormat {
    /// Schedule web page.
    #[default]
    Html,
    /// JSON schedule feed.
    Json,
}

/// Input adapter turning a fetched body into source-agnostic raw records.
///
/// Adapters only fail when the body is not a schedule document at all; individual bad records
/// are passed through for the normalizer to drop.
pub trait ScheduleSource: Send + Sync {
    /// Short adapter name for logs.
    fn name(&self) -> &'static str;
    /// Parse a fetched body.
    fn parse(&self, body: &[u8]) -> ReelResult<RawSchedule>;
}

/// Build the adapter for `format`.
pub fn source_for(format: SourceFormat) -> ReelResult<Box<dyn ScheduleSource>> {
    Ok(match format {
        SourceFormat::Html => Box::new(HtmlSource::new()?),
        SourceFormat::Json => Box::new(JsonSource),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/source.rs"]
mod tests;
