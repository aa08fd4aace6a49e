//! Schedule ingestion: raw records, source adapters and the event normalizer.

/// Schedule web page adapter.
pub mod html;
/// JSON feed adapter.
pub mod json;
/// Canonical events and category groups.
pub mod model;
/// Raw records to filtered, grouped events.
pub mod normalize;
pub mod raw;
/// Adapter trait and format selection.
pub mod source;
pub mod time;
