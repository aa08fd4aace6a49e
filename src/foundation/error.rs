/// Convenience result type used across schedreel.
pub type ReelResult<T> = Result<T, ReelError>;

/// Top-level error taxonomy for one generation cycle.
///
/// Record-level problems (a missing time, an unparseable title row) are never surfaced as errors;
/// the normalizer drops and counts them. Every variant here aborts the cycle it occurs in while the
/// previously published file stays in place.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// Invalid configuration or arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// Network failure, timeout or non-success HTTP status while fetching the feed.
    #[error("fetch error: {0}")]
    Fetch(String),

    /// The fetched body is not a schedule document at all.
    #[error("parse error: {0}")]
    Parse(String),

    /// Text layout or rasterization failure.
    #[error("render error: {0}")]
    Render(String),

    /// Video/audio encoder failure.
    #[error("encode error: {0}")]
    Encode(String),

    /// Failure while replacing the published file.
    #[error("publish error: {0}")]
    Publish(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ReelError::Fetch`] value.
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    /// Build a [`ReelError::Parse`] value.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Build a [`ReelError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`ReelError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`ReelError::Publish`] value.
    pub fn publish(msg: impl Into<String>) -> Self {
        Self::Publish(msg.into())
    }

    /// Stable stage name used when reporting an aborted cycle.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Validation(_) => "config",
            Self::Fetch(_) => "fetch",
            Self::Parse(_) => "parse",
            Self::Render(_) => "render",
            Self::Encode(_) => "encode",
            Self::Publish(_) => "publish",
            Self::Other(_) => "other",
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
