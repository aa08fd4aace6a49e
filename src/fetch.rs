//! Retrieval of the raw schedule document.

use std::path::PathBuf;
use std::time::Duration;

use crate::foundation::error::{ReelError, ReelResult};

/// One schedule download.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchRequest {
    /// `http(s)://` URL, `file://` URL or bare filesystem path.
    pub url: String,
    /// Value of the `Referer` header, if any.
    pub referer: Option<String>,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
    /// Whole-request timeout.
    pub timeout: Duration,
}

/// Source of raw schedule bytes.
pub trait Fetcher: Send + Sync {
    /// Fetch the body for `req`. Any transport failure or non-success status is a
    /// [`ReelError::Fetch`].
    fn fetch(&self, req: &FetchRequest) -> ReelResult<Vec<u8>>;
}

/// Blocking HTTP client.
#[derive(Debug, Default)]
pub struct HttpFetcher;

impl Fetcher for HttpFetcher {
    #[tracing::instrument(skip_all, fields(url = %req.url))]
    fn fetch(&self, req: &FetchRequest) -> ReelResult<Vec<u8>> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(req.user_agent.clone())
            .timeout(req.timeout)
            .build()
            .map_err(|e| ReelError::fetch(format!("failed to build http client: {e}")))?;

        let mut request = client.get(&req.url);
        if let Some(referer) = &req.referer {
            request = request.header(reqwest::header::REFERER, referer);
        }
        let response = request
            .send()
            .map_err(|e| ReelError::fetch(format!("request to '{}' failed: {e}", req.url)))?
            .error_for_status()
            .map_err(|e| ReelError::fetch(format!("'{}' returned an error status: {e}", req.url)))?;

        let body = response
            .bytes()
            .map_err(|e| ReelError::fetch(format!("failed to read body of '{}': {e}", req.url)))?;
        tracing::info!(bytes = body.len(), "fetched schedule");
        Ok(body.to_vec())
    }
}

/// Reads the schedule from the local filesystem.
#[derive(Debug, Default)]
pub struct FileFetcher;

impl FileFetcher {
    fn path_of(url: &str) -> PathBuf {
        PathBuf::from(url.strip_prefix("file://").unwrap_or(url))
    }
}

impl Fetcher for FileFetcher {
    fn fetch(&self, req: &FetchRequest) -> ReelResult<Vec<u8>> {
        let path = Self::path_of(&req.url);
        let body = std::fs::read(&path)
            .map_err(|e| ReelError::fetch(format!("failed to read '{}': {e}", path.display())))?;
        tracing::info!(path = %path.display(), bytes = body.len(), "read schedule file");
        Ok(body)
    }
}

/// Pick the fetcher matching the scheme of `url`.
pub fn fetcher_for(url: &str) -> Box<dyn Fetcher> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Box::new(HttpFetcher)
    } else {
        Box::new(FileFetcher)
    }
}

#[cfg(test)]
#[path = "../tests/unit/fetch.rs"]
mod tests;
