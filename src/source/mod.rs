//! Status source abstraction.
//!
//! This module provides a trait-based abstraction for answering "what is
//! the pipeline status right now" from various backends - the GitHub
//! Actions REST API, a local JSON file, or an in-memory channel.

mod channel;
mod file;
mod github;

pub use channel::ChannelSource;
pub use file::FileSource;
pub use github::GitHubSource;

use thiserror::Error;

use crate::status::Status;

/// Errors that can occur while querying a status source.
///
/// A source must fail loudly rather than return a stale or invented
/// status. The one non-error special case is "provider has no runs yet",
/// which maps to [`Status::Running`] by contract.
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP request failed (network, TLS, non-2xx other than auth).
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Authentication was rejected by the provider.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Response body could not be parsed.
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// The provider reported an outcome outside the mapped set
    /// (e.g. "cancelled", "skipped"). Surfaced instead of guessed.
    #[error("unmapped run conclusion: {0:?}")]
    UnknownConclusion(String),

    /// Reading a file-based source failed.
    #[error("failed to read status file: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SourceError::Timeout
        } else if err.is_decode() {
            SourceError::Parse(err.to_string())
        } else {
            SourceError::Http(err.to_string())
        }
    }
}

/// Trait for answering the current pipeline status.
///
/// Implementations query one backend and map its most recent run to a
/// [`Status`]. Any transient resources (an HTTP response, a file handle)
/// live only for the duration of one call.
///
/// # Example
///
/// ```no_run
/// use pipewatch::{FileSource, StatusSource};
///
/// let mut source = FileSource::new("status.json");
/// let status = source.current_status()?;
/// println!("pipeline is {status}");
/// # Ok::<(), pipewatch::SourceError>(())
/// ```
pub trait StatusSource {
    /// Query the backend once and return the current status.
    ///
    /// "No runs yet" is a valid `Running` result; anything the backend
    /// cannot answer truthfully is an error.
    fn current_status(&mut self) -> Result<Status, SourceError>;

    /// Returns a human-readable description of the source.
    ///
    /// Used in log lines and the startup banner.
    fn description(&self) -> &str;
}
