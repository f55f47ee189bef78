//! Pipeline status values.
//!
//! A pipeline is always in exactly one of three semantic states. The
//! lowercase string tags are the stable external representation, used in
//! the file-source payload and in notification bodies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The semantic state of a CI pipeline.
///
/// `Running` doubles as the default for "provider has no runs yet" —
/// a deliberate source-side policy, not an error. Provider outcomes
/// outside this set (cancelled, skipped, ...) are surfaced as a
/// [`SourceError`](crate::source::SourceError) instead of being mapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// A run is in progress, or no runs exist yet.
    Running,
    /// The most recent run concluded successfully.
    Passed,
    /// The most recent run concluded unsuccessfully.
    Failed,
}

impl Status {
    /// Returns the stable lowercase tag for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Running => "running",
            Status::Passed => "passed",
            Status::Failed => "failed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the known status tags.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown status tag: {0:?}")]
pub struct UnknownStatus(pub String);

impl FromStr for Status {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "running" => Ok(Status::Running),
            "passed" => Ok(Status::Passed),
            "failed" => Ok(Status::Failed),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}
