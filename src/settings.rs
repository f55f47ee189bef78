//! Persisted configuration.
//!
//! Settings live in a small JSON file owned by the glue layer. The core
//! monitor never reads configuration; the binary translates Settings
//! into a status source and a poll interval.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shortest supported poll cadence.
pub const MIN_POLL_INTERVAL_SECS: u64 = 30;
/// Longest supported poll cadence.
pub const MAX_POLL_INTERVAL_SECS: u64 = 600;

/// Errors from loading or saving settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid repo url {url:?}: expected \"owner/repo\"")]
    InvalidRepoUrl { url: String },
}

/// Persisted application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Repository to watch, as an "owner/repo" slug.
    pub github_repo_url: String,

    /// Static bearer token passed through to the provider.
    pub api_token: String,

    /// Poll cadence in seconds.
    pub poll_interval_seconds: u64,

    /// Whether to fire desktop notifications on transitions.
    /// Absent in older config files, so it defaults to enabled.
    #[serde(default = "default_enable_notifications")]
    pub enable_notifications: bool,
}

fn default_enable_notifications() -> bool {
    true
}

impl Settings {
    /// Load settings from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Save settings as pretty-printed JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SettingsError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(|source| SettingsError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        fs::write(path, json).map_err(|source| SettingsError::Write {
            path: path.display().to_string(),
            source,
        })
    }

    /// Split the repo url into `(owner, repo)`.
    pub fn repo_slug(&self) -> Result<(&str, &str), SettingsError> {
        match self.github_repo_url.split('/').collect::<Vec<_>>()[..] {
            [owner, repo] if !owner.is_empty() && !repo.is_empty() => Ok((owner, repo)),
            _ => Err(SettingsError::InvalidRepoUrl {
                url: self.github_repo_url.clone(),
            }),
        }
    }

    /// The poll interval clamped to the supported range.
    pub fn clamped_interval(&self) -> Duration {
        Duration::from_secs(
            self.poll_interval_seconds
                .clamp(MIN_POLL_INTERVAL_SECS, MAX_POLL_INTERVAL_SECS),
        )
    }
}
