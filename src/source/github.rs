//! GitHub Actions status source.
//!
//! Queries the workflow runs endpoint for a repository and maps the most
//! recent run to a [`Status`]. Only the first entry is consulted; older
//! runs are ignored.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;

use super::{SourceError, StatusSource};
use crate::status::Status;

const API_BASE: &str = "https://api.github.com";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = concat!("pipewatch/", env!("CARGO_PKG_VERSION"));

/// Response shape of the workflow runs endpoint, reduced to the fields
/// this source reads.
#[derive(Debug, Deserialize)]
struct RunsResponse {
    #[serde(default)]
    workflow_runs: Vec<WorkflowRun>,
}

/// One workflow run. `conclusion` is null while the run is in progress.
#[derive(Debug, Deserialize)]
struct WorkflowRun {
    conclusion: Option<String>,
}

/// A status source backed by the GitHub Actions REST API.
///
/// Holds a long-lived HTTP client; each query owns its response only for
/// the duration of one call.
#[derive(Debug)]
pub struct GitHubSource {
    url: String,
    token: String,
    client: Client,
    description: String,
}

impl GitHubSource {
    /// Create a source for `owner/repo`, authenticating with `token`.
    pub fn new(owner: &str, repo: &str, token: &str) -> Result<Self, SourceError> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            url: format!("{API_BASE}/repos/{owner}/{repo}/actions/runs?per_page=1"),
            token: token.to_string(),
            client,
            description: format!("github: {owner}/{repo}"),
        })
    }

    /// Map a runs response to a status.
    ///
    /// No runs at all defaults to `Running` - the repository simply has
    /// nothing to report yet. A conclusion outside the mapped set is an
    /// error, never a silent fallthrough.
    fn map_runs(response: &RunsResponse) -> Result<Status, SourceError> {
        let Some(run) = response.workflow_runs.first() else {
            return Ok(Status::Running);
        };
        match run.conclusion.as_deref() {
            None => Ok(Status::Running),
            Some("success") => Ok(Status::Passed),
            Some("failure") => Ok(Status::Failed),
            Some(other) => Err(SourceError::UnknownConclusion(other.to_string())),
        }
    }
}

impl StatusSource for GitHubSource {
    fn current_status(&mut self) -> Result<Status, SourceError> {
        let response = self
            .client
            .get(&self.url)
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .send()?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(SourceError::Auth(format!("HTTP {}", status.as_u16())));
        }
        if !status.is_success() {
            return Err(SourceError::Http(format!(
                "HTTP {} - {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown error")
            )));
        }

        let runs: RunsResponse = response
            .json()
            .map_err(|e| SourceError::Parse(e.to_string()))?;
        Self::map_runs(&runs)
    }

    fn description(&self) -> &str {
        &self.description
    }
}
