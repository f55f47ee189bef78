//! Desktop notifications via `notify-send`.

use std::io;
use std::process::Command;

use tracing::warn;

use super::{icon, status_line};
use crate::status::Status;

const NOTIFICATION_TITLE: &str = "Pipeline Monitor";

/// Fires a desktop notification for each status transition.
///
/// Shells out to `notify-send`; a missing binary is logged and ignored
/// so a headless host never kills the poll loop over a notification.
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    repo: String,
}

impl DesktopNotifier {
    /// Create a notifier for the given "owner/repo" slug, which appears
    /// in the notification body.
    pub fn new(repo: &str) -> Self {
        Self {
            repo: repo.to_string(),
        }
    }

    /// Show a notification for the given status.
    pub fn notify(&self, status: Status) -> anyhow::Result<()> {
        let message = format!("{}\n{}", self.repo, status_line(status));
        match Command::new("notify-send")
            .arg("-i")
            .arg(icon::theme_icon(status))
            .arg(NOTIFICATION_TITLE)
            .arg(&message)
            .status()
        {
            Ok(_) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                warn!("notify-send not found, skipping notification");
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }
}
