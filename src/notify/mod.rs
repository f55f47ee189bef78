//! Observer glue: how status transitions reach the user.
//!
//! Nothing in here is consulted by the monitor core; these are callback
//! bodies the binary registers. Desktop notifications shell out to
//! `notify-send`, icon names follow the freedesktop theme.

mod desktop;
mod icon;

pub use desktop::DesktopNotifier;
pub use icon::{custom_icon, theme_icon};

use crate::status::Status;

/// Human-readable label for a status, used in the terminal status line
/// and in notification bodies.
pub fn status_line(status: Status) -> &'static str {
    match status {
        Status::Passed => "\u{2713} Passed",
        Status::Failed => "\u{2717} Failed",
        Status::Running => "\u{27f3} Running",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_line_labels() {
        assert_eq!(status_line(Status::Passed), "✓ Passed");
        assert_eq!(status_line(Status::Failed), "✗ Failed");
        assert_eq!(status_line(Status::Running), "⟳ Running");
    }
}
