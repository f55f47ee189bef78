//! Status to icon mapping.

use std::path::{Path, PathBuf};

use crate::status::Status;

/// Freedesktop theme icon name for a status.
pub fn theme_icon(status: Status) -> &'static str {
    match status {
        Status::Passed => "dialog-ok",
        Status::Failed => "dialog-error",
        Status::Running => "dialog-warning",
    }
}

/// Path to a bundled SVG icon for a status, under `icons_dir`.
pub fn custom_icon(status: Status, icons_dir: &Path) -> PathBuf {
    let file = match status {
        Status::Passed => "pipeline-green.svg",
        Status::Failed => "pipeline-red.svg",
        Status::Running => "pipeline-yellow.svg",
    };
    icons_dir.join(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_icons() {
        assert_eq!(theme_icon(Status::Passed), "dialog-ok");
        assert_eq!(theme_icon(Status::Failed), "dialog-error");
        assert_eq!(theme_icon(Status::Running), "dialog-warning");
    }

    #[test]
    fn test_custom_icons() {
        let dir = Path::new("/opt/pipewatch/icons");
        assert_eq!(
            custom_icon(Status::Failed, dir),
            dir.join("pipeline-red.svg")
        );
        assert_eq!(
            custom_icon(Status::Running, dir),
            dir.join("pipeline-yellow.svg")
        );
    }
}
