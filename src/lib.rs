//! # pipewatch
//!
//! A CI pipeline status watcher. Polls a provider's most recent workflow
//! run on an interval, detects transitions among a small fixed set of
//! pipeline states, and fans each transition out to registered observers
//! (terminal status line, desktop notifier, log).
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                         Binary                           │
//! │  ┌──────────┐ tick ┌─────────┐ on change ┌────────────┐  │
//! │  │ poll loop│─────▶│ Monitor │──────────▶│ callbacks  │  │
//! │  │ (sleep)  │      │ (state) │           │ (notify)   │  │
//! │  └──────────┘      └────┬────┘           └────────────┘  │
//! │                         │ current_status()               │
//! │                         ▼                                │
//! │                    ┌─────────┐                           │
//! │                    │ source  │◀── GitHubSource           │
//! │                    │ (trait) │    | FileSource           │
//! │                    └─────────┘    | ChannelSource        │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`monitor`]**: the poll/compare/notify state machine. Remembers
//!   the last observed status and notifies callbacks at most once per
//!   transition; the very first poll always notifies.
//! - **[`source`]**: status source abstraction ([`StatusSource`] trait)
//!   with GitHub Actions, JSON-file, and watch-channel implementations.
//! - **[`status`]**: the closed [`Status`] enum and its string tags.
//! - **[`settings`]**: persisted JSON configuration (glue).
//! - **[`notify`]**: observer glue - desktop notifications and icon
//!   mapping.
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Watch the repository configured in config.json
//! pipewatch --config config.json
//!
//! # Single poll, useful in scripts
//! pipewatch --once
//! ```
//!
//! ### As a library
//!
//! ```
//! use pipewatch::{ChannelSource, Monitor, Status};
//! use std::time::Duration;
//!
//! let (tx, source) = ChannelSource::create(Status::Running, "embedded");
//! let mut monitor = Monitor::new(Box::new(source), Duration::from_secs(120));
//! monitor.on_status_change(|status| {
//!     println!("pipeline is now {status}");
//!     Ok(())
//! });
//! monitor.poll_once().unwrap();
//! ```

pub mod monitor;
pub mod notify;
pub mod settings;
pub mod source;
pub mod status;

// Re-export main types for convenience
pub use monitor::{Monitor, PollError, StatusCallback};
pub use notify::DesktopNotifier;
pub use settings::{Settings, SettingsError};
pub use source::{ChannelSource, FileSource, GitHubSource, SourceError, StatusSource};
pub use status::Status;
