// Binary includes library modules - some public API items are only for library consumers
#![allow(unused)]

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod monitor;
mod notify;
mod settings;
mod source;
mod status;

use monitor::Monitor;
use notify::DesktopNotifier;
use settings::Settings;
use source::{FileSource, GitHubSource, StatusSource};

/// Fallback cadence for file mode, where no config file supplies one.
const DEFAULT_POLL_INTERVAL_SECS: u64 = 120;

#[derive(Parser, Debug)]
#[command(name = "pipewatch")]
#[command(about = "CI pipeline status watcher with desktop notifications")]
struct Args {
    /// Path to the config file (GitHub mode)
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// Watch a local JSON status file instead of GitHub
    #[arg(short, long, conflicts_with = "config")]
    file: Option<PathBuf>,

    /// Poll interval in seconds (overrides the configured value)
    #[arg(short, long)]
    interval: Option<u64>,

    /// Poll once and exit; non-zero exit on error
    #[arg(long)]
    once: bool,

    /// Suppress desktop notifications
    #[arg(long)]
    no_notify: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    // File mode: no config file involved
    if let Some(ref path) = args.file {
        let interval =
            Duration::from_secs(args.interval.unwrap_or(DEFAULT_POLL_INTERVAL_SECS));
        let source = Box::new(FileSource::new(path));
        let notifier = (!args.no_notify).then(|| DesktopNotifier::new(&path.display().to_string()));
        return run(Monitor::new(source, interval), notifier, args.once);
    }

    // GitHub mode: settings file is required
    if !args.config.exists() {
        eprintln!("Config file not found: {}", args.config.display());
        eprintln!("Please create {} with:", args.config.display());
        eprintln!("{{");
        eprintln!("  \"github_repo_url\": \"owner/repo\",");
        eprintln!("  \"api_token\": \"your_github_token\",");
        eprintln!("  \"poll_interval_seconds\": 120");
        eprintln!("}}");
        bail!("missing config file");
    }

    let settings = Settings::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    info!("loaded settings from {}", args.config.display());

    let (owner, repo) = settings.repo_slug()?;
    let source = Box::new(GitHubSource::new(owner, repo, &settings.api_token)?);

    let interval = match args.interval {
        Some(secs) => Duration::from_secs(secs),
        None => settings.clamped_interval(),
    };

    let notifier = (settings.enable_notifications && !args.no_notify)
        .then(|| DesktopNotifier::new(&settings.github_repo_url));

    run(Monitor::new(source, interval), notifier, args.once)
}

/// Register observers and drive the monitor.
fn run(mut monitor: Monitor, notifier: Option<DesktopNotifier>, once: bool) -> Result<()> {
    info!("watching {}", monitor.source_description());
    info!("poll interval: {}s", monitor.poll_interval().as_secs());

    // Terminal status line
    monitor.on_status_change(|status| {
        println!("Status: {}", notify::status_line(status));
        Ok(())
    });

    // Desktop notifications, when enabled
    if let Some(notifier) = notifier {
        monitor.on_status_change(move |status| notifier.notify(status));
    }

    if once {
        return monitor.poll_once().map_err(Into::into);
    }

    poll_loop(&mut monitor);
    Ok(())
}

/// Poll at the configured cadence until the monitor is disarmed.
///
/// Sleeping after each completed poll serializes ticks; a slow query or
/// callback delays the next tick rather than overlapping it. Retry policy
/// lives here, not in the core: a failed poll is logged and the loop
/// simply tries again on the next tick.
fn poll_loop(monitor: &mut Monitor) {
    let interval = monitor.poll_interval();
    monitor.start();
    while monitor.is_running() {
        if let Err(e) = monitor.poll_once() {
            warn!("poll failed: {e}");
        }
        thread::sleep(interval);
    }
}
