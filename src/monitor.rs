//! The poll/compare/notify state machine.
//!
//! [`Monitor`] owns one [`StatusSource`] and an ordered list of callbacks.
//! Each poll queries the source once, compares the result to the
//! remembered status, and on a transition fans the new status out to
//! every callback in registration order. The very first poll always
//! notifies, so observers receive an initial snapshot instead of waiting
//! for the first real transition.
//!
//! The monitor is single-threaded and cooperative: it is driven by one
//! external scheduling tick at a time, and `poll_once` runs to completion
//! (including all callback invocations) before the next tick. It provides
//! no mutual exclusion against overlapping ticks; callers that could
//! overlap must serialize externally.

use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::source::{SourceError, StatusSource};
use crate::status::Status;

/// A registered status-change observer.
///
/// Invoked synchronously with the new status on every detected
/// transition. A slow callback delays the return of `poll_once` and
/// therefore the next tick.
pub type StatusCallback = Box<dyn FnMut(Status) -> anyhow::Result<()> + Send>;

/// Errors that can fail a single poll.
#[derive(Debug, Error)]
pub enum PollError {
    /// The status source query failed. Not retried internally; the
    /// caller decides whether the next tick retries, backs off, or
    /// terminates.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// A callback failed. Fail-fast: callbacks after the failing one
    /// were not invoked, and the remembered status was not advanced.
    #[error("status callback #{index} failed: {source}")]
    Callback {
        index: usize,
        #[source]
        source: anyhow::Error,
    },
}

/// Watches a status source and notifies observers on transitions.
///
/// # Example
///
/// ```
/// use pipewatch::{ChannelSource, Monitor, Status};
/// use std::time::Duration;
///
/// let (tx, source) = ChannelSource::create(Status::Running, "example");
/// let mut monitor = Monitor::new(Box::new(source), Duration::from_secs(120));
/// monitor.on_status_change(|status| {
///     println!("pipeline is now {status}");
///     Ok(())
/// });
///
/// monitor.poll_once()?; // first poll always notifies
/// assert_eq!(monitor.last_status(), Some(Status::Running));
/// # Ok::<(), pipewatch::PollError>(())
/// ```
pub struct Monitor {
    source: Box<dyn StatusSource + Send>,
    poll_interval: Duration,
    callbacks: Vec<StatusCallback>,
    previous: Option<Status>,
    running: bool,
}

impl Monitor {
    /// Create a monitor over the given source.
    ///
    /// The monitor exclusively owns the source and its callback list for
    /// its lifetime. `previous` starts absent, which forces the first
    /// poll to notify.
    pub fn new(source: Box<dyn StatusSource + Send>, poll_interval: Duration) -> Self {
        Self {
            source,
            poll_interval,
            callbacks: Vec::new(),
            previous: None,
            running: false,
        }
    }

    /// Register a callback to be invoked on status transitions.
    ///
    /// Callbacks are invoked in registration order. No deduplication;
    /// registering the same logic twice invokes it twice. A callback is
    /// never invoked retroactively for transitions that happened before
    /// it was registered.
    pub fn on_status_change<F>(&mut self, callback: F)
    where
        F: FnMut(Status) -> anyhow::Result<()> + Send + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    /// Query the source exactly once and notify observers on a transition.
    ///
    /// Notifies when there is no remembered status yet (first poll) or
    /// when the current status differs from the remembered one. On
    /// success the remembered status is updated whether or not any
    /// callback fired. On any error - source or callback - the remembered
    /// status is left untouched, so the next successful poll re-evaluates
    /// against the last fully processed status.
    ///
    /// Callback errors are fail-fast: the first failure propagates and
    /// the remaining callbacks in that invocation do not run.
    pub fn poll_once(&mut self) -> Result<(), PollError> {
        let current = self.source.current_status()?;

        let should_notify = self.previous != Some(current);
        if should_notify {
            debug!(
                previous = ?self.previous.map(|s| s.as_str()),
                current = current.as_str(),
                "status transition"
            );
            for (index, callback) in self.callbacks.iter_mut().enumerate() {
                callback(current).map_err(|source| PollError::Callback { index, source })?;
            }
        }

        self.previous = Some(current);
        Ok(())
    }

    /// Arm the monitor. Consulted by the driving loop via
    /// [`is_running`](Self::is_running); does not change poll semantics.
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Disarm the monitor; the driving loop exits after the current tick.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Whether the monitor is armed.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The most recently observed status, if any poll has succeeded.
    pub fn last_status(&self) -> Option<Status> {
        self.previous
    }

    /// The cadence the driving loop should poll at.
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Description of the underlying status source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// A source that replays a fixed script of results.
    struct ScriptedSource {
        script: Vec<Result<Status, SourceError>>,
    }

    impl ScriptedSource {
        fn new(script: Vec<Result<Status, SourceError>>) -> Self {
            Self { script }
        }

        fn of_statuses(statuses: &[Status]) -> Self {
            Self::new(statuses.iter().map(|s| Ok(*s)).collect())
        }
    }

    impl StatusSource for ScriptedSource {
        fn current_status(&mut self) -> Result<Status, SourceError> {
            self.script.remove(0)
        }

        fn description(&self) -> &str {
            "scripted"
        }
    }

    fn recording_monitor(
        statuses: &[Status],
    ) -> (Monitor, Arc<Mutex<Vec<Status>>>) {
        let mut monitor = Monitor::new(
            Box::new(ScriptedSource::of_statuses(statuses)),
            Duration::from_secs(120),
        );
        let calls = Arc::new(Mutex::new(Vec::new()));
        let recorder = Arc::clone(&calls);
        monitor.on_status_change(move |status| {
            recorder.lock().unwrap().push(status);
            Ok(())
        });
        (monitor, calls)
    }

    #[test]
    fn test_first_poll_always_notifies() {
        for initial in [Status::Running, Status::Passed, Status::Failed] {
            let (mut monitor, calls) = recording_monitor(&[initial]);
            monitor.poll_once().unwrap();
            assert_eq!(*calls.lock().unwrap(), vec![initial]);
            assert_eq!(monitor.last_status(), Some(initial));
        }
    }

    #[test]
    fn test_no_change_no_notify() {
        let (mut monitor, calls) = recording_monitor(&[Status::Passed, Status::Passed]);
        monitor.poll_once().unwrap();
        monitor.poll_once().unwrap();
        assert_eq!(*calls.lock().unwrap(), vec![Status::Passed]);
    }

    #[test]
    fn test_change_triggers_notify() {
        let (mut monitor, calls) = recording_monitor(&[Status::Running, Status::Passed]);
        monitor.poll_once().unwrap();
        monitor.poll_once().unwrap();
        assert_eq!(*calls.lock().unwrap(), vec![Status::Running, Status::Passed]);
    }

    #[test]
    fn test_scenario_running_running_passed() {
        let (mut monitor, calls) =
            recording_monitor(&[Status::Running, Status::Running, Status::Passed]);
        for _ in 0..3 {
            monitor.poll_once().unwrap();
        }
        assert_eq!(*calls.lock().unwrap(), vec![Status::Running, Status::Passed]);
    }

    #[test]
    fn test_scenario_passed_failed_failed_running() {
        let (mut monitor, calls) = recording_monitor(&[
            Status::Passed,
            Status::Failed,
            Status::Failed,
            Status::Running,
        ]);
        for _ in 0..4 {
            monitor.poll_once().unwrap();
        }
        assert_eq!(
            *calls.lock().unwrap(),
            vec![Status::Passed, Status::Failed, Status::Running]
        );
    }

    #[test]
    fn test_callbacks_fire_in_registration_order() {
        let mut monitor = Monitor::new(
            Box::new(ScriptedSource::of_statuses(&[Status::Failed])),
            Duration::from_secs(120),
        );
        let order = Arc::new(Mutex::new(Vec::new()));
        for label in ["first", "second", "third"] {
            let order = Arc::clone(&order);
            monitor.on_status_change(move |_| {
                order.lock().unwrap().push(label);
                Ok(())
            });
        }

        monitor.poll_once().unwrap();
        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_late_registration_not_retroactive() {
        let (mut monitor, _calls) = recording_monitor(&[Status::Passed, Status::Failed]);
        monitor.poll_once().unwrap();

        let late_calls = Arc::new(Mutex::new(Vec::new()));
        let recorder = Arc::clone(&late_calls);
        monitor.on_status_change(move |status| {
            recorder.lock().unwrap().push(status);
            Ok(())
        });

        // The late callback sees only transitions after its registration
        monitor.poll_once().unwrap();
        assert_eq!(*late_calls.lock().unwrap(), vec![Status::Failed]);
    }

    #[test]
    fn test_source_error_propagates_and_state_is_not_advanced() {
        let mut monitor = Monitor::new(
            Box::new(ScriptedSource::new(vec![
                Ok(Status::Passed),
                Err(SourceError::Timeout),
                Ok(Status::Passed),
            ])),
            Duration::from_secs(120),
        );
        let calls = Arc::new(Mutex::new(Vec::new()));
        let recorder = Arc::clone(&calls);
        monitor.on_status_change(move |status| {
            recorder.lock().unwrap().push(status);
            Ok(())
        });

        monitor.poll_once().unwrap();
        assert!(matches!(
            monitor.poll_once(),
            Err(PollError::Source(SourceError::Timeout))
        ));
        assert_eq!(monitor.last_status(), Some(Status::Passed));

        // Poll 3 sees the same status as poll 1, so it stays silent
        monitor.poll_once().unwrap();
        assert_eq!(*calls.lock().unwrap(), vec![Status::Passed]);
    }

    #[test]
    fn test_callback_failure_is_fail_fast() {
        let mut monitor = Monitor::new(
            Box::new(ScriptedSource::of_statuses(&[Status::Failed])),
            Duration::from_secs(120),
        );
        let later_ran = Arc::new(Mutex::new(false));
        monitor.on_status_change(|_| Err(anyhow::anyhow!("notifier unavailable")));
        let flag = Arc::clone(&later_ran);
        monitor.on_status_change(move |_| {
            *flag.lock().unwrap() = true;
            Ok(())
        });

        let err = monitor.poll_once().unwrap_err();
        assert!(matches!(err, PollError::Callback { index: 0, .. }));
        assert!(!*later_ran.lock().unwrap());
        // State is not advanced past a failed notification
        assert_eq!(monitor.last_status(), None);
    }

    #[test]
    fn test_notify_without_callbacks_still_advances_state() {
        let mut monitor = Monitor::new(
            Box::new(ScriptedSource::of_statuses(&[Status::Running])),
            Duration::from_secs(120),
        );
        monitor.poll_once().unwrap();
        assert_eq!(monitor.last_status(), Some(Status::Running));
    }

    #[test]
    fn test_start_stop_arm_and_disarm() {
        let mut monitor = Monitor::new(
            Box::new(ScriptedSource::of_statuses(&[])),
            Duration::from_secs(120),
        );
        assert!(!monitor.is_running());
        monitor.start();
        assert!(monitor.is_running());
        monitor.stop();
        assert!(!monitor.is_running());
    }
}
