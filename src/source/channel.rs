//! Channel-based status source.
//!
//! Receives statuses via a tokio watch channel. This is useful for
//! embedding the monitor in a host that pushes statuses rather than
//! letting the monitor query a provider itself.

use tokio::sync::watch;

use super::{SourceError, StatusSource};
use crate::status::Status;

/// A status source that reads the latest value from a watch channel.
///
/// The producer pushes statuses through the sender; each poll returns
/// whatever was sent most recently. A watch channel always holds a
/// value, so this source cannot fail.
///
/// # Example
///
/// ```
/// use pipewatch::{ChannelSource, Status, StatusSource};
///
/// let (tx, mut source) = ChannelSource::create(Status::Running, "embedded");
/// tx.send(Status::Passed).unwrap();
/// assert_eq!(source.current_status().unwrap(), Status::Passed);
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    receiver: watch::Receiver<Status>,
    description: String,
}

impl ChannelSource {
    /// Create a new channel source from an existing receiver.
    pub fn new(receiver: watch::Receiver<Status>, source_description: &str) -> Self {
        let description = format!("channel: {source_description}");
        Self {
            receiver,
            description,
        }
    }

    /// Create a channel pair seeded with an initial status.
    ///
    /// Returns (sender, source); the sender pushes statuses and the
    /// source feeds them to a monitor.
    pub fn create(initial: Status, source_description: &str) -> (watch::Sender<Status>, Self) {
        let (tx, rx) = watch::channel(initial);
        let source = Self::new(rx, source_description);
        (tx, source)
    }
}

impl StatusSource for ChannelSource {
    fn current_status(&mut self) -> Result<Status, SourceError> {
        Ok(*self.receiver.borrow_and_update())
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_source_returns_seeded_value() {
        let (_tx, mut source) = ChannelSource::create(Status::Running, "test");
        assert_eq!(source.current_status().unwrap(), Status::Running);
        assert_eq!(source.description(), "channel: test");
    }

    #[test]
    fn test_channel_source_follows_updates() {
        let (tx, mut source) = ChannelSource::create(Status::Running, "test");

        tx.send(Status::Failed).unwrap();
        assert_eq!(source.current_status().unwrap(), Status::Failed);

        // No new send, latest value is repeated
        assert_eq!(source.current_status().unwrap(), Status::Failed);

        tx.send(Status::Passed).unwrap();
        assert_eq!(source.current_status().unwrap(), Status::Passed);
    }
}
