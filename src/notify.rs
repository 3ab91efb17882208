//! Notifications

use mockall::automock;

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// An operation completed as requested
    Success,

    /// An operation was rejected
    Error,

    /// Something changed that the user should know about
    Warning,

    /// Neutral information
    Info,
}

/// Fire-and-forget sink for human-readable toast-style messages.
///
/// The cart never reports validation failures by returning errors to the UI
/// layer; user-visible outcomes flow exclusively through this sink.
#[automock]
pub trait NotificationSink {
    /// Deliver a notification. No return value is consumed.
    fn notify<'a>(&mut self, severity: Severity, title: &str, message: Option<&'a str>);
}

/// Sink that discards every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn notify(&mut self, _severity: Severity, _title: &str, _message: Option<&str>) {}
}

/// Sink that records every notification, for assertions in tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    /// Every delivered notification, in delivery order
    pub delivered: Vec<(Severity, String, Option<String>)>,
}

impl RecordingSink {
    /// Create an empty recording sink.
    #[must_use]
    pub fn new() -> Self {
        RecordingSink::default()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&mut self, severity: Severity, title: &str, message: Option<&str>) {
        self.delivered
            .push((severity, title.to_owned(), message.map(str::to_owned)));
    }
}
