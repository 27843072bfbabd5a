//! Notification sink trait and shared handle.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::toast::{DEFAULT_DURATION, Severity, ToastId};

/// Something that can put a transient message in front of the user.
pub trait NotificationSink: Send + Sync {
    /// Show `text` for `duration`. Never fails.
    fn show(&self, text: &str, severity: Severity, duration: Duration) -> ToastId;

    fn info(&self, text: &str) -> ToastId {
        self.show(text, Severity::Info, DEFAULT_DURATION)
    }

    fn success(&self, text: &str) -> ToastId {
        self.show(text, Severity::Success, DEFAULT_DURATION)
    }

    fn error(&self, text: &str) -> ToastId {
        self.show(text, Severity::Error, DEFAULT_DURATION)
    }
}

/// Cloneable handle to a sink, passed explicitly to every component that notifies.
#[derive(Clone)]
pub struct Notifier {
    sink: Arc<dyn NotificationSink>,
    duration: Duration,
}

impl Notifier {
    /// Wrap a sink, using the default display duration.
    pub fn new(sink: impl NotificationSink + 'static) -> Self {
        Self {
            sink: Arc::new(sink),
            duration: DEFAULT_DURATION,
        }
    }

    /// Override the display duration used by the severity helpers.
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Display duration used by the severity helpers.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn show(&self, text: &str, severity: Severity, duration: Duration) -> ToastId {
        self.sink.show(text, severity, duration)
    }

    pub fn info(&self, text: &str) -> ToastId {
        self.show(text, Severity::Info, self.duration)
    }

    pub fn success(&self, text: &str) -> ToastId {
        self.show(text, Severity::Success, self.duration)
    }

    pub fn error(&self, text: &str) -> ToastId {
        self.show(text, Severity::Error, self.duration)
    }
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("duration", &self.duration)
            .finish_non_exhaustive()
    }
}

/// Sink that records toasts as `tracing` events.
#[derive(Debug, Default)]
pub struct TracingSink {
    next_id: AtomicU64,
}

impl TracingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NotificationSink for TracingSink {
    fn show(&self, text: &str, severity: Severity, duration: Duration) -> ToastId {
        let id = ToastId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        let duration_ms = duration.as_millis() as u64;
        match severity {
            Severity::Error => tracing::warn!(toast = id.0, duration_ms, "{text}"),
            Severity::Info | Severity::Success => {
                tracing::info!(toast = id.0, severity = %severity, duration_ms, "{text}")
            }
        }
        id
    }
}

/// Forwards every toast to several sinks. The id of the first sink is returned.
#[derive(Default)]
pub struct FanOut {
    sinks: Vec<Box<dyn NotificationSink>>,
}

impl FanOut {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, sink: impl NotificationSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }
}

impl NotificationSink for FanOut {
    fn show(&self, text: &str, severity: Severity, duration: Duration) -> ToastId {
        self.sinks
            .iter()
            .map(|sink| sink.show(text, severity, duration))
            .fold(None, |first, id| first.or(Some(id)))
            .unwrap_or(ToastId(0))
    }
}
