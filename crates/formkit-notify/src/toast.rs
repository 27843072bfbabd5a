//! Toast message types.

use std::fmt;
use std::time::{Duration, Instant};

/// How long a toast stays visible when the caller does not say otherwise.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(4000);

/// Length of the exit transition after a toast's display duration elapses.
pub const EXIT_TRANSITION: Duration = Duration::from_millis(300);

/// Severity of a toast notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Neutral information (e.g. "already shared on Twitter").
    Info,
    /// A completed operation.
    Success,
    /// A failed operation or invalid input.
    Error,
}

impl Severity {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Identifier handed out by a sink for each toast it shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(pub u64);

/// A transient notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastMessage {
    pub id: ToastId,
    pub text: String,
    pub severity: Severity,
    /// How long the toast stays fully visible.
    pub duration: Duration,
    /// When the toast was appended.
    pub shown_at: Instant,
}

/// Display phase of a toast at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Visible,
    /// Display duration elapsed; the exit transition is running.
    Exiting,
    /// Fully gone; the owning queue drops it on its next access.
    Expired,
}

impl ToastMessage {
    /// Phase of this toast at `now`.
    pub fn phase(&self, now: Instant) -> ToastPhase {
        let elapsed = now.saturating_duration_since(self.shown_at);
        if elapsed < self.duration {
            ToastPhase::Visible
        } else if elapsed < self.duration + EXIT_TRANSITION {
            ToastPhase::Exiting
        } else {
            ToastPhase::Expired
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toast(duration_ms: u64, shown_at: Instant) -> ToastMessage {
        ToastMessage {
            id: ToastId(1),
            text: "Saved".to_string(),
            severity: Severity::Success,
            duration: Duration::from_millis(duration_ms),
            shown_at,
        }
    }

    #[test]
    fn test_phase_progression() {
        let start = Instant::now();
        let toast = toast(1000, start);

        assert_eq!(toast.phase(start), ToastPhase::Visible);
        assert_eq!(
            toast.phase(start + Duration::from_millis(999)),
            ToastPhase::Visible
        );
        assert_eq!(
            toast.phase(start + Duration::from_millis(1000)),
            ToastPhase::Exiting
        );
        assert_eq!(
            toast.phase(start + Duration::from_millis(1000) + EXIT_TRANSITION),
            ToastPhase::Expired
        );
    }

    #[test]
    fn test_phase_before_shown_is_visible() {
        let start = Instant::now();
        let toast = toast(1000, start + Duration::from_secs(1));
        assert_eq!(toast.phase(start), ToastPhase::Visible);
    }

    #[test]
    fn test_severity_labels() {
        assert_eq!(Severity::Info.to_string(), "info");
        assert_eq!(Severity::Success.label(), "success");
        assert_eq!(Severity::Error.label(), "error");
    }
}
