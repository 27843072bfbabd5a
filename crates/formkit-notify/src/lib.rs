//! Toast notifications for formkit.
//!
//! A toast is a short message with a severity and a display duration. Any
//! component that needs to tell the user something takes a [`Notifier`]
//! and calls `info`, `success` or `error` on it.
//!
//! # Sinks
//!
//! - [`ToastQueue`] - in-memory stack of visible toasts with timed expiry
//! - [`TracingSink`] - writes toasts to the log
//! - [`FanOut`] - forwards to several sinks
//!
//! # Example
//!
//! ```
//! use formkit_notify::{Notifier, ToastQueue};
//!
//! let queue = ToastQueue::new();
//! let notifier = Notifier::new(queue.clone());
//! notifier.success("Saved");
//! assert_eq!(queue.len(), 1);
//! ```

mod queue;
mod sink;
mod toast;

pub use queue::ToastQueue;
pub use sink::{FanOut, NotificationSink, Notifier, TracingSink};
pub use toast::{DEFAULT_DURATION, EXIT_TRANSITION, Severity, ToastId, ToastMessage, ToastPhase};
