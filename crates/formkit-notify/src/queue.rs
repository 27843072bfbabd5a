//! In-memory toast queue.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use crate::sink::NotificationSink;
use crate::toast::{Severity, ToastId, ToastMessage, ToastPhase};

#[derive(Debug, Default)]
struct QueueInner {
    next_id: u64,
    items: Vec<ToastMessage>,
}

/// Queue of visible toasts.
///
/// Toasts are appended immediately on `show` and stack in arrival order.
/// There is no deduplication and no maximum length. A toast removes itself
/// once its duration and exit transition have elapsed: every accessor drops
/// expired toasts before answering. Hosts with an event loop can also call
/// [`ToastQueue::tick`] to learn which toasts went away.
///
/// The clock is tokio's, so a paused test runtime controls expiry.
///
/// Clones share the same queue.
#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    inner: Arc<Mutex<QueueInner>>,
}

impl QueueInner {
    fn prune(&mut self, now: Instant) -> Vec<ToastMessage> {
        let (expired, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.items)
            .into_iter()
            .partition(|toast| toast.phase(now) == ToastPhase::Expired);
        self.items = kept;
        expired
    }
}

fn now() -> Instant {
    tokio::time::Instant::now().into_std()
}

impl ToastQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, QueueInner> {
        // A poisoned lock only means another thread panicked mid-push;
        // the vector itself is still consistent.
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Lock and drop whatever has expired by now.
    fn live(&self) -> MutexGuard<'_, QueueInner> {
        let mut inner = self.lock();
        inner.prune(now());
        inner
    }

    /// Append a toast shown at an explicit instant.
    pub fn show_at(
        &self,
        now: Instant,
        text: &str,
        severity: Severity,
        duration: Duration,
    ) -> ToastId {
        let mut inner = self.lock();
        inner.prune(now);
        inner.next_id += 1;
        let id = ToastId(inner.next_id);
        inner.items.push(ToastMessage {
            id,
            text: text.to_string(),
            severity,
            duration,
            shown_at: now,
        });
        id
    }

    /// Drop toasts whose display duration and exit transition have elapsed.
    ///
    /// Returns the toasts that were removed.
    pub fn tick(&self, now: Instant) -> Vec<ToastMessage> {
        self.lock().prune(now)
    }

    /// Toasts still on screen at `now`, including those in their exit transition.
    pub fn visible(&self, now: Instant) -> Vec<ToastMessage> {
        self.lock()
            .items
            .iter()
            .filter(|toast| toast.phase(now) != ToastPhase::Expired)
            .cloned()
            .collect()
    }

    /// Remove a toast before its timeout.
    pub fn dismiss(&self, id: ToastId) -> bool {
        let mut inner = self.lock();
        let before = inner.items.len();
        inner.items.retain(|toast| toast.id != id);
        inner.items.len() != before
    }

    /// Every toast currently held, in arrival order.
    pub fn snapshot(&self) -> Vec<ToastMessage> {
        self.live().items.clone()
    }

    /// Number of toasts held.
    pub fn len(&self) -> usize {
        self.live().items.len()
    }

    /// Check if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.live().items.is_empty()
    }

    /// Texts of every toast held, in arrival order.
    pub fn texts(&self) -> Vec<String> {
        self.live().items.iter().map(|t| t.text.clone()).collect()
    }
}

impl NotificationSink for ToastQueue {
    fn show(&self, text: &str, severity: Severity, duration: Duration) -> ToastId {
        self.show_at(now(), text, severity, duration)
    }
}
