//! Transient user-facing notifications.
//!
//! A single notice is visible at a time; the newest replaces the oldest and
//! each notice auto-expires after a fixed delay. The expiry timer of a
//! replaced notice is aborted so it cannot clear its successor.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::AbortHandle;

/// Notice severity, mirrored by the view layer's styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

/// A transient message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
}

/// Handle to the notification channel.
///
/// Cheap to clone; all clones share the same visible slot. Posting a notice
/// spawns an expiry timer, so a tokio runtime must be current.
#[derive(Clone)]
pub struct Notifier {
    inner: Arc<NotifierInner>,
}

struct NotifierInner {
    ttl: Duration,
    slot: Mutex<Slot>,
}

#[derive(Default)]
struct Slot {
    current: Option<Notice>,
    expiry: Option<AbortHandle>,
    // Guards against an expiry task that was already past its sleep when
    // aborted: it may only clear the notice it was spawned for.
    epoch: u64,
}

impl Notifier {
    /// Create a channel whose notices expire after `ttl`.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(NotifierInner {
                ttl,
                slot: Mutex::new(Slot::default()),
            }),
        }
    }

    /// Post a notice, replacing any visible one.
    pub fn notify(&self, message: impl Into<String>, kind: NoticeKind) {
        let mut slot = self
            .inner
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(expiry) = slot.expiry.take() {
            expiry.abort();
        }

        slot.epoch += 1;
        let epoch = slot.epoch;
        slot.current = Some(Notice {
            message: message.into(),
            kind,
        });

        let inner = Arc::clone(&self.inner);
        let expiry = tokio::spawn(async move {
            tokio::time::sleep(inner.ttl).await;
            let mut slot = inner.slot.lock().unwrap_or_else(PoisonError::into_inner);
            if slot.epoch == epoch {
                slot.current = None;
                slot.expiry = None;
            }
        });
        slot.expiry = Some(expiry.abort_handle());
    }

    /// Post a success notice.
    pub fn success(&self, message: impl Into<String>) {
        self.notify(message, NoticeKind::Success);
    }

    /// Post an error notice.
    pub fn error(&self, message: impl Into<String>) {
        self.notify(message, NoticeKind::Error);
    }

    /// The currently visible notice, if any.
    #[must_use]
    pub fn current(&self) -> Option<Notice> {
        self.inner
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .current
            .clone()
    }
}
