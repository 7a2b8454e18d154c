//! User-facing notifications.
//!
//! Controllers report errors and toasts here instead of talking to the
//! presentation layer. The channel is bounded and strictly FIFO with a
//! single consumer, so messages reach the user one at a time and in the
//! order they happened. Producing is fire-and-forget: a full queue or a
//! missing consumer drops the message with a log line, never an error.

use std::fmt::Display;
use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};

use tracing::{debug, warn};

/// Messages held before the oldest unconsumed one starts costing new ones.
pub const CHANNEL_CAPACITY: usize = 32;

/// How a notification should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Transient confirmation, a toast.
    Info,
    /// Something went wrong and the user should see it.
    Error,
}

/// One message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
}

/// Producer half. Cheap to clone; clones feed the same queue.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: SyncSender<Notification>,
}

impl Notifier {
    /// Report an error to the user, rendered through its `Display` text.
    pub fn report<E: Display + ?Sized>(&self, error: &E) {
        self.push(Notification {
            severity: Severity::Error,
            message: error.to_string(),
        });
    }

    /// Show a transient confirmation.
    pub fn info(&self, message: impl Into<String>) {
        self.push(Notification {
            severity: Severity::Info,
            message: message.into(),
        });
    }

    fn push(&self, note: Notification) {
        match self.tx.try_send(note) {
            Ok(()) => {}
            Err(TrySendError::Full(note)) => {
                warn!("notification queue full, dropping {:?}", note.message);
            }
            Err(TrySendError::Disconnected(note)) => {
                debug!("no notification consumer, dropping {:?}", note.message);
            }
        }
    }
}

/// Consumer half, held by the presentation layer.
pub struct NotificationFeed {
    rx: Receiver<Notification>,
}

impl NotificationFeed {
    /// Next pending notification, if any. Never blocks.
    pub fn try_next(&self) -> Option<Notification> {
        self.rx.try_recv().ok()
    }

    /// Everything pending, oldest first.
    pub fn drain(&self) -> Vec<Notification> {
        let mut notes = Vec::new();
        while let Some(note) = self.try_next() {
            notes.push(note);
        }
        notes
    }
}

/// Create a connected producer/consumer pair.
pub fn channel() -> (Notifier, NotificationFeed) {
    let (tx, rx) = mpsc::sync_channel(CHANNEL_CAPACITY);
    (Notifier { tx }, NotificationFeed { rx })
}
