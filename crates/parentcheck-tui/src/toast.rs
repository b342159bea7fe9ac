use std::collections::VecDeque;
use std::time::{Duration, Instant};

use parentcheck_core::{NoticeKind, Notify};

pub const MAX_VISIBLE: usize = 4;
const MAX_QUEUED: usize = 16;

#[derive(Debug, Clone)]
pub struct Toast {
    pub kind: NoticeKind,
    pub message: String,
    shown_at: Instant,
}

/// Newest-first queue of transient notifications.
#[derive(Debug, Clone)]
pub struct Toasts {
    items: VecDeque<Toast>,
    lifetime: Duration,
}

impl Toasts {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            items: VecDeque::new(),
            lifetime,
        }
    }

    pub fn push_at(&mut self, kind: NoticeKind, message: String, now: Instant) {
        self.items.push_front(Toast {
            kind,
            message,
            shown_at: now,
        });
        self.items.truncate(MAX_QUEUED);
    }

    pub fn expire(&mut self, now: Instant) {
        let lifetime = self.lifetime;
        self.items
            .retain(|toast| now.saturating_duration_since(toast.shown_at) < lifetime);
    }

    pub fn dismiss_newest(&mut self) -> bool {
        self.items.pop_front().is_some()
    }

    pub fn dismiss(&mut self, index: usize) -> bool {
        self.items.remove(index).is_some()
    }

    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        self.items.iter().take(MAX_VISIBLE)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Notify for Toasts {
    fn notify(&mut self, kind: NoticeKind, message: String) {
        self.push_at(kind, message, Instant::now());
    }
}
