//! # Toast Notifications
//!
//! Short messages ("iPhone 17 added to cart!") that disappear on their own.
//!
//! Expiry is computed against a `now` the caller passes in, so the queue
//! never reads the clock itself.
//!
//! ```text
//!   push("A", t0)        push("B", t0 + 1s)
//!        │                      │
//!   ─────●──────────────────────●──────────────────────────────► time
//!        │◄──────── 3000 ms ───────►│
//!                               │◄──────── 3000 ms ───────►│
//!                                   A gone                  B gone
//! ```

use std::collections::VecDeque;

use chrono::{DateTime, Duration, Utc};

/// Default display time.
pub const DEFAULT_TOAST_MS: u32 = 3000;

/// A single notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub shown_at: DateTime<Utc>,
}

/// Toasts in the order they were pushed, each expiring independently.
#[derive(Debug, Clone)]
pub struct ToastQueue {
    duration: Duration,
    toasts: VecDeque<Toast>,
}

impl ToastQueue {
    /// Creates a queue whose toasts stay visible for `duration_ms`.
    pub fn new(duration_ms: u32) -> Self {
        ToastQueue {
            duration: Duration::milliseconds(i64::from(duration_ms)),
            toasts: VecDeque::new(),
        }
    }

    /// The message shown when a product goes into the cart.
    pub fn added_to_cart_message(name: &str) -> String {
        format!("{name} added to cart!")
    }

    pub fn push(&mut self, message: impl Into<String>, now: DateTime<Utc>) {
        self.toasts.push_back(Toast {
            message: message.into(),
            shown_at: now,
        });
    }

    /// Toasts still on screen at `now`.
    ///
    /// A toast is visible from `shown_at` up to, but not including,
    /// `shown_at + duration`.
    pub fn visible(&self, now: DateTime<Utc>) -> impl Iterator<Item = &Toast> + '_ {
        self.toasts.iter().filter(move |t| self.is_live(t, now))
    }

    /// Drops expired toasts. Returns how many were removed.
    pub fn prune(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.toasts.len();
        let duration = self.duration;
        self.toasts.retain(|t| now < t.shown_at + duration);
        before - self.toasts.len()
    }

    fn is_live(&self, toast: &Toast, now: DateTime<Utc>) -> bool {
        now < toast.shown_at + self.duration
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

impl Default for ToastQueue {
    fn default() -> Self {
        ToastQueue::new(DEFAULT_TOAST_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_700_000_000_000 + ms).unwrap()
    }

    fn messages(queue: &ToastQueue, now: DateTime<Utc>) -> Vec<String> {
        queue.visible(now).map(|t| t.message.clone()).collect()
    }

    #[test]
    fn test_toast_expires_after_duration() {
        let mut queue = ToastQueue::default();
        queue.push(ToastQueue::added_to_cart_message("iPhone 17"), at(0));

        assert_eq!(messages(&queue, at(0)), vec!["iPhone 17 added to cart!"]);
        assert_eq!(messages(&queue, at(2999)).len(), 1);
        assert!(messages(&queue, at(3000)).is_empty());
    }

    #[test]
    fn test_toasts_expire_independently() {
        let mut queue = ToastQueue::new(3000);
        queue.push("first", at(0));
        queue.push("second", at(1000));

        assert_eq!(messages(&queue, at(1500)), vec!["first", "second"]);
        assert_eq!(messages(&queue, at(3500)), vec!["second"]);
        assert!(messages(&queue, at(4000)).is_empty());
    }

    #[test]
    fn test_prune_drops_only_expired() {
        let mut queue = ToastQueue::new(3000);
        queue.push("first", at(0));
        queue.push("second", at(2000));

        assert_eq!(queue.prune(at(3000)), 1);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.prune(at(5000)), 1);
        assert!(queue.is_empty());
    }
}
