//! In-terminal transient notifications.

use chrono::{DateTime, Duration, Utc};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{Notification, Notifier};

/// Toasts never outlive a day, whatever the config says
const MAX_LIFETIME_MS: u64 = 86_400_000;

/// A notification on screen, with the time it was posted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub notification: Notification,
    pub created_at: DateTime<Utc>,
}

impl Toast {
    pub fn expires_at(&self, lifetime: Duration) -> DateTime<Utc> {
        self.created_at + lifetime
    }
}

#[derive(Debug)]
struct ToastState {
    toasts: VecDeque<Toast>,
    next_id: u64,
}

/// Shared stack of toasts, newest last.
///
/// Cloning is cheap and every clone sees the same toasts, so the tracker
/// can post through one handle while the renderer reads another.
#[derive(Debug, Clone)]
pub struct ToastBoard {
    state: Arc<Mutex<ToastState>>,
    lifetime: Duration,
    max_visible: usize,
}

impl ToastBoard {
    pub fn new(lifetime_ms: u64, max_visible: usize) -> Self {
        Self {
            state: Arc::new(Mutex::new(ToastState {
                toasts: VecDeque::new(),
                next_id: 1,
            })),
            lifetime: Duration::milliseconds(
                i64::try_from(lifetime_ms.min(MAX_LIFETIME_MS)).unwrap_or(0),
            ),
            max_visible: max_visible.max(1),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ToastState> {
        // A toast list is always valid, even after a panic mid-push
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Post a toast stamped with `now`, dropping the oldest beyond capacity.
    pub fn push_at(&self, notification: Notification, now: DateTime<Utc>) -> u64 {
        let mut state = self.lock();
        let id = state.next_id;
        state.next_id += 1;
        state.toasts.push_back(Toast {
            id,
            notification,
            created_at: now,
        });
        while state.toasts.len() > self.max_visible {
            state.toasts.pop_front();
        }
        id
    }

    /// Remove toasts whose lifetime has elapsed at `now`. Returns how many were removed.
    pub fn prune_at(&self, now: DateTime<Utc>) -> usize {
        let lifetime = self.lifetime;
        let mut state = self.lock();
        let before = state.toasts.len();
        state.toasts.retain(|t| t.expires_at(lifetime) > now);
        before - state.toasts.len()
    }

    pub fn prune(&self) -> usize {
        self.prune_at(Utc::now())
    }

    /// Dismiss a single toast early
    pub fn dismiss(&self, id: u64) -> bool {
        let mut state = self.lock();
        let before = state.toasts.len();
        state.toasts.retain(|t| t.id != id);
        before != state.toasts.len()
    }

    pub fn clear(&self) {
        self.lock().toasts.clear();
    }

    /// Snapshot of current toasts, oldest first
    pub fn visible(&self) -> Vec<Toast> {
        self.lock().toasts.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().toasts.is_empty()
    }
}

impl Notifier for ToastBoard {
    fn notify(&self, notification: &Notification) {
        self.push_at(notification.clone(), Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_push_assigns_increasing_ids() {
        let board = ToastBoard::new(3000, 5);
        let a = board.push_at(Notification::success("A", "a"), t0());
        let b = board.push_at(Notification::success("B", "b"), t0());
        assert!(b > a);
        assert_eq!(board.len(), 2);
    }

    #[test]
    fn test_toast_expires_after_lifetime() {
        let board = ToastBoard::new(3000, 5);
        board.push_at(Notification::success("Shipped", "On the way"), t0());

        assert_eq!(board.prune_at(t0() + Duration::milliseconds(2999)), 0);
        assert_eq!(board.len(), 1);

        assert_eq!(board.prune_at(t0() + Duration::milliseconds(3000)), 1);
        assert!(board.is_empty());
    }

    #[test]
    fn test_prune_keeps_newer_toasts() {
        let board = ToastBoard::new(1000, 5);
        board.push_at(Notification::success("Old", ""), t0());
        board.push_at(
            Notification::error("New", ""),
            t0() + Duration::milliseconds(800),
        );

        assert_eq!(board.prune_at(t0() + Duration::milliseconds(1200)), 1);
        let remaining = board.visible();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].notification.title, "New");
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let board = ToastBoard::new(3000, 2);
        board.push_at(Notification::info("1", ""), t0());
        board.push_at(Notification::info("2", ""), t0());
        board.push_at(Notification::info("3", ""), t0());

        let titles: Vec<String> = board
            .visible()
            .into_iter()
            .map(|t| t.notification.title)
            .collect();
        assert_eq!(titles, vec!["2", "3"]);
    }

    #[test]
    fn test_zero_capacity_still_shows_latest() {
        let board = ToastBoard::new(3000, 0);
        board.push_at(Notification::info("only", ""), t0());
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn test_dismiss() {
        let board = ToastBoard::new(3000, 5);
        let id = board.push_at(Notification::warning("W", ""), t0());
        assert!(board.dismiss(id));
        assert!(!board.dismiss(id));
        assert!(board.is_empty());
    }

    #[test]
    fn test_clones_share_toasts() {
        let board = ToastBoard::new(3000, 5);
        let handle = board.clone();
        handle.notify(&Notification::success("Delivered", "Done"));
        assert_eq!(board.len(), 1);
        board.clear();
        assert!(handle.is_empty());
    }
}
