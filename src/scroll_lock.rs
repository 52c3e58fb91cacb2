//! Page scroll lock held while an overlay is open.
//!
//! [`ScrollLock`] counts holders. The router acquires a [`ScrollLockGuard`]
//! when the resolved layers gain an overlay and drops it when they lose one, so
//! the lock is released on every exit path, including router teardown.
//! Closing a window does not release it: the lock follows the router's layers,
//! not the lifetime of the view drawing them.
//!
//! ```
//! use travellink_navigator::ScrollLock;
//!
//! let lock = ScrollLock::new();
//! let guard = lock.acquire();
//! assert!(lock.is_locked());
//! drop(guard);
//! assert!(!lock.is_locked());
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Shared scroll-lock counter. Clones share the same counter.
#[derive(Debug, Clone, Default)]
pub struct ScrollLock {
    holders: Arc<AtomicUsize>,
}

impl ScrollLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a hold on the lock. Released when the guard drops.
    #[must_use = "the lock is released as soon as the guard is dropped"]
    pub fn acquire(&self) -> ScrollLockGuard {
        let previous = self.holders.fetch_add(1, Ordering::SeqCst);
        crate::trace_log!("Scroll lock acquired ({} holders)", previous + 1);
        ScrollLockGuard {
            holders: Arc::clone(&self.holders),
        }
    }

    /// `true` while at least one guard is alive.
    pub fn is_locked(&self) -> bool {
        self.holders() > 0
    }

    pub fn holders(&self) -> usize {
        self.holders.load(Ordering::SeqCst)
    }
}

/// Hold on a [`ScrollLock`].
#[derive(Debug)]
pub struct ScrollLockGuard {
    holders: Arc<AtomicUsize>,
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        let previous = self.holders.fetch_sub(1, Ordering::SeqCst);
        crate::trace_log!("Scroll lock released ({} holders)", previous - 1);
    }
}
