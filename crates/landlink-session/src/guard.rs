//! Scoped "warn before navigating away" acquisition.
//!
//! The browser-side warning is a cross-cutting resource: it must exist
//! for the whole window in which a transaction or pin may be
//! outstanding, and must disappear on any terminal transition. Modeled
//! as scoped acquisition rather than event-listener bookkeeping spread
//! across handlers.

use std::sync::Arc;

/// Capability to warn the user before they navigate away mid-session.
pub trait UnloadWarning: Send + Sync {
    /// Install the warning.
    fn engage(&self);
    /// Remove the warning.
    fn release(&self);
}

/// RAII handle over an engaged [`UnloadWarning`].
///
/// Engaged at session start, released exactly once: an explicit
/// `release` on the terminal transition, with `Drop` as the backstop for
/// early exits.
pub struct UnloadGuard {
    warning: Arc<dyn UnloadWarning>,
    released: bool,
}

impl UnloadGuard {
    #[must_use]
    pub fn engage(warning: Arc<dyn UnloadWarning>) -> Self {
        warning.engage();
        Self {
            warning,
            released: false,
        }
    }

    pub fn release(&mut self) {
        if !self.released {
            self.released = true;
            self.warning.release();
        }
    }
}

impl Drop for UnloadGuard {
    fn drop(&mut self) {
        self.release();
    }
}

/// Warning that only traces. Stands in where no interactive surface
/// exists (headless runs, tests that don't care).
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingUnloadWarning;

impl UnloadWarning for TracingUnloadWarning {
    fn engage(&self) {
        tracing::debug!("unload warning engaged");
    }

    fn release(&self) {
        tracing::debug!("unload warning released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Counting {
        engaged: AtomicUsize,
        released: AtomicUsize,
    }

    impl UnloadWarning for Counting {
        fn engage(&self) {
            self.engaged.fetch_add(1, Ordering::SeqCst);
        }

        fn release(&self) {
            self.released.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn release_is_idempotent_and_drop_is_a_backstop() {
        let warning = Arc::new(Counting::default());

        let mut guard = UnloadGuard::engage(warning.clone());
        assert_eq!(warning.engaged.load(Ordering::SeqCst), 1);

        guard.release();
        guard.release();
        drop(guard);

        assert_eq!(warning.released.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn drop_without_explicit_release_still_releases() {
        let warning = Arc::new(Counting::default());
        drop(UnloadGuard::engage(warning.clone()));
        assert_eq!(warning.released.load(Ordering::SeqCst), 1);
    }
}
