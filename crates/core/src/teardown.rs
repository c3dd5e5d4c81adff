//! Release handles returned by registration functions.

use crate::subscription::Subscription;
use alloc::boxed::Box;
use core::fmt;

/// The release action of one subscription.
///
/// A registration function returns a `Teardown` (or anything convertible into
/// one). The engine runs it exactly once, when the subscription ends for any
/// reason: completion, error, or an explicit `unsubscribe()`.
///
/// Conversions:
/// - `()` becomes an empty teardown (nothing to release).
/// - A [`Subscription`] becomes "unsubscribe that subscription", which is how
///   operators tear down their upstream.
#[must_use = "a teardown does nothing unless it is returned to the engine or run"]
pub struct Teardown {
    release: Option<Box<dyn FnOnce()>>,
}

impl Teardown {
    /// Wraps a release closure.
    pub fn new<F>(release: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A teardown with nothing to release.
    #[inline]
    pub fn empty() -> Self {
        Self { release: None }
    }

    /// Returns true if running this teardown does nothing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.release.is_none()
    }

    /// Runs the release action, consuming the handle.
    pub fn run(self) {
        if let Some(release) = self.release {
            release();
        }
    }
}

impl Default for Teardown {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<()> for Teardown {
    fn from(_: ()) -> Self {
        Self::empty()
    }
}

impl From<Subscription> for Teardown {
    fn from(subscription: Subscription) -> Self {
        Self::new(move || subscription.unsubscribe())
    }
}

impl From<Option<Teardown>> for Teardown {
    fn from(teardown: Option<Teardown>) -> Self {
        teardown.unwrap_or_default()
    }
}

impl fmt::Debug for Teardown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Teardown")
            .field("empty", &self.is_empty())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use core::cell::Cell;

    #[test]
    fn test_teardown_runs_release() {
        let ran = Rc::new(Cell::new(0));
        let ran_clone = ran.clone();

        let teardown = Teardown::new(move || ran_clone.set(ran_clone.get() + 1));
        assert!(!teardown.is_empty());

        teardown.run();
        assert_eq!(ran.get(), 1);
    }

    #[test]
    fn test_teardown_empty() {
        let teardown = Teardown::empty();
        assert!(teardown.is_empty());
        teardown.run();

        let teardown: Teardown = ().into();
        assert!(teardown.is_empty());

        let teardown: Teardown = None.into();
        assert!(teardown.is_empty());
    }
}
