//! Per-subscription runtime state.
//!
//! This module provides the guarded observer handed to registration functions
//! (`Subscriber`) and the handle returned to callers (`Subscription`). Both
//! point at the same state, created fresh for every `subscribe` call.
//!
//! Lifecycle rules enforced here:
//! - Nothing is delivered once the subscription is closed.
//! - `error` and `complete` are mutually exclusive; the first one wins.
//! - A terminal signal closes the subscription, forwards the signal, then runs
//!   teardown.
//! - Teardown runs exactly once, including when the producer terminates before
//!   its registration function has returned the teardown.
//! - A subscription whose observer relays into a closed downstream reports
//!   itself closed, so producers can stop early.

use crate::observer::Observer;
use crate::teardown::Teardown;
use alloc::rc::Rc;
use core::cell::RefCell;
use core::fmt;

/// Shared state of a single subscription.
struct SubscriberState<T, E> {
    /// The caller's callbacks. `None` once the subscription is closed.
    observer: RefCell<Option<Observer<T, E>>>,
    /// Release action, installed after the registration function returns.
    teardown: RefCell<Option<Teardown>>,
}

impl<T, E> SubscriberState<T, E> {
    fn is_closed(&self) -> bool {
        let closed_check = match self.observer.borrow().as_ref() {
            Some(observer) => observer.closed_check.clone(),
            None => return true,
        };
        closed_check.map_or(false, |check| check())
    }

    /// Takes the observer out, closing the subscription.
    fn close(&self) -> Option<Observer<T, E>> {
        self.observer.borrow_mut().take()
    }

    fn release(&self) {
        let teardown = self.teardown.borrow_mut().take();
        if let Some(teardown) = teardown {
            #[cfg(feature = "tracing")]
            tracing::trace!(empty = teardown.is_empty(), "running teardown");
            teardown.run();
        }
    }
}

/// Type-erased view used by `Subscription`.
trait SubscriptionLike {
    fn unsubscribe(&self);
    fn is_closed(&self) -> bool;
}

impl<T, E> SubscriptionLike for SubscriberState<T, E> {
    fn unsubscribe(&self) {
        let observer = self.close();
        drop(observer);
        self.release();
    }

    fn is_closed(&self) -> bool {
        SubscriberState::is_closed(self)
    }
}

/// The guarded observer passed to a registration function.
///
/// Cloning a `Subscriber` yields another handle to the same subscription, so
/// asynchronous producers can keep one inside a timer or listener callback.
/// Calls made after the subscription closed are silently dropped.
pub struct Subscriber<T, E = crate::Error> {
    state: Rc<SubscriberState<T, E>>,
}

impl<T: 'static, E: 'static> Subscriber<T, E> {
    pub(crate) fn new(observer: Observer<T, E>) -> Self {
        Self {
            state: Rc::new(SubscriberState {
                observer: RefCell::new(Some(observer)),
                teardown: RefCell::new(None),
            }),
        }
    }

    /// Delivers a value.
    pub fn next(&self, value: T) {
        let next = match self.state.observer.borrow().as_ref() {
            Some(observer) => observer.next.clone(),
            None => return,
        };
        next(value);
    }

    /// Delivers an error and ends the subscription.
    pub fn error(&self, error: E) {
        let Some(observer) = self.state.close() else {
            return;
        };
        #[cfg(feature = "tracing")]
        if !observer.handles_error() {
            tracing::debug!("dropping error: subscriber has no error callback");
        }
        (observer.error)(error);
        drop(observer);
        self.state.release();
    }

    /// Signals completion and ends the subscription.
    pub fn complete(&self) {
        let Some(observer) = self.state.close() else {
            return;
        };
        (observer.complete)();
        drop(observer);
        self.state.release();
    }

    /// Returns true once the subscription has ended, or once the downstream
    /// this subscriber relays into has ended.
    ///
    /// Producers emitting in a loop should stop when this turns true.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.state.is_closed()
    }

    /// Builds an observer for an upstream source whose values go through
    /// `next` and whose terminal signals are forwarded to this subscriber.
    ///
    /// This is how operators wrap their downstream: replace `next`, pass
    /// `error` and `complete` through unchanged.
    pub fn relay<A, F>(&self, next: F) -> Observer<A, E>
    where
        A: 'static,
        F: Fn(&Subscriber<T, E>, A) + 'static,
    {
        let on_next = self.clone();
        let on_error = self.clone();
        let on_complete = self.clone();
        let downstream = self.clone();
        Observer::new()
            .with_next(move |value| next(&on_next, value))
            .with_error(move |error| on_error.error(error))
            .with_complete(move || on_complete.complete())
            .with_closed_check(move || downstream.is_closed())
    }

    /// Builds an observer forwarding all three signals to this subscriber.
    pub fn to_observer(&self) -> Observer<T, E> {
        self.relay(|subscriber, value| subscriber.next(value))
    }

    /// Returns the caller-facing handle for this subscription.
    pub(crate) fn subscription(&self) -> Subscription {
        Subscription {
            inner: self.state.clone(),
        }
    }

    /// Stores the teardown returned by the registration function.
    ///
    /// If the subscription (or its downstream) already ended while
    /// registering, the teardown runs immediately instead.
    pub(crate) fn install(&self, teardown: Teardown) {
        if self.is_closed() {
            let observer = self.state.close();
            drop(observer);
            teardown.run();
        } else {
            *self.state.teardown.borrow_mut() = Some(teardown);
        }
    }
}

impl<T, E> Clone for Subscriber<T, E> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<T, E> fmt::Debug for Subscriber<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscriber")
            .field("closed", &self.state.is_closed())
            .finish()
    }
}

/// Handle to a live subscription, returned by `Observable::subscribe`.
///
/// Dropping the handle does not end the subscription; only `unsubscribe`
/// (or a terminal signal from the producer) does.
pub struct Subscription {
    inner: Rc<dyn SubscriptionLike>,
}

impl Subscription {
    /// Stops delivery and runs teardown. Repeated calls are no-ops.
    pub fn unsubscribe(&self) {
        self.inner.unsubscribe();
    }

    /// Returns true once the subscription has ended.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("closed", &self.is_closed())
            .finish()
    }
}
