//! Promise-like producers.
//!
//! `Thenable` is the contract `from_promise` needs: register one continuation
//! for success and one for failure, and settle exactly once. `Promise` is a
//! single-threaded implementation of it.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;
use core::mem;
use rivulet_core::{Observable, Subscriber};

/// Continuation run with the fulfilled value.
pub type OnFulfilled<T> = Box<dyn FnOnce(T)>;
/// Continuation run with the rejection reason.
pub type OnRejected<E> = Box<dyn FnOnce(E)>;

/// A value that settles once, either fulfilled or rejected.
pub trait Thenable<T, E> {
    /// Registers continuations. Exactly one of them runs, once.
    fn then(&self, on_fulfilled: OnFulfilled<T>, on_rejected: OnRejected<E>);
}

enum PromiseState<T, E> {
    Pending(Vec<(OnFulfilled<T>, OnRejected<E>)>),
    Fulfilled(T),
    Rejected(E),
}

/// A single-threaded promise.
///
/// Continuations registered while pending run in registration order on the
/// stack of the settling call. Continuations registered after settlement run
/// immediately. Cloning yields another handle to the same promise.
///
/// # Example
///
/// ```ignore
/// let (promise, resolver) = Promise::<i32>::pending();
/// let subscription = from_promise(promise).subscribe(recorder.observer());
/// resolver.resolve(42); // recorder sees Next(42), Complete
/// ```
pub struct Promise<T, E = rivulet_core::Error> {
    state: Rc<RefCell<PromiseState<T, E>>>,
}

/// The settling side of a pending [`Promise`].
pub struct Resolver<T, E = rivulet_core::Error> {
    state: Rc<RefCell<PromiseState<T, E>>>,
}

impl<T, E> Promise<T, E> {
    /// Creates a pending promise and its resolver.
    pub fn pending() -> (Self, Resolver<T, E>) {
        let state = Rc::new(RefCell::new(PromiseState::Pending(Vec::new())));
        (
            Self {
                state: state.clone(),
            },
            Resolver { state },
        )
    }

    /// Creates an already fulfilled promise.
    pub fn resolved(value: T) -> Self {
        Self {
            state: Rc::new(RefCell::new(PromiseState::Fulfilled(value))),
        }
    }

    /// Creates an already rejected promise.
    pub fn rejected(reason: E) -> Self {
        Self {
            state: Rc::new(RefCell::new(PromiseState::Rejected(reason))),
        }
    }

    /// Returns true once fulfilled or rejected.
    pub fn is_settled(&self) -> bool {
        !matches!(*self.state.borrow(), PromiseState::Pending(_))
    }

    /// Returns the number of continuations waiting for settlement.
    pub fn waiting(&self) -> usize {
        match &*self.state.borrow() {
            PromiseState::Pending(waiters) => waiters.len(),
            _ => 0,
        }
    }
}

impl<T: Clone, E: Clone> Thenable<T, E> for Promise<T, E> {
    fn then(&self, on_fulfilled: OnFulfilled<T>, on_rejected: OnRejected<E>) {
        let settled = match &mut *self.state.borrow_mut() {
            PromiseState::Pending(waiters) => {
                waiters.push((on_fulfilled, on_rejected));
                return;
            }
            PromiseState::Fulfilled(value) => Ok(value.clone()),
            PromiseState::Rejected(reason) => Err(reason.clone()),
        };
        match settled {
            Ok(value) => on_fulfilled(value),
            Err(reason) => on_rejected(reason),
        }
    }
}

impl<T, E> Clone for Promise<T, E> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<T, E> fmt::Debug for Promise<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Promise")
            .field("settled", &self.is_settled())
            .finish()
    }
}

impl<T: Clone, E: Clone> Resolver<T, E> {
    /// Fulfills the promise. Returns false if it was already settled.
    pub fn resolve(&self, value: T) -> bool {
        let Some(waiters) = self.settle(PromiseState::Fulfilled(value.clone())) else {
            return false;
        };
        for (on_fulfilled, _) in waiters {
            on_fulfilled(value.clone());
        }
        true
    }

    /// Rejects the promise. Returns false if it was already settled.
    pub fn reject(&self, reason: E) -> bool {
        let Some(waiters) = self.settle(PromiseState::Rejected(reason.clone())) else {
            return false;
        };
        for (_, on_rejected) in waiters {
            on_rejected(reason.clone());
        }
        true
    }

    /// Stores the outcome and hands back the waiters, if still pending.
    fn settle(&self, outcome: PromiseState<T, E>) -> Option<Vec<(OnFulfilled<T>, OnRejected<E>)>> {
        let mut state = self.state.borrow_mut();
        if !matches!(*state, PromiseState::Pending(_)) {
            return None;
        }
        match mem::replace(&mut *state, outcome) {
            PromiseState::Pending(waiters) => Some(waiters),
            _ => None,
        }
    }
}

impl<T, E> fmt::Debug for Resolver<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver").finish_non_exhaustive()
    }
}

/// Emits the promise's value then completes, or errors with its rejection.
///
/// Every subscription attaches its own continuations. There is nothing to
/// release: unsubscribing only stops delivery.
pub fn from_promise<T, E, P>(promise: P) -> Observable<T, E>
where
    T: 'static,
    E: 'static,
    P: Thenable<T, E> + 'static,
{
    Observable::new(move |subscriber: Subscriber<T, E>| {
        let on_value = subscriber.clone();
        promise.then(
            Box::new(move |value| {
                on_value.next(value);
                on_value.complete();
            }),
            Box::new(move |reason| subscriber.error(reason)),
        );
    })
}
