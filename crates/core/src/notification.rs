//! Recorded signals.
//!
//! `Recorder` collects everything a subscription delivers, in order. It is the
//! simplest way to assert on a pipeline without hand-writing callbacks.

use crate::observer::Observer;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

/// One signal delivered to an observer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification<T, E = crate::Error> {
    /// A value.
    Next(T),
    /// The error signal.
    Error(E),
    /// The completion signal.
    Complete,
}

impl<T, E> Notification<T, E> {
    /// Returns true for `Error` and `Complete`.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Notification::Next(_))
    }
}

/// Records every signal delivered to the observers it hands out.
///
/// # Example
///
/// ```ignore
/// let recorder = Recorder::new();
/// source.subscribe(recorder.observer());
/// assert_eq!(recorder.values(), vec![1, 2, 3]);
/// assert!(recorder.is_completed());
/// ```
#[derive(Debug)]
pub struct Recorder<T, E = crate::Error> {
    log: Rc<RefCell<Vec<Notification<T, E>>>>,
}

impl<T: 'static, E: 'static> Recorder<T, E> {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self {
            log: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Returns an observer appending to this recorder's log.
    pub fn observer(&self) -> Observer<T, E> {
        let on_next = self.log.clone();
        let on_error = self.log.clone();
        let on_complete = self.log.clone();
        Observer::new()
            .with_next(move |value| on_next.borrow_mut().push(Notification::Next(value)))
            .with_error(move |error| on_error.borrow_mut().push(Notification::Error(error)))
            .with_complete(move || on_complete.borrow_mut().push(Notification::Complete))
    }

    /// Returns the number of recorded signals.
    #[inline]
    pub fn len(&self) -> usize {
        self.log.borrow().len()
    }

    /// Returns true if nothing was recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.log.borrow().is_empty()
    }

    /// Returns true if a completion was recorded.
    pub fn is_completed(&self) -> bool {
        self.log
            .borrow()
            .iter()
            .any(|n| matches!(n, Notification::Complete))
    }

    /// Returns true if an error or completion was recorded.
    pub fn is_terminated(&self) -> bool {
        self.log.borrow().iter().any(Notification::is_terminal)
    }

    /// Clears the log.
    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }
}

impl<T: Clone + 'static, E: Clone + 'static> Recorder<T, E> {
    /// Returns every recorded signal, in delivery order.
    pub fn notifications(&self) -> Vec<Notification<T, E>> {
        self.log.borrow().clone()
    }

    /// Returns the recorded values, in delivery order.
    pub fn values(&self) -> Vec<T> {
        self.log
            .borrow()
            .iter()
            .filter_map(|n| match n {
                Notification::Next(value) => Some(value.clone()),
                _ => None,
            })
            .collect()
    }

    /// Returns the recorded error, if any.
    pub fn error(&self) -> Option<E> {
        self.log.borrow().iter().find_map(|n| match n {
            Notification::Error(error) => Some(error.clone()),
            _ => None,
        })
    }
}

impl<T: 'static, E: 'static> Default for Recorder<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> Clone for Recorder<T, E> {
    fn clone(&self) -> Self {
        Self {
            log: self.log.clone(),
        }
    }
}
