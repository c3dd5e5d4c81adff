//! Partial observers supplied at subscription time.

use alloc::rc::Rc;
use core::fmt;

/// Callback for values.
pub type NextFn<T> = Rc<dyn Fn(T)>;
/// Callback for the error signal.
pub type ErrorFn<E> = Rc<dyn Fn(E)>;
/// Callback for the completion signal.
pub type CompleteFn = Rc<dyn Fn()>;
/// Reports whether the consumer behind an observer has gone away.
pub type ClosedCheckFn = Rc<dyn Fn() -> bool>;

/// The three-callback sink handed to `subscribe`.
///
/// Every callback is optional. Missing callbacks are filled with no-ops at
/// construction, so delivery never has to check for presence. Omitting the
/// error callback means errors are dropped.
///
/// # Example
///
/// ```ignore
/// use rivulet_core::Observer;
///
/// let observer = Observer::<i32>::new()
///     .with_next(|value| println!("value: {}", value))
///     .with_complete(|| println!("done"));
/// ```
pub struct Observer<T, E = crate::Error> {
    pub(crate) next: NextFn<T>,
    pub(crate) error: ErrorFn<E>,
    pub(crate) complete: CompleteFn,
    pub(crate) closed_check: Option<ClosedCheckFn>,
    pub(crate) handles_error: bool,
}

impl<T: 'static, E: 'static> Observer<T, E> {
    /// Creates an observer that ignores every signal.
    pub fn new() -> Self {
        Self {
            next: Rc::new(|_| {}),
            error: Rc::new(|_| {}),
            complete: Rc::new(|| {}),
            closed_check: None,
            handles_error: false,
        }
    }

    /// Creates an observer that only listens to values.
    pub fn from_next<F>(next: F) -> Self
    where
        F: Fn(T) + 'static,
    {
        Self::new().with_next(next)
    }

    /// Sets the value callback.
    pub fn with_next<F>(mut self, next: F) -> Self
    where
        F: Fn(T) + 'static,
    {
        self.next = Rc::new(next);
        self
    }

    /// Sets the error callback.
    pub fn with_error<F>(mut self, error: F) -> Self
    where
        F: Fn(E) + 'static,
    {
        self.error = Rc::new(error);
        self.handles_error = true;
        self
    }

    /// Sets the completion callback.
    pub fn with_complete<F>(mut self, complete: F) -> Self
    where
        F: Fn() + 'static,
    {
        self.complete = Rc::new(complete);
        self
    }

    /// Sets a check reporting that whoever consumes this observer is gone.
    ///
    /// A subscription built on this observer reports itself closed as soon as
    /// the check returns true, even before its own terminal signal. Operators
    /// use it so a producer still inside its registration function can see
    /// that the downstream already finished.
    pub fn with_closed_check<F>(mut self, closed_check: F) -> Self
    where
        F: Fn() -> bool + 'static,
    {
        self.closed_check = Some(Rc::new(closed_check));
        self
    }

    /// Returns true if the consumer behind this observer is gone.
    #[inline]
    pub fn is_consumer_closed(&self) -> bool {
        self.closed_check.as_ref().map_or(false, |check| check())
    }

    /// Returns true if an error callback was supplied.
    #[inline]
    pub fn handles_error(&self) -> bool {
        self.handles_error
    }
}

impl<T: 'static, E: 'static> Default for Observer<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> Clone for Observer<T, E> {
    fn clone(&self) -> Self {
        Self {
            next: self.next.clone(),
            error: self.error.clone(),
            complete: self.complete.clone(),
            closed_check: self.closed_check.clone(),
            handles_error: self.handles_error,
        }
    }
}

impl<T, E> fmt::Debug for Observer<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observer")
            .field("handles_error", &self.handles_error)
            .finish_non_exhaustive()
    }
}
