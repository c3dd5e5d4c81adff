//! Observable descriptions and composition.
//!
//! An `Observable` is an immutable description of how to produce a stream. It
//! owns no running state: every `subscribe` call runs the registration
//! function from scratch against a fresh `Subscriber` ("cold" semantics).
//!
//! Operators are plain functions `Observable<A, E> -> Observable<B, E>` and are
//! chained with [`Observable::pipe`] or the [`pipe!`](crate::pipe) macro.

use crate::observer::Observer;
use crate::subscription::{Subscriber, Subscription};
use crate::teardown::Teardown;
use alloc::rc::Rc;
use core::fmt;

type RegisterFn<T, E> = dyn Fn(Subscriber<T, E>) -> Teardown;

/// A lazy, reusable description of a push-based stream.
///
/// Cloning an `Observable` clones the description, not a running stream.
///
/// # Example
///
/// ```ignore
/// use rivulet_core::{Observable, Observer, Teardown};
///
/// let numbers = Observable::<i32>::new(|subscriber| {
///     subscriber.next(1);
///     subscriber.next(2);
///     subscriber.complete();
///     Teardown::new(|| println!("released"))
/// });
///
/// // Nothing has run yet. Each subscribe runs the registration function.
/// let subscription = numbers.subscribe(
///     Observer::from_next(|v| println!("got {}", v)),
/// );
/// assert!(subscription.is_closed());
/// ```
pub struct Observable<T, E = crate::Error> {
    register: Rc<RegisterFn<T, E>>,
}

impl<T: 'static, E: 'static> Observable<T, E> {
    /// Creates an observable from a registration function.
    ///
    /// The function receives the guarded subscriber and returns its teardown:
    /// `()` for none, a `Subscription` to unsubscribe, or a [`Teardown`].
    /// It is not called until something subscribes.
    pub fn new<F, R>(register: F) -> Self
    where
        F: Fn(Subscriber<T, E>) -> R + 'static,
        R: Into<Teardown>,
    {
        Self {
            register: Rc::new(move |subscriber: Subscriber<T, E>| -> Teardown {
                register(subscriber).into()
            }),
        }
    }

    /// Materializes the description for one observer.
    ///
    /// Runs the registration function synchronously. If the producer
    /// terminates before returning its teardown, the teardown runs as soon as
    /// it is returned.
    pub fn subscribe(&self, observer: Observer<T, E>) -> Subscription {
        #[cfg(feature = "tracing")]
        tracing::trace!(
            value = core::any::type_name::<T>(),
            "subscribing"
        );

        let subscriber = Subscriber::new(observer);
        let teardown = (self.register)(subscriber.clone());
        subscriber.install(teardown);
        subscriber.subscription()
    }

    /// Subscribes with only a value callback.
    pub fn subscribe_next<F>(&self, next: F) -> Subscription
    where
        F: Fn(T) + 'static,
    {
        self.subscribe(Observer::from_next(next))
    }

    /// Applies one operator, returning the composed description.
    ///
    /// The receiver is not modified and stays independently subscribable.
    pub fn pipe<B, Op>(&self, operator: Op) -> Observable<B, E>
    where
        Op: OperatorFunction<T, B, E>,
    {
        operator.apply(self.clone())
    }
}

impl<T, E> Clone for Observable<T, E> {
    fn clone(&self) -> Self {
        Self {
            register: self.register.clone(),
        }
    }
}

impl<T, E> fmt::Debug for Observable<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable").finish_non_exhaustive()
    }
}

/// Creates an observable from a registration function.
///
/// Same as [`Observable::new`].
pub fn create<T, E, F, R>(register: F) -> Observable<T, E>
where
    T: 'static,
    E: 'static,
    F: Fn(Subscriber<T, E>) -> R + 'static,
    R: Into<Teardown>,
{
    Observable::new(register)
}

/// A transformation from one stream description to another.
///
/// Implemented for every `Fn(Observable<A, E>) -> Observable<B, E>`, which is
/// what the operator factories return.
pub trait OperatorFunction<A, B, E = crate::Error> {
    /// Wraps `source` in a new description.
    fn apply(&self, source: Observable<A, E>) -> Observable<B, E>;
}

impl<A, B, E, F> OperatorFunction<A, B, E> for F
where
    F: Fn(Observable<A, E>) -> Observable<B, E>,
{
    #[inline]
    fn apply(&self, source: Observable<A, E>) -> Observable<B, E> {
        self(source)
    }
}

/// Applies operators left to right.
///
/// `pipe!(source, a, b, c)` is `source.pipe(a).pipe(b).pipe(c)`. The source is
/// borrowed, not consumed.
///
/// ```ignore
/// let evens_plus_one = pipe!(numbers, filter(|x: &i32| x % 2 == 0), map(|x| x + 1));
/// ```
#[macro_export]
macro_rules! pipe {
    ($source:expr $(,)?) => {
        ::core::clone::Clone::clone(&$source)
    };
    ($source:expr, $first:expr $(, $rest:expr)* $(,)?) => {{
        let piped = $source.pipe($first);
        $(
            let piped = piped.pipe($rest);
        )*
        piped
    }};
}
