//! Synchronous sources.
//!
//! All of these emit inside the registration function, so everything is
//! delivered before `subscribe` returns.

use alloc::rc::Rc;
use alloc::vec::Vec;
use rivulet_core::{Observable, Subscriber};

/// Emits each value in order, then completes.
///
/// Values are stored once and cloned for every subscription. Emission stops
/// early if the subscriber closes part way through.
///
/// # Example
///
/// ```ignore
/// let numbers = of([1, 2, 3]);
/// numbers.subscribe(Observer::from_next(|v| println!("{}", v)));
/// ```
pub fn of<T, E, I>(values: I) -> Observable<T, E>
where
    T: Clone + 'static,
    E: 'static,
    I: IntoIterator<Item = T>,
{
    let values: Rc<[T]> = values.into_iter().collect::<Vec<_>>().into();
    Observable::new(move |subscriber: Subscriber<T, E>| {
        for value in values.iter() {
            if subscriber.is_closed() {
                return;
            }
            subscriber.next(value.clone());
        }
        subscriber.complete();
    })
}

/// Completes immediately without emitting.
pub fn empty<T: 'static, E: 'static>() -> Observable<T, E> {
    Observable::new(|subscriber: Subscriber<T, E>| subscriber.complete())
}

/// Never emits and never terminates.
pub fn never<T: 'static, E: 'static>() -> Observable<T, E> {
    Observable::new(|_: Subscriber<T, E>| {})
}

/// Errors immediately with a clone of `error`.
pub fn throw_error<T, E>(error: E) -> Observable<T, E>
where
    T: 'static,
    E: Clone + 'static,
{
    Observable::new(move |subscriber: Subscriber<T, E>| subscriber.error(error.clone()))
}
