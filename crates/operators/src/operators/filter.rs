//! Filter operator.

use alloc::rc::Rc;
use rivulet_core::{Observable, Subscriber};

/// Passes only the values for which `predicate` returns true.
///
/// Errors and completion pass through unchanged.
pub fn filter<T, E, P>(predicate: P) -> impl Fn(Observable<T, E>) -> Observable<T, E>
where
    T: 'static,
    E: 'static,
    P: Fn(&T) -> bool + 'static,
{
    let predicate = Rc::new(predicate);
    move |source: Observable<T, E>| {
        let predicate = predicate.clone();
        Observable::new(move |subscriber: Subscriber<T, E>| {
            let predicate = predicate.clone();
            source.subscribe(subscriber.relay(move |s, value| {
                if predicate(&value) {
                    s.next(value);
                }
            }))
        })
    }
}
