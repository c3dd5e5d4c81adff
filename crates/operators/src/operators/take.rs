//! Take operator.

use alloc::rc::Rc;
use core::cell::Cell;
use rivulet_core::{Observable, Subscriber, Teardown};

/// Passes the first `count` values, then completes and unsubscribes upstream.
///
/// `take(0)` completes immediately without subscribing to the source. The
/// countdown is per subscription.
///
/// # Example
///
/// ```ignore
/// let first_two = of([1, 2, 3]).pipe(take(2));
/// // Emits: 1, 2, then completes
/// ```
pub fn take<T, E>(count: usize) -> impl Fn(Observable<T, E>) -> Observable<T, E>
where
    T: 'static,
    E: 'static,
{
    move |source: Observable<T, E>| {
        Observable::new(move |subscriber: Subscriber<T, E>| {
            if count == 0 {
                subscriber.complete();
                return Teardown::empty();
            }

            let remaining = Rc::new(Cell::new(count));
            source
                .subscribe(subscriber.relay(move |s, value| {
                    let left = remaining.get();
                    if left == 0 {
                        return;
                    }
                    remaining.set(left - 1);
                    s.next(value);
                    if left == 1 {
                        #[cfg(feature = "tracing")]
                        tracing::trace!(count, "take limit reached");
                        s.complete();
                    }
                }))
                .into()
        })
    }
}
