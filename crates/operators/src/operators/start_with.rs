//! StartWith operator.

use rivulet_core::{Observable, Subscriber, Teardown};

/// Emits `value` first, then everything from the source.
///
/// The prepended value is delivered before the source is subscribed. If the
/// subscription ends while handling it, the source is never subscribed.
pub fn start_with<T, E>(value: T) -> impl Fn(Observable<T, E>) -> Observable<T, E>
where
    T: Clone + 'static,
    E: 'static,
{
    move |source: Observable<T, E>| {
        let value = value.clone();
        Observable::new(move |subscriber: Subscriber<T, E>| {
            subscriber.next(value.clone());
            if subscriber.is_closed() {
                return Teardown::empty();
            }
            source.subscribe(subscriber.to_observer()).into()
        })
    }
}
