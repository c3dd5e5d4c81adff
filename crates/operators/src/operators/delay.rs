//! Delay operator.

use crate::timer::{Timer, TimerHandle};
use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::time::Duration;
use hashbrown::HashMap;
use rivulet_core::{Observable, Observer, Subscriber, Teardown};

/// Timers scheduled by one subscription that have not fired yet.
struct PendingTimers {
    timer: Rc<dyn Timer>,
    delay: Duration,
    next_key: Cell<u64>,
    handles: RefCell<HashMap<u64, TimerHandle>>,
}

impl PendingTimers {
    fn new(timer: Rc<dyn Timer>, delay: Duration) -> Rc<Self> {
        Rc::new(Self {
            timer,
            delay,
            next_key: Cell::new(0),
            handles: RefCell::new(HashMap::new()),
        })
    }

    /// Schedules `fire` after the delay and tracks the handle until it runs.
    fn schedule<F>(self: &Rc<Self>, fire: F)
    where
        F: FnOnce() + 'static,
    {
        let key = self.next_key.get();
        self.next_key.set(key + 1);

        let pending = Rc::downgrade(self);
        let handle = self.timer.schedule(
            self.delay,
            Box::new(move || {
                if let Some(pending) = pending.upgrade() {
                    pending.handles.borrow_mut().remove(&key);
                }
                fire();
            }),
        );
        self.handles.borrow_mut().insert(key, handle);
    }

    /// Cancels every timer that has not fired.
    fn cancel_all(&self) {
        let handles: Vec<TimerHandle> = self
            .handles
            .borrow_mut()
            .drain()
            .map(|(_, handle)| handle)
            .collect();

        #[cfg(feature = "tracing")]
        tracing::trace!(cancelled = handles.len(), "cancelling delayed emissions");

        for handle in handles {
            self.timer.cancel(handle);
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.handles.borrow().len()
    }
}

/// Shifts every value and the completion signal by `duration`.
///
/// Values keep their relative order. Errors are forwarded immediately, which
/// ends the subscription and cancels whatever is still pending. Unsubscribing
/// cancels every pending timer and then unsubscribes upstream.
///
/// # Example
///
/// ```ignore
/// let timer = Rc::new(ManualTimer::new());
/// let later = of([1, 2, 3]).pipe(delay(Duration::from_millis(10), timer.clone()));
/// later.subscribe(recorder.observer());   // nothing yet
/// timer.advance(Duration::from_millis(10)); // 1, 2, 3, complete
/// ```
pub fn delay<T, E>(
    duration: Duration,
    timer: Rc<dyn Timer>,
) -> impl Fn(Observable<T, E>) -> Observable<T, E>
where
    T: 'static,
    E: 'static,
{
    move |source: Observable<T, E>| {
        let timer = timer.clone();
        Observable::new(move |subscriber: Subscriber<T, E>| {
            let pending = PendingTimers::new(timer.clone(), duration);

            let on_next = (pending.clone(), subscriber.clone());
            let on_error = subscriber.clone();
            let on_complete = (pending.clone(), subscriber.clone());
            let downstream = subscriber.clone();
            let observer = Observer::new()
                .with_next(move |value| {
                    let subscriber = on_next.1.clone();
                    on_next.0.schedule(move || subscriber.next(value));
                })
                .with_error(move |error| on_error.error(error))
                .with_complete(move || {
                    let subscriber = on_complete.1.clone();
                    on_complete.0.schedule(move || subscriber.complete());
                })
                .with_closed_check(move || downstream.is_closed());

            let upstream = source.subscribe(observer);
            Teardown::new(move || {
                pending.cancel_all();
                upstream.unsubscribe();
            })
        })
    }
}
