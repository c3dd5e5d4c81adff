//! Timer facility used by time-based operators.
//!
//! `Timer` is the schedule/cancel contract. `ManualTimer` implements it with a
//! virtual clock that only moves when told to, which makes time-based
//! pipelines deterministic.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use core::cell::RefCell;
use core::fmt;
use core::time::Duration;
use hashbrown::HashMap;

/// Opaque handle to a scheduled callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// Schedule-after-delay and cancel primitives.
pub trait Timer {
    /// Runs `callback` once, after `delay`.
    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> TimerHandle;

    /// Cancels a scheduled callback. Unknown or already fired handles are
    /// ignored.
    fn cancel(&self, handle: TimerHandle);
}

struct TimerState {
    now: Duration,
    next_id: u64,
    /// (deadline, id) -> callback. Ids break ties in scheduling order.
    queue: BTreeMap<(Duration, u64), Box<dyn FnOnce()>>,
    /// id -> deadline, for cancellation.
    deadlines: HashMap<u64, Duration>,
}

/// A timer driven by an explicit virtual clock.
///
/// # Example
///
/// ```ignore
/// let timer = ManualTimer::new();
/// timer.schedule(Duration::from_millis(10), Box::new(|| println!("fired")));
/// timer.advance(Duration::from_millis(5));  // nothing
/// timer.advance(Duration::from_millis(5));  // fired
/// ```
pub struct ManualTimer {
    state: RefCell<TimerState>,
}

impl ManualTimer {
    /// Creates a timer with the clock at zero.
    pub fn new() -> Self {
        Self {
            state: RefCell::new(TimerState {
                now: Duration::ZERO,
                next_id: 0,
                queue: BTreeMap::new(),
                deadlines: HashMap::new(),
            }),
        }
    }

    /// Returns the current virtual time.
    #[inline]
    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    /// Returns the number of scheduled callbacks that have not fired.
    #[inline]
    pub fn pending(&self) -> usize {
        self.state.borrow().queue.len()
    }

    /// Moves the clock forward, firing every callback that comes due.
    ///
    /// Callbacks fire in deadline order, ties in scheduling order, each with
    /// the clock set to its own deadline. Callbacks may schedule or cancel
    /// other timers; newly scheduled ones fire too if they fall due before
    /// the target time. Returns the number of callbacks fired.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now().saturating_add(by);
        let mut fired = 0;

        loop {
            let callback = {
                let mut state = self.state.borrow_mut();
                let Some(&(deadline, id)) = state.queue.keys().next() else {
                    break;
                };
                if deadline > target {
                    break;
                }
                state.deadlines.remove(&id);
                state.now = deadline;
                state.queue.remove(&(deadline, id))
            };
            if let Some(callback) = callback {
                callback();
                fired += 1;
            }
        }

        let mut state = self.state.borrow_mut();
        if state.now < target {
            state.now = target;
        }
        fired
    }
}

impl Timer for ManualTimer {
    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> TimerHandle {
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;

        let deadline = state.now.saturating_add(delay);
        state.queue.insert((deadline, id), callback);
        state.deadlines.insert(id, deadline);
        TimerHandle(id)
    }

    fn cancel(&self, handle: TimerHandle) {
        let removed = {
            let mut state = self.state.borrow_mut();
            match state.deadlines.remove(&handle.0) {
                Some(deadline) => state.queue.remove(&(deadline, handle.0)),
                None => None,
            }
        };
        // Dropped outside the borrow: the callback may own handles to this timer.
        drop(removed);
    }
}

impl Default for ManualTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ManualTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualTimer")
            .field("now", &self.now())
            .field("pending", &self.pending())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;
    use alloc::vec::Vec;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn push(log: &Rc<RefCell<Vec<u32>>>, tag: u32) -> Box<dyn FnOnce()> {
        let log = log.clone();
        Box::new(move || log.borrow_mut().push(tag))
    }

    #[test]
    fn test_manual_timer_fires_when_due() {
        let timer = ManualTimer::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        timer.schedule(ms(10), push(&log, 1));
        assert_eq!(timer.advance(ms(9)), 0);
        assert!(log.borrow().is_empty());

        assert_eq!(timer.advance(ms(1)), 1);
        assert_eq!(*log.borrow(), vec![1]);
        assert_eq!(timer.now(), ms(10));
        assert_eq!(timer.pending(), 0);
    }

    #[test]
    fn test_manual_timer_orders_by_deadline_then_schedule() {
        let timer = ManualTimer::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        timer.schedule(ms(20), push(&log, 1));
        timer.schedule(ms(10), push(&log, 2));
        timer.schedule(ms(10), push(&log, 3));

        assert_eq!(timer.advance(ms(30)), 3);
        assert_eq!(*log.borrow(), vec![2, 3, 1]);
    }

    #[test]
    fn test_manual_timer_cancel() {
        let timer = ManualTimer::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let handle = timer.schedule(ms(10), push(&log, 1));
        timer.schedule(ms(10), push(&log, 2));
        timer.cancel(handle);
        timer.cancel(handle);

        assert_eq!(timer.pending(), 1);
        timer.advance(ms(10));
        assert_eq!(*log.borrow(), vec![2]);

        // Cancelling a fired handle is a no-op.
        timer.cancel(handle);
    }

    #[test]
    fn test_manual_timer_nested_schedule() {
        let timer = Rc::new(ManualTimer::new());
        let log = Rc::new(RefCell::new(Vec::new()));

        let inner_timer = timer.clone();
        let inner_log = log.clone();
        timer.schedule(
            ms(5),
            Box::new(move || {
                inner_log.borrow_mut().push(inner_timer.now().as_millis() as u32);
                let log = inner_log.clone();
                let clock = inner_timer.clone();
                inner_timer.schedule(
                    ms(5),
                    Box::new(move || log.borrow_mut().push(clock.now().as_millis() as u32)),
                );
            }),
        );

        assert_eq!(timer.advance(ms(20)), 2);
        assert_eq!(*log.borrow(), vec![5, 10]);
        assert_eq!(timer.now(), ms(20));
    }
}
