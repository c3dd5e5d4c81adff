//! Method-style operator application.
//!
//! `source.map(f)` is `source.pipe(map(f))`. The method form lets closure
//! argument types be inferred from the source.

use crate::operators::{delay, filter, map, start_with, take};
use crate::timer::Timer;
use alloc::rc::Rc;
use core::time::Duration;
use rivulet_core::Observable;

/// Operator methods on [`Observable`].
pub trait ObservableExt<T: 'static, E: 'static> {
    /// See [`map`].
    fn map<B, F>(&self, project: F) -> Observable<B, E>
    where
        B: 'static,
        F: Fn(T) -> B + 'static;

    /// See [`filter`].
    fn filter<P>(&self, predicate: P) -> Observable<T, E>
    where
        P: Fn(&T) -> bool + 'static;

    /// See [`start_with`].
    fn start_with(&self, value: T) -> Observable<T, E>
    where
        T: Clone;

    /// See [`take`].
    fn take(&self, count: usize) -> Observable<T, E>;

    /// See [`delay`].
    fn delay(&self, duration: Duration, timer: Rc<dyn Timer>) -> Observable<T, E>;
}

impl<T: 'static, E: 'static> ObservableExt<T, E> for Observable<T, E> {
    fn map<B, F>(&self, project: F) -> Observable<B, E>
    where
        B: 'static,
        F: Fn(T) -> B + 'static,
    {
        self.pipe(map(project))
    }

    fn filter<P>(&self, predicate: P) -> Observable<T, E>
    where
        P: Fn(&T) -> bool + 'static,
    {
        self.pipe(filter(predicate))
    }

    fn start_with(&self, value: T) -> Observable<T, E>
    where
        T: Clone,
    {
        self.pipe(start_with(value))
    }

    fn take(&self, count: usize) -> Observable<T, E> {
        self.pipe(take(count))
    }

    fn delay(&self, duration: Duration, timer: Rc<dyn Timer>) -> Observable<T, E> {
        self.pipe(delay(duration, timer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::ManualTimer;
    use alloc::format;
    use alloc::string::String;
    use alloc::vec;
    use rivulet_core::{Error, Recorder};
    use rivulet_sources::of;

    #[test]
    fn test_ext_chain_infers_types() {
        let recorder = Recorder::new();
        of::<_, Error, _>([5, 4, 3, 2, 1])
            .filter(|x| *x >= 3)
            .map(|x| x * 100)
            .take(2)
            .subscribe(recorder.observer());

        assert_eq!(recorder.values(), vec![500, 400]);
        assert!(recorder.is_completed());
    }

    #[test]
    fn test_ext_big_composition() {
        let recorder = Recorder::<String>::new();
        of([5, 4, 3, 2, 1])
            .map(|x: i32| format!("{}", x))
            .filter(|s| s.as_str() >= "3")
            .start_with(String::from("second"))
            .start_with(String::from("first"))
            .map(|s| format!("The value is {}.", s))
            .subscribe(recorder.observer());

        assert_eq!(
            recorder.values(),
            vec![
                "The value is first.",
                "The value is second.",
                "The value is 5.",
                "The value is 4.",
                "The value is 3.",
            ]
        );
    }

    #[test]
    fn test_ext_delay() {
        let timer = Rc::new(ManualTimer::new());
        let recorder = Recorder::new();
        of::<_, Error, _>([1, 2])
            .delay(Duration::from_millis(10), timer.clone())
            .subscribe(recorder.observer());

        assert!(recorder.is_empty());
        timer.advance(Duration::from_millis(10));
        assert_eq!(recorder.values(), vec![1, 2]);
    }
}
