//! Map operator.

use alloc::rc::Rc;
use rivulet_core::{Observable, Subscriber};

/// Transforms every value with `project`.
///
/// Errors and completion pass through unchanged.
///
/// # Example
///
/// ```ignore
/// let doubled = of([1, 2, 3]).pipe(map(|x: i32| x * 2));
/// // Emits: 2, 4, 6
/// ```
pub fn map<A, B, E, F>(project: F) -> impl Fn(Observable<A, E>) -> Observable<B, E>
where
    A: 'static,
    B: 'static,
    E: 'static,
    F: Fn(A) -> B + 'static,
{
    let project = Rc::new(project);
    move |source: Observable<A, E>| {
        let project = project.clone();
        Observable::new(move |subscriber: Subscriber<B, E>| {
            let project = project.clone();
            source.subscribe(subscriber.relay(move |s, value| s.next(project(value))))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::{String, ToString};
    use alloc::vec;
    use core::cell::Cell;
    use rivulet_core::{Error, Notification, Recorder};
    use rivulet_sources::{of, throw_error};

    #[test]
    fn test_map_transforms_values() {
        let recorder = Recorder::new();
        of::<_, Error, _>([1, 2, 3])
            .pipe(map(|x: i32| x * 10))
            .subscribe(recorder.observer());

        assert_eq!(
            recorder.notifications(),
            vec![
                Notification::Next(10),
                Notification::Next(20),
                Notification::Next(30),
                Notification::Complete,
            ]
        );
    }

    #[test]
    fn test_map_changes_type() {
        let recorder = Recorder::<String>::new();
        of([1, 2])
            .pipe(map(|x: i32| x.to_string()))
            .subscribe(recorder.observer());

        assert_eq!(recorder.values(), vec![String::from("1"), String::from("2")]);
    }

    #[test]
    fn test_map_forwards_error() {
        let recorder = Recorder::<i32>::new();
        throw_error(Error::producer("upstream"))
            .pipe(map(|x: i32| x + 1))
            .subscribe(recorder.observer());

        assert_eq!(
            recorder.notifications(),
            vec![Notification::Error(Error::producer("upstream"))]
        );
    }

    #[test]
    fn test_map_runs_per_subscription() {
        let calls = Rc::new(Cell::new(0));
        let calls_clone = calls.clone();
        let mapped = of::<_, Error, _>([1, 2]).pipe(map(move |x: i32| {
            calls_clone.set(calls_clone.get() + 1);
            x
        }));
        assert_eq!(calls.get(), 0);

        mapped.subscribe(Recorder::new().observer());
        mapped.subscribe(Recorder::new().observer());
        assert_eq!(calls.get(), 4);
    }
}
