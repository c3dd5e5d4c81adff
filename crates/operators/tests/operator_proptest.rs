//! Property-based tests for operator laws.
//!
//! These tests check that operators agree with the equivalent iterator
//! adapters for arbitrary inputs, and that lifecycle guarantees survive
//! composition.

use proptest::prelude::*;
use rivulet_core::{pipe, Error, Observable, Recorder, Subscriber, Teardown};
use rivulet_operators::{delay, filter, map, start_with, take, ManualTimer};
use rivulet_sources::of;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

/// Strategy for generating a list of values.
fn values_strategy() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(-1000i32..1000, 0..50)
}

/// Source that counts how often its teardown runs.
fn counted(values: Vec<i32>, teardowns: Rc<Cell<u32>>) -> Observable<i32> {
    Observable::new(move |subscriber: Subscriber<i32>| {
        for v in values.iter() {
            if subscriber.is_closed() {
                break;
            }
            subscriber.next(*v);
        }
        subscriber.complete();
        let teardowns = teardowns.clone();
        Teardown::new(move || teardowns.set(teardowns.get() + 1))
    })
}

proptest! {
    /// Property: map then filter behaves like the iterator adapters.
    #[test]
    fn map_filter_match_iterators(values in values_strategy(), offset in -10i32..10) {
        let recorder = Recorder::new();
        let source = of::<_, Error, _>(values.clone());
        pipe!(source, map(move |x: i32| x + offset), filter(|x: &i32| x % 3 == 0))
            .subscribe(recorder.observer());

        let expected: Vec<i32> = values.iter().map(|x| x + offset).filter(|x| x % 3 == 0).collect();
        prop_assert_eq!(recorder.values(), expected);
        prop_assert!(recorder.is_completed());
    }

    /// Property: take(n) is a prefix of length min(n, len), always completed.
    #[test]
    fn take_is_prefix(values in values_strategy(), count in 0usize..60) {
        let teardowns = Rc::new(Cell::new(0));
        let recorder = Recorder::new();
        counted(values.clone(), teardowns.clone())
            .pipe(take(count))
            .subscribe(recorder.observer());

        let expected: Vec<i32> = values.iter().copied().take(count).collect();
        prop_assert_eq!(recorder.values(), expected);
        prop_assert!(recorder.is_completed());
        prop_assert_eq!(teardowns.get(), if count == 0 { 0 } else { 1 });
    }

    /// Property: start_with prepends exactly one value.
    #[test]
    fn start_with_prepends(values in values_strategy(), first in any::<i32>()) {
        let recorder = Recorder::new();
        of::<_, Error, _>(values.clone())
            .pipe(start_with(first))
            .subscribe(recorder.observer());

        let mut expected = vec![first];
        expected.extend(values.iter().copied());
        prop_assert_eq!(recorder.values(), expected);
    }

    /// Property: a fixed delay preserves order and delivers nothing early.
    #[test]
    fn delay_preserves_order(values in values_strategy(), millis in 1u64..100) {
        let timer = Rc::new(ManualTimer::new());
        let recorder = Recorder::new();
        of::<_, Error, _>(values.clone())
            .pipe(delay(Duration::from_millis(millis), timer.clone()))
            .subscribe(recorder.observer());

        timer.advance(Duration::from_millis(millis - 1));
        prop_assert!(recorder.is_empty());

        timer.advance(Duration::from_millis(1));
        prop_assert_eq!(recorder.values(), values);
        prop_assert!(recorder.is_completed());
        prop_assert_eq!(timer.pending(), 0);
    }

    /// Property: unsubscribing a composed pipeline tears the source down once.
    #[test]
    fn composed_unsubscribe_tears_down_once(depth in 1usize..6) {
        let teardowns = Rc::new(Cell::new(0));
        let teardowns_clone = teardowns.clone();
        let mut piped = Observable::<i32>::new(move |_| {
            let teardowns = teardowns_clone.clone();
            Teardown::new(move || teardowns.set(teardowns.get() + 1))
        });
        for _ in 0..depth {
            piped = piped.pipe(map(|x: i32| x));
        }

        let subscription = piped.subscribe(Recorder::new().observer());
        prop_assert_eq!(teardowns.get(), 0);

        subscription.unsubscribe();
        subscription.unsubscribe();
        prop_assert_eq!(teardowns.get(), 1);
    }
}
