//! Rivulet Core - Lazy, push-based observable streams.
//!
//! This crate implements the subscription lifecycle for cold observables. An
//! `Observable` is a reusable description; subscribing runs its registration
//! function against a fresh, guarded `Subscriber` and returns a
//! `Subscription`.
//!
//! # Core Concepts
//!
//! - `Observable`: immutable description with `subscribe` and `pipe`
//! - `Observer`: partial three-callback sink (`next`, `error`, `complete`)
//! - `Subscriber`: the guarded observer a producer emits into
//! - `Subscription`: handle with an idempotent `unsubscribe`
//! - `Teardown`: release action run exactly once when a subscription ends
//! - `OperatorFunction`: `Observable<A, E> -> Observable<B, E>` transformation
//!
//! # Guarantees
//!
//! - Registration runs once per `subscribe`, never at construction.
//! - `error`/`complete` fire at most once and exclude each other.
//! - Nothing is delivered after termination or unsubscription.
//! - Teardown runs exactly once on every exit path.
//!
//! # Example
//!
//! ```ignore
//! use rivulet_core::{Observable, Observer, Teardown};
//!
//! let ticks = Observable::<u32>::new(|subscriber| {
//!     subscriber.next(1);
//!     subscriber.next(2);
//!     subscriber.complete();
//!     Teardown::new(|| println!("released"))
//! });
//!
//! let subscription = ticks.subscribe(
//!     Observer::new()
//!         .with_next(|v| println!("tick {}", v))
//!         .with_complete(|| println!("done")),
//! );
//! subscription.unsubscribe(); // no-op, already completed
//! ```

#![no_std]

extern crate alloc;

mod error;
pub mod notification;
pub mod observable;
pub mod observer;
pub mod subscription;
mod teardown;

pub use error::{Error, Result};
pub use notification::{Notification, Recorder};
pub use observable::{create, Observable, OperatorFunction};
pub use observer::Observer;
pub use subscription::{Subscriber, Subscription};
pub use teardown::Teardown;
