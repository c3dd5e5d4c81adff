//! Rivulet Operators - Transformations between observables.
//!
//! Every operator is built only from the core contract: create a new
//! `Observable`, subscribe to the source inside its registration function, and
//! return that upstream subscription as teardown. Unsubscribing the outermost
//! subscription therefore cascades back to the original producer.
//!
//! # Operators
//!
//! - `map`, `filter`: per-value transformation and selection
//! - `start_with`: prepend a value
//! - `take`: stop after `n` values
//! - `delay`: shift values and completion through a [`Timer`]
//!
//! # Example
//!
//! ```ignore
//! use rivulet_core::pipe;
//! use rivulet_operators::{filter, map, take};
//! use rivulet_sources::of;
//!
//! let source = of::<_, rivulet_core::Error, _>([5, 4, 3, 2, 1]);
//! let evens = pipe!(source, filter(|x: &i32| x % 2 == 0), map(|x: i32| x + 1), take(1));
//! // Emits: 5, then completes
//! ```

#![no_std]

extern crate alloc;

pub mod ext;
pub mod operators;
pub mod timer;

pub use ext::ObservableExt;
pub use operators::{delay, filter, map, start_with, take};
pub use timer::{ManualTimer, Timer, TimerHandle};
