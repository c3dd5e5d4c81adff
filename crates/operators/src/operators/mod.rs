//! Operators over observables.
//!
//! Each factory returns an `OperatorFunction` that wraps its source in a new
//! `Observable`. Per-subscription state lives inside the registration
//! function, so every subscription starts fresh. Every operator returns its
//! upstream subscription as teardown, so unsubscribing cascades to the
//! original producer.
//!
//! - `map`: transforms each value
//! - `filter`: passes values matching a predicate
//! - `start_with`: emits a value before subscribing upstream
//! - `take`: passes at most `n` values, then completes
//! - `delay`: shifts values and completion in time through a `Timer`

mod delay;
mod filter;
mod map;
mod start_with;
mod take;

pub use delay::delay;
pub use filter::filter;
pub use map::map;
pub use start_with::start_with;
pub use take::take;
