//! Rivulet Sources - Constructors that wrap external producers.
//!
//! Every source here is an `Observable` built with the core registration
//! primitive, so it follows the same lifecycle rules as a hand-written one.
//!
//! - `of`, `empty`, `never`, `throw_error`: synchronous sources
//! - `from_promise`: one value from a [`Thenable`], then completion
//! - `from_event`: every firing of a named event on an [`EventTarget`]
//!
//! # Example
//!
//! ```ignore
//! use rivulet_core::Observer;
//! use rivulet_sources::{from_event, of, EventEmitter};
//!
//! of::<_, rivulet_core::Error, _>([1, 2, 3])
//!     .subscribe(Observer::from_next(|v| println!("{}", v)));
//!
//! let keys = EventEmitter::<char>::new();
//! let subscription = from_event::<_, rivulet_core::Error, _>(keys.clone(), "key")
//!     .subscribe(Observer::from_next(|c| println!("pressed {}", c)));
//! keys.emit("key", &'a');
//! subscription.unsubscribe();
//! ```

#![no_std]

extern crate alloc;

pub mod event;
pub mod promise;
pub mod values;

pub use event::{from_event, same_listener, EventEmitter, EventTarget, Listener};
pub use promise::{from_promise, OnFulfilled, OnRejected, Promise, Resolver, Thenable};
pub use values::{empty, never, of, throw_error};
