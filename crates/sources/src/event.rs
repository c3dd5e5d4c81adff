//! Event-emitter producers.
//!
//! `EventTarget` is the add/remove-listener contract `from_event` needs.
//! Listeners are compared by allocation identity, so a target can always
//! remove the exact listener it was given. `EventEmitter` is a simple
//! single-threaded implementation keyed by event name.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;
use hashbrown::HashMap;
use rivulet_core::{Observable, Subscriber, Teardown};

/// Callback registered with an event target.
pub type Listener<V> = Rc<dyn Fn(&V)>;

/// Returns true if both handles point at the same listener allocation.
#[inline]
pub fn same_listener<V>(a: &Listener<V>, b: &Listener<V>) -> bool {
    Rc::as_ptr(a) as *const () == Rc::as_ptr(b) as *const ()
}

/// Anything listeners can be attached to by event name.
pub trait EventTarget<V> {
    /// Registers `listener` for `event_name`.
    fn add_listener(&self, event_name: &str, listener: Listener<V>);

    /// Removes the listener identical to `listener` from `event_name`.
    fn remove_listener(&self, event_name: &str, listener: &Listener<V>);
}

/// A single-threaded event emitter.
///
/// Cloning yields another handle to the same listener table.
///
/// # Example
///
/// ```ignore
/// let clicks = EventEmitter::<u32>::new();
/// let subscription = from_event(clicks.clone(), "click")
///     .subscribe(Observer::from_next(|x| println!("click at {}", x)));
/// clicks.emit("click", &10);
/// subscription.unsubscribe();
/// ```
pub struct EventEmitter<V> {
    listeners: Rc<RefCell<HashMap<String, Vec<Listener<V>>>>>,
}

impl<V> EventEmitter<V> {
    /// Creates an emitter with no listeners.
    pub fn new() -> Self {
        Self {
            listeners: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    /// Calls every listener registered for `event_name`.
    ///
    /// Listeners are snapshotted first, so they may add or remove listeners
    /// while being called. Returns the number of listeners called.
    pub fn emit(&self, event_name: &str, value: &V) -> usize {
        let snapshot: Vec<Listener<V>> = match self.listeners.borrow().get(event_name) {
            Some(listeners) => listeners.clone(),
            None => return 0,
        };
        for listener in snapshot.iter() {
            listener(value);
        }
        snapshot.len()
    }

    /// Returns the number of listeners registered for `event_name`.
    pub fn listener_count(&self, event_name: &str) -> usize {
        self.listeners
            .borrow()
            .get(event_name)
            .map(Vec::len)
            .unwrap_or(0)
    }

    /// Returns true if no listener is registered under any name.
    pub fn is_empty(&self) -> bool {
        self.listeners.borrow().values().all(Vec::is_empty)
    }
}

impl<V> EventTarget<V> for EventEmitter<V> {
    fn add_listener(&self, event_name: &str, listener: Listener<V>) {
        self.listeners
            .borrow_mut()
            .entry(String::from(event_name))
            .or_default()
            .push(listener);
    }

    fn remove_listener(&self, event_name: &str, listener: &Listener<V>) {
        let mut listeners = self.listeners.borrow_mut();
        if let Some(registered) = listeners.get_mut(event_name) {
            if let Some(pos) = registered.iter().position(|l| same_listener(l, listener)) {
                registered.remove(pos);
            }
            if registered.is_empty() {
                listeners.remove(event_name);
            }
        }
    }
}

impl<V> Default for EventEmitter<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Clone for EventEmitter<V> {
    fn clone(&self) -> Self {
        Self {
            listeners: self.listeners.clone(),
        }
    }
}

impl<V> fmt::Debug for EventEmitter<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventEmitter")
            .field("events", &self.listeners.borrow().len())
            .finish()
    }
}

/// Emits every event fired on `target` under `event_name`.
///
/// Each subscription registers its own listener and its teardown removes
/// exactly that listener. Never completes on its own.
pub fn from_event<V, E, S>(target: S, event_name: impl Into<String>) -> Observable<V, E>
where
    V: Clone + 'static,
    E: 'static,
    S: EventTarget<V> + 'static,
{
    let target = Rc::new(target);
    let event_name: Rc<str> = event_name.into().into();
    Observable::new(move |subscriber: Subscriber<V, E>| {
        let listener: Listener<V> = Rc::new(move |event: &V| subscriber.next(event.clone()));
        target.add_listener(&event_name, listener.clone());

        #[cfg(feature = "tracing")]
        tracing::trace!(event = &*event_name, "listener added");

        let target = target.clone();
        let event_name = event_name.clone();
        Teardown::new(move || {
            target.remove_listener(&event_name, &listener);

            #[cfg(feature = "tracing")]
            tracing::trace!(event = &*event_name, "listener removed");
        })
    })
}
