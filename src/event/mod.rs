//! Publish/subscribe event dispatch
//!
//! An explicit registry of named events. Observers are notified
//! synchronously, in registration order, fire-and-forget: one `update` call
//! per registered observer per `notify`, no delivery guarantees beyond that.
//! Nothing here is process-global - whoever needs to publish or subscribe
//! receives the dispatcher by reference.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

/// Receives notifications for events it is attached to
pub trait Observer<P> {
    /// Called once per `notify`, in registration order
    fn update(&self, event: &str, payload: &P);
}

/// A single named event and its attached observers
pub struct Event<P> {
    observers: Vec<Arc<dyn Observer<P>>>,
}

impl<P> Default for Event<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Event<P> {
    /// Event with no observers attached
    pub fn new() -> Self {
        Self {
            observers: Vec::new(),
        }
    }

    /// Attach an observer
    ///
    /// Attaching the same allocation twice is a no-op; the observer is still
    /// notified once per trigger.
    pub fn attach(&mut self, observer: Arc<dyn Observer<P>>) {
        if self
            .observers
            .iter()
            .any(|existing| Arc::ptr_eq(existing, &observer))
        {
            return;
        }
        self.observers.push(observer);
    }

    /// Detach a previously attached observer; returns whether it was present
    pub fn detach(&mut self, observer: &Arc<dyn Observer<P>>) -> bool {
        let before = self.observers.len();
        self.observers
            .retain(|existing| !Arc::ptr_eq(existing, observer));
        self.observers.len() != before
    }

    /// Number of attached observers
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Notify every observer, in registration order
    pub fn notify(&self, name: &str, payload: &P) {
        for observer in &self.observers {
            observer.update(name, payload);
        }
    }
}

impl<P> fmt::Debug for Event<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// Registry mapping event names to [`Event`]s
///
/// Events come into existence through [`EventDispatcher::get_or_create`] or
/// a first [`EventDispatcher::trigger`] - an explicit call either way, never
/// interception of an unknown name.
pub struct EventDispatcher<P> {
    events: HashMap<String, Event<P>>,
}

impl<P> Default for EventDispatcher<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> EventDispatcher<P> {
    /// Empty registry
    pub fn new() -> Self {
        Self {
            events: HashMap::new(),
        }
    }

    /// Fetch an event, creating it on first use
    pub fn get_or_create(&mut self, name: &str) -> &mut Event<P> {
        self.events.entry(name.to_string()).or_default()
    }

    /// Fetch an existing event
    pub fn get(&self, name: &str) -> Option<&Event<P>> {
        self.events.get(name)
    }

    /// Trigger `name`, creating the event if it does not exist yet
    pub fn trigger(&mut self, name: &str, payload: &P) {
        debug!(event = name, "trigger");
        self.get_or_create(name).notify(name, payload);
    }

    /// Remove an event and its observers; returns whether it existed
    pub fn remove(&mut self, name: &str) -> bool {
        self.events.remove(name).is_some()
    }

    /// Names of all registered events, in no particular order
    pub fn names(&self) -> Vec<&str> {
        self.events.keys().map(String::as_str).collect()
    }

    /// Total number of registered events
    pub fn count(&self) -> usize {
        self.events.len()
    }
}

impl<P> fmt::Debug for EventDispatcher<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("events", &self.events.len())
            .finish()
    }
}
