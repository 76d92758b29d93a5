//! Event dispatcher behavior seen from consuming code

use std::sync::{Arc, Mutex};

use sprig::event::{EventDispatcher, Observer};

#[derive(Default)]
struct Sink {
    seen: Mutex<Vec<(String, String)>>,
}

struct Forwarder {
    sink: Arc<Sink>,
}

impl Observer<String> for Forwarder {
    fn update(&self, event: &str, payload: &String) {
        self.sink
            .seen
            .lock()
            .unwrap()
            .push((event.to_string(), payload.clone()));
    }
}

#[test]
fn one_update_per_observer_per_trigger() {
    let sink = Arc::new(Sink::default());
    let mut dispatcher = EventDispatcher::new();

    let event = dispatcher.get_or_create("comment.added");
    event.attach(Arc::new(Forwarder {
        sink: Arc::clone(&sink),
    }));
    event.attach(Arc::new(Forwarder {
        sink: Arc::clone(&sink),
    }));

    dispatcher.trigger("comment.added", &"first".to_string());
    dispatcher.trigger("comment.added", &"second".to_string());

    let seen = sink.seen.lock().unwrap();
    assert_eq!(seen.len(), 4);
    assert_eq!(seen[0], ("comment.added".to_string(), "first".to_string()));
    assert_eq!(seen[3], ("comment.added".to_string(), "second".to_string()));
}

#[test]
fn get_or_create_returns_the_same_event() {
    let sink = Arc::new(Sink::default());
    let mut dispatcher = EventDispatcher::new();

    dispatcher.get_or_create("saved").attach(Arc::new(Forwarder {
        sink: Arc::clone(&sink),
    }));
    // second fetch must not shadow the first registration
    assert_eq!(dispatcher.get_or_create("saved").observer_count(), 1);
    assert_eq!(dispatcher.count(), 1);
}

#[test]
fn triggering_an_unknown_event_registers_it_quietly() {
    let mut dispatcher: EventDispatcher<String> = EventDispatcher::new();
    dispatcher.trigger("nobody.listens", &"payload".to_string());
    assert_eq!(dispatcher.count(), 1);
    assert_eq!(
        dispatcher.get("nobody.listens").unwrap().observer_count(),
        0
    );
}

#[test]
fn removed_events_stop_existing() {
    let mut dispatcher: EventDispatcher<String> = EventDispatcher::new();
    dispatcher.get_or_create("ephemeral");
    assert!(dispatcher.remove("ephemeral"));
    assert!(dispatcher.get("ephemeral").is_none());
    assert!(!dispatcher.remove("ephemeral"));
}
