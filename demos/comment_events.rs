//! Wires an email-style notifier and a logger to a "comment added" event,
//! then publishes through the dispatcher.

use std::sync::Arc;

use sprig::event::{EventDispatcher, Observer};

struct EmailNotification {
    recipients: Vec<String>,
}

impl Observer<String> for EmailNotification {
    fn update(&self, event: &str, comment: &String) {
        for recipient in &self.recipients {
            println!("[{event}] notifying {recipient}: {comment}");
        }
    }
}

struct CommentLogger;

impl Observer<String> for CommentLogger {
    fn update(&self, event: &str, comment: &String) {
        println!("[{event}] logged: {comment}");
    }
}

fn main() {
    let mut dispatcher = EventDispatcher::new();

    let event = dispatcher.get_or_create("comment.added");
    event.attach(Arc::new(EmailNotification {
        recipients: vec![
            "dude@domain.com".to_string(),
            "lady@organization.org".to_string(),
        ],
    }));
    event.attach(Arc::new(CommentLogger));

    dispatcher.trigger("comment.added", &"Lorem ipsum dolor sit amet.".to_string());
}
