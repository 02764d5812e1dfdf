#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use serde_json::Value;
use strokerisk_core::notification::{Notification, NotificationLevel, Notifier};
use strokerisk_core::validation::Candidate;

/// Notifier that keeps every notification for assertions.
#[derive(Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn all(&self) -> Vec<Notification> {
        self.seen.lock().unwrap().clone()
    }

    pub fn titles(&self) -> Vec<String> {
        self.all().into_iter().map(|n| n.title).collect()
    }

    pub fn last(&self) -> Option<Notification> {
        self.all().pop()
    }

    pub fn count(&self, level: NotificationLevel) -> usize {
        self.all().iter().filter(|n| n.level == level).count()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().unwrap().push(notification);
    }
}

pub fn form(value: Value) -> Candidate {
    value.as_object().cloned().unwrap_or_default()
}
