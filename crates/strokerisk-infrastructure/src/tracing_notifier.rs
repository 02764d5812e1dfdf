//! Notification sink that writes to the tracing log.

use strokerisk_core::notification::{Notification, NotificationLevel, Notifier};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        let description = notification.description.as_deref().unwrap_or("");
        match notification.level {
            NotificationLevel::Success => info!(title = %notification.title, "{}", description),
            NotificationLevel::Error => warn!(title = %notification.title, "{}", description),
        }
    }
}
