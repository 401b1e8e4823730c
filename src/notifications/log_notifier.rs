//! Notifier that writes to the tracing log, for headless runs.

use super::{Notification, Notifier, Severity};

#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: &Notification) {
        let Notification {
            title,
            description,
            severity,
        } = notification;

        match severity {
            Severity::Error => tracing::error!(%severity, "{}: {}", title, description),
            Severity::Warning => tracing::warn!(%severity, "{}: {}", title, description),
            Severity::Success | Severity::Info => {
                tracing::info!(%severity, "{}: {}", title, description);
            }
        }
    }
}
