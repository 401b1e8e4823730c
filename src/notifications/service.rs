//! Central notification service that the tracker notifies.

use std::sync::Arc;

use super::integration::NotificationIntegration;
use super::os_integration::OsIntegration;
use super::toast::ToastBoard;
use super::{Notification, Notifier};
use crate::config::Config;

/// Central notification dispatcher.
///
/// Posts every notification to the toast board, then dispatches it to all
/// enabled integrations that handle its severity.
pub struct NotificationService {
    toasts: Option<ToastBoard>,
    integrations: Vec<Arc<dyn NotificationIntegration>>,
    enabled: bool,
}

impl NotificationService {
    /// Create a new notification service from config.
    pub fn from_config(config: &Config, toasts: ToastBoard) -> Self {
        let integrations: Vec<Arc<dyn NotificationIntegration>> =
            vec![Arc::new(OsIntegration::new(&config.notifications.os))];

        Self {
            toasts: Some(toasts),
            integrations,
            enabled: config.notifications.enabled,
        }
    }

    /// Create a service with explicit integrations and no toast board.
    pub fn with_integrations(integrations: Vec<Arc<dyn NotificationIntegration>>) -> Self {
        Self {
            toasts: None,
            integrations,
            enabled: true,
        }
    }

    /// Create a disabled notification service (for testing).
    pub fn disabled() -> Self {
        Self {
            toasts: None,
            integrations: Vec::new(),
            enabled: false,
        }
    }

    /// Check if integration delivery is globally enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Get the number of registered integrations.
    pub fn integration_count(&self) -> usize {
        self.integrations.len()
    }

    pub fn toasts(&self) -> Option<&ToastBoard> {
        self.toasts.as_ref()
    }

    fn dispatch(&self, notification: &Notification) {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                tracing::debug!("No tokio runtime available, skipping notification integrations");
                return;
            }
        };

        for integration in &self.integrations {
            if integration.is_enabled() && integration.handles(notification.severity) {
                let integration = integration.clone();
                let notification = notification.clone();

                // Fire-and-forget - spawn task and don't await
                handle.spawn(async move {
                    if let Err(e) = integration.send(&notification).await {
                        tracing::warn!(
                            integration = %integration.name(),
                            severity = %notification.severity,
                            error = %e,
                            "Notification delivery failed"
                        );
                    }
                });
            }
        }
    }
}

impl Notifier for NotificationService {
    fn notify(&self, notification: &Notification) {
        tracing::debug!(
            title = %notification.title,
            severity = %notification.severity,
            "Posting notification"
        );

        if let Some(toasts) = &self.toasts {
            toasts.notify(notification);
        }

        if self.enabled {
            self.dispatch(notification);
        }
    }
}
