//! OS-native notification integration (macOS/Linux).

use anyhow::Result;
use async_trait::async_trait;

use super::integration::{severity_filter_matches, NotificationIntegration};
use super::{Notification, Severity};
use crate::config::OsNotificationConfig;

/// OS-native notification integration.
///
/// Sends notifications using the platform's native notification system:
/// - macOS: Uses `mac-notification-sys`
/// - Linux: Uses `notify-rust` (freedesktop notifications)
pub struct OsIntegration {
    enabled: bool,
    sound: bool,
    severities: Vec<Severity>,
}

impl OsIntegration {
    /// Create a new OS integration from config.
    pub fn new(config: &OsNotificationConfig) -> Self {
        Self {
            enabled: config.enabled,
            sound: config.sound,
            severities: config.severities.clone(),
        }
    }

    /// Create a disabled OS integration.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            sound: false,
            severities: Vec::new(),
        }
    }
}

#[async_trait]
impl NotificationIntegration for OsIntegration {
    fn name(&self) -> &str {
        "os"
    }

    fn handles(&self, severity: Severity) -> bool {
        severity_filter_matches(&self.severities, severity)
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    async fn send(&self, notification: &Notification) -> Result<()> {
        let title = notification.title.clone();
        let subtitle = notification.severity.to_string();
        let message = notification.description.clone();
        let sound = self.sound;

        // Desktop notification backends block on D-Bus / NSUserNotification
        let result = tokio::task::spawn_blocking(move || {
            super::send_os_notification(&title, &subtitle, &message, sound)
        })
        .await?;

        if let Err(e) = result {
            tracing::warn!(
                integration = "os",
                severity = %notification.severity,
                error = %e,
                "Failed to send OS notification"
            );
        }

        Ok(())
    }
}
