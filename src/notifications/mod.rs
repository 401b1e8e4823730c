//! Notification system for tracker transitions.
//!
//! The tracker only sees the [`Notifier`] trait. Behind it, the
//! [`NotificationService`] posts every message to the in-terminal
//! [`ToastBoard`] and fans it out to integrations (OS notifications).

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

#[cfg(target_os = "macos")]
pub mod macos;

#[cfg(target_os = "linux")]
pub mod linux;

mod integration;
mod log_notifier;
mod os_integration;
mod service;
mod toast;

pub use integration::NotificationIntegration;
pub use log_notifier::LogNotifier;
pub use os_integration::OsIntegration;
pub use service::NotificationService;
pub use toast::{Toast, ToastBoard};

/// How a notification should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

impl Severity {
    /// Lowercase name used in config filters and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }

    /// Errors render with the destructive variant
    pub fn is_destructive(&self) -> bool {
        matches!(self, Severity::Error)
    }

    pub fn all() -> &'static [Severity] {
        &[
            Severity::Success,
            Severity::Error,
            Severity::Warning,
            Severity::Info,
        ]
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transient status message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity,
        }
    }

    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, Severity::Success)
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, Severity::Error)
    }

    pub fn warning(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, Severity::Warning)
    }

    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, Severity::Info)
    }
}

/// Receiver of tracker notifications.
///
/// Fire-and-forget: implementations must not block and have no way to
/// report failure back to the caller. Log instead.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification);
}

/// Send a notification using the platform-specific implementation.
/// This is a low-level function used by `OsIntegration`.
pub fn send_os_notification(title: &str, subtitle: &str, message: &str, sound: bool) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        macos::send_notification(title, subtitle, message, sound)
    }

    #[cfg(target_os = "linux")]
    {
        linux::send_notification(title, subtitle, message, sound)
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux")))]
    {
        // Fall back to just logging on other systems
        let _ = sound;
        tracing::info!("Notification: {} - {} - {}", title, subtitle, message);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_strings() {
        assert_eq!(Severity::Success.as_str(), "success");
        assert_eq!(Severity::Error.as_str(), "error");
        assert_eq!(Severity::Warning.as_str(), "warning");
        assert_eq!(Severity::Info.as_str(), "info");
        assert_eq!(Severity::Warning.to_string(), "warning");
    }

    #[test]
    fn test_only_error_is_destructive() {
        let destructive: Vec<_> = Severity::all()
            .iter()
            .filter(|s| s.is_destructive())
            .collect();
        assert_eq!(destructive, vec![&Severity::Error]);
    }

    #[test]
    fn test_convenience_constructors() {
        assert_eq!(Notification::success("a", "b").severity, Severity::Success);
        assert_eq!(Notification::error("a", "b").severity, Severity::Error);
        assert_eq!(Notification::warning("a", "b").severity, Severity::Warning);

        let info = Notification::info("Heads up", "Something happened");
        assert_eq!(info.severity, Severity::Info);
        assert_eq!(info.title, "Heads up");
        assert_eq!(info.description, "Something happened");
    }

    #[test]
    fn test_severity_deserializes_lowercase() {
        let parsed: Vec<Severity> = serde_json::from_str(r#"["error","info"]"#).unwrap();
        assert_eq!(parsed, vec![Severity::Error, Severity::Info]);
    }
}
