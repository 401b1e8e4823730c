//! Notification integration trait definition.

use anyhow::Result;
use async_trait::async_trait;

use super::{Notification, Severity};

/// Trait for out-of-terminal notification integrations.
///
/// Each integration (OS notifications, etc.) implements this trait
/// to receive tracker notifications after they have been posted as toasts.
#[async_trait]
pub trait NotificationIntegration: Send + Sync {
    /// Integration name (for logging and config identification)
    fn name(&self) -> &str;

    /// Check if this integration wants notifications of the given severity.
    fn handles(&self, severity: Severity) -> bool;

    /// Check if this integration is enabled.
    fn is_enabled(&self) -> bool;

    /// Deliver a notification.
    ///
    /// This is fire-and-forget - the service logs errors
    /// but never surfaces them to the tracker.
    async fn send(&self, notification: &Notification) -> Result<()>;
}

/// Severity filter shared by integrations: empty list means everything
pub(crate) fn severity_filter_matches(filter: &[Severity], severity: Severity) -> bool {
    filter.is_empty() || filter.contains(&severity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_matches_all() {
        for severity in Severity::all() {
            assert!(severity_filter_matches(&[], *severity));
        }
    }

    #[test]
    fn test_specific_filter() {
        let filter = [Severity::Error, Severity::Warning];
        assert!(severity_filter_matches(&filter, Severity::Error));
        assert!(severity_filter_matches(&filter, Severity::Warning));
        assert!(!severity_filter_matches(&filter, Severity::Success));
        assert!(!severity_filter_matches(&filter, Severity::Info));
    }
}
