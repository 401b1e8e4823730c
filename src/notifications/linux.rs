use anyhow::Result;
use notify_rust::{Notification, Urgency};

pub fn send_notification(title: &str, subtitle: &str, message: &str, _sound: bool) -> Result<()> {
    // freedesktop has no subtitle; severity only drives urgency
    let urgency = if subtitle == "error" {
        Urgency::Critical
    } else {
        Urgency::Normal
    };

    Notification::new()
        .summary(title)
        .body(message)
        .appname("order-tracker")
        .urgency(urgency)
        .show()?;

    Ok(())
}
