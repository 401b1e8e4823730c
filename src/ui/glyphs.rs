//! Glyphs and colors for stage symbols, statuses and severities.

use ratatui::style::Color;

use order_tracker::{Severity, StageStatus};

/// Get glyph for a stage symbol key.
/// Returns "•" for unknown or empty symbols.
pub fn glyph_for_symbol(symbol: &str) -> &'static str {
    match symbol {
        "check" => "✓",
        "truck" => "⛟",
        "map-pin" => "⌖",
        "shopping-bag" => "◍",
        "package" => "▣",
        "clock" => "◷",
        "home" => "⌂",
        "star" => "★",
        _ => "•",
    }
}

/// Glyph for a stage as rendered: completed and cancelled stages replace
/// the stage's own symbol.
pub fn glyph_for_stage(symbol: &str, status: StageStatus) -> &'static str {
    match status {
        StageStatus::Cancelled => "✗",
        StageStatus::Completed => "✓",
        StageStatus::Active | StageStatus::Pending => glyph_for_symbol(symbol),
    }
}

pub fn color_for_status(status: StageStatus) -> Color {
    match status {
        StageStatus::Completed => Color::Cyan,
        StageStatus::Active => Color::LightCyan,
        StageStatus::Pending => Color::DarkGray,
        StageStatus::Cancelled => Color::Red,
    }
}

pub fn glyph_for_severity(severity: Severity) -> &'static str {
    match severity {
        Severity::Success => "✔",
        Severity::Error => "✖",
        Severity::Warning => "⚠",
        Severity::Info => "ℹ",
    }
}

pub fn color_for_severity(severity: Severity) -> Color {
    match severity {
        Severity::Success => Color::Green,
        Severity::Error => Color::Red,
        Severity::Warning => Color::Yellow,
        Severity::Info => Color::Blue,
    }
}
