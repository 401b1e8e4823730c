//! Centralized keyboard shortcuts registry.
//!
//! Single source of truth for the help overlay.

use crossterm::event::KeyCode;

/// A keyboard shortcut definition
#[derive(Debug, Clone)]
pub struct Shortcut {
    /// Primary key for this shortcut
    pub key: KeyCode,
    /// Alternative key (e.g., vim-style variant or arrow key)
    pub alt_key: Option<KeyCode>,
    /// Human-readable description of what this shortcut does
    pub description: &'static str,
    /// Category for grouping in help
    pub category: ShortcutCategory,
}

/// Categories for organizing shortcuts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutCategory {
    General,
    Navigation,
    Actions,
}

impl ShortcutCategory {
    /// Display name for this category
    pub fn display_name(&self) -> &'static str {
        match self {
            ShortcutCategory::General => "General",
            ShortcutCategory::Navigation => "Navigation",
            ShortcutCategory::Actions => "Actions",
        }
    }

    /// All categories in display order
    pub fn all() -> &'static [ShortcutCategory] {
        &[
            ShortcutCategory::General,
            ShortcutCategory::Navigation,
            ShortcutCategory::Actions,
        ]
    }
}

impl Shortcut {
    /// Format key for display (e.g., "q", "Enter", "l/→")
    pub fn key_display(&self) -> String {
        let primary = format_keycode(&self.key);
        match &self.alt_key {
            Some(alt) => format!("{}/{}", primary, format_keycode(alt)),
            None => primary,
        }
    }

    /// Format key for help dialog (left-padded to 9 chars)
    pub fn key_display_padded(&self) -> String {
        format!("{:<9}", self.key_display())
    }
}

/// Format a `KeyCode` for display
fn format_keycode(key: &KeyCode) -> String {
    match key {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        _ => format!("{key:?}"),
    }
}

/// Static registry of all keyboard shortcuts
pub static SHORTCUTS: &[Shortcut] = &[
    // General
    Shortcut {
        key: KeyCode::Char('q'),
        alt_key: Some(KeyCode::Esc),
        description: "Quit",
        category: ShortcutCategory::General,
    },
    Shortcut {
        key: KeyCode::Char('?'),
        alt_key: None,
        description: "Toggle help",
        category: ShortcutCategory::General,
    },
    // Navigation
    Shortcut {
        key: KeyCode::Char('h'),
        alt_key: Some(KeyCode::Left),
        description: "Move stage cursor left",
        category: ShortcutCategory::Navigation,
    },
    Shortcut {
        key: KeyCode::Char('l'),
        alt_key: Some(KeyCode::Right),
        description: "Move stage cursor right",
        category: ShortcutCategory::Navigation,
    },
    // Actions
    Shortcut {
        key: KeyCode::Char('n'),
        alt_key: Some(KeyCode::Enter),
        description: "Next step",
        category: ShortcutCategory::Actions,
    },
    Shortcut {
        key: KeyCode::Char(' '),
        alt_key: None,
        description: "Next step",
        category: ShortcutCategory::Actions,
    },
    Shortcut {
        key: KeyCode::Char('j'),
        alt_key: Some(KeyCode::Char('g')),
        description: "Jump to stage under cursor",
        category: ShortcutCategory::Actions,
    },
    Shortcut {
        key: KeyCode::Char('1'),
        alt_key: Some(KeyCode::Char('9')),
        description: "Jump to stage by number",
        category: ShortcutCategory::Actions,
    },
    Shortcut {
        key: KeyCode::Char('c'),
        alt_key: None,
        description: "Cancel order",
        category: ShortcutCategory::Actions,
    },
];

/// Shortcuts grouped by category, in display order, skipping empty groups
pub fn shortcuts_by_category() -> Vec<(ShortcutCategory, Vec<&'static Shortcut>)> {
    ShortcutCategory::all()
        .iter()
        .map(|category| {
            let shortcuts = SHORTCUTS
                .iter()
                .filter(|s| s.category == *category)
                .collect::<Vec<_>>();
            (*category, shortcuts)
        })
        .filter(|(_, shortcuts)| !shortcuts.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_key_display_with_alt() {
        let shortcut = SHORTCUTS
            .iter()
            .find(|s| s.description == "Move stage cursor right")
            .unwrap();
        assert_eq!(shortcut.key_display(), "l/→");
    }

    #[test]
    fn test_space_displays_by_name() {
        assert_eq!(format_keycode(&KeyCode::Char(' ')), "Space");
    }

    #[test]
    fn test_primary_keys_are_unique() {
        let mut seen = HashSet::new();
        for shortcut in SHORTCUTS {
            assert!(
                seen.insert(shortcut.key),
                "duplicate key: {}",
                shortcut.key_display()
            );
        }
    }

    #[test]
    fn test_every_category_has_shortcuts() {
        let grouped = shortcuts_by_category();
        assert_eq!(grouped.len(), ShortcutCategory::all().len());
        assert_eq!(grouped[0].0, ShortcutCategory::General);
    }

    #[test]
    fn test_core_operations_have_shortcuts() {
        let descriptions: Vec<_> = SHORTCUTS.iter().map(|s| s.description).collect();
        assert!(descriptions.contains(&"Next step"));
        assert!(descriptions.contains(&"Cancel order"));
        assert!(descriptions.iter().any(|d| d.starts_with("Jump to stage")));
    }
}
