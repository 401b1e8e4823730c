use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::notifications::Severity;
use crate::stages::{default_stages, Stage, StageList};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Ordered lifecycle stages; the order delivery lifecycle when unset
    #[serde(default = "default_stages")]
    pub stages: Vec<Stage>,
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    /// Deliver to integrations (OS notifications). Toasts are always shown.
    pub enabled: bool,
    /// How long a toast stays on screen (default: 3000 = 3s)
    #[serde(default = "default_toast_duration")]
    pub toast_duration_ms: u64,
    /// Maximum toasts stacked at once
    #[serde(default = "default_max_visible")]
    pub max_visible: usize,
    #[serde(default)]
    pub os: OsNotificationConfig,
}

fn default_toast_duration() -> u64 {
    3000 // 3 seconds
}

fn default_max_visible() -> usize {
    3
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            toast_duration_ms: default_toast_duration(),
            max_visible: default_max_visible(),
            os: OsNotificationConfig::default(),
        }
    }
}

/// Desktop notification settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OsNotificationConfig {
    /// Off by default; the toast overlay is the primary surface
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub sound: bool,
    /// Severities to forward (empty = all)
    #[serde(default)]
    pub severities: Vec<Severity>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    pub refresh_rate_ms: u64,
    /// Heading shown above the tracker
    #[serde(default = "default_title")]
    pub title: String,
}

fn default_title() -> String {
    "Order Tracking".to_string()
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            refresh_rate_ms: 100,
            title: default_title(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    pub state: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            state: ".order-tracker".to_string(), // Relative to cwd
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to log to file in TUI mode (false = stderr for debugging)
    #[serde(default = "default_log_to_file")]
    pub to_file: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_to_file() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            to_file: default_log_to_file(),
        }
    }
}

impl Config {
    /// Path to the project-local config file
    pub fn local_config_path() -> PathBuf {
        PathBuf::from(".order-tracker/config.toml")
    }

    pub fn load(config_path: Option<&str>) -> Result<Self> {
        // Start with embedded defaults so the tracker works without config files
        let mut defaults = serde_json::to_value(Config::default())
            .context("Failed to serialize default config")?;
        // config merges arrays element by element; stages fall back to the
        // serde default instead so a shorter configured list replaces them
        if let Some(table) = defaults.as_object_mut() {
            table.remove("stages");
        }
        let defaults_json = defaults.to_string();

        let mut builder = config::Config::builder().add_source(config::File::from_str(
            &defaults_json,
            config::FileFormat::Json,
        ));

        let local_config = Self::local_config_path();
        if local_config.exists() {
            builder = builder.add_source(config::File::from(local_config));
        }

        // User config in ~/.config/order-tracker/ (optional global overrides)
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("order-tracker").join("config.toml");
            if user_config.exists() {
                builder = builder.add_source(config::File::from(user_config));
            }
        }

        // Explicit config file (CLI override)
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        }

        // Environment variables with ORDER_TRACKER_ prefix
        builder = builder.add_source(
            config::Environment::with_prefix("ORDER_TRACKER")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to load configuration")?;
        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config to TOML")
    }

    /// Validated stage list built from the configured stages
    pub fn stage_list(&self) -> Result<StageList> {
        StageList::new(self.stages.clone()).context("Invalid stage configuration")
    }

    /// Get absolute path to state directory
    pub fn state_path(&self) -> PathBuf {
        let path = PathBuf::from(&self.paths.state);
        if path.is_absolute() {
            path
        } else {
            std::env::current_dir().unwrap_or_default().join(path)
        }
    }

    /// Get absolute path to logs directory
    pub fn logs_path(&self) -> PathBuf {
        self.state_path().join("logs")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stages: default_stages(),
            notifications: NotificationsConfig::default(),
            ui: UiConfig::default(),
            paths: PathsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_uses_order_lifecycle() {
        let config = Config::default();
        let stages = config.stage_list().unwrap();
        assert_eq!(stages.len(), 6);
        assert_eq!(config.notifications.toast_duration_ms, 3000);
        assert!(!config.notifications.os.enabled);
        assert_eq!(config.ui.title, "Order Tracking");
    }

    #[test]
    fn test_load_explicit_file_overrides_stages() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tracker.toml");
        std::fs::write(
            &path,
            r#"
[[stages]]
id = 10
title = "Placed"
description = "Order placed"
symbol = "check"

[[stages]]
id = 20
title = "Collected"
description = "Customer collected the order"

[notifications]
enabled = false
toast_duration_ms = 1500

[notifications.os]
enabled = true
severities = ["error"]
"#,
        )
        .unwrap();

        let config = Config::load(Some(path.to_str().unwrap())).unwrap();

        let stages = config.stage_list().unwrap();
        assert_eq!(stages.len(), 2);
        assert_eq!(stages[1].title, "Collected");
        assert_eq!(stages[1].symbol, "");
        assert!(!config.notifications.enabled);
        assert_eq!(config.notifications.toast_duration_ms, 1500);
        assert_eq!(config.notifications.max_visible, 3);
        assert!(config.notifications.os.enabled);
        assert_eq!(config.notifications.os.severities, vec![Severity::Error]);
        // Untouched sections keep their defaults
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_stages_rejected() {
        let mut config = Config::default();
        config.stages[1].id = config.stages[0].id;
        let err = config.stage_list().unwrap_err();
        assert!(err.to_string().contains("Invalid stage configuration"));
    }

    #[test]
    fn test_to_toml_round_trips_stage_titles() {
        let config = Config::default();
        let toml_str = config.to_toml().unwrap();
        assert!(toml_str.contains("Order Accept"));
        assert!(toml_str.contains("[notifications.os]"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.stages, config.stages);
    }

    #[test]
    fn test_logs_path_under_state() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.paths.state = temp_dir.path().to_string_lossy().to_string();

        assert_eq!(config.state_path(), temp_dir.path());
        assert!(config.logs_path().ends_with("logs"));
    }
}
