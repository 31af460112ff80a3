// Settings module
// Tunables for the store, the calendar views and the notification scheduler

use std::path::PathBuf;
use std::time::Duration as StdDuration;

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Persisted application settings (TOML).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// SQLite file backing the event store; `None` uses the platform data dir
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,
    /// Minutes added to `start` when a meeting's `end` is not after it
    pub minimum_duration_minutes: i64,
    /// 0 = Sunday, 1 = Monday, etc.
    pub first_day_of_week: u8,
    /// Meetings listed per day in the month grid before summarizing
    pub month_visible_per_day: usize,
    pub notifications: NotificationSettings,
    pub generation: GenerationSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_path: None,
            minimum_duration_minutes: 15,
            first_day_of_week: 0, // Sunday
            month_visible_per_day: 2,
            notifications: NotificationSettings::default(),
            generation: GenerationSettings::default(),
        }
    }
}

impl Settings {
    pub fn minimum_duration(&self) -> Duration {
        Duration::minutes(self.minimum_duration_minutes.max(1))
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.first_day_of_week > 6 {
            return Err(format!(
                "first_day_of_week must be 0-6, got {}",
                self.first_day_of_week
            ));
        }
        if self.minimum_duration_minutes <= 0 {
            return Err("minimum_duration_minutes must be positive".to_string());
        }
        if self.notifications.scan_interval_secs == 0 {
            return Err("notifications.scan_interval_secs must be positive".to_string());
        }
        if self.notifications.lead_window_minutes <= 0 {
            return Err("notifications.lead_window_minutes must be positive".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    pub enabled: bool,
    /// Alert when a meeting starts within this many minutes
    pub lead_window_minutes: i64,
    pub scan_interval_secs: u64,
    /// Alerts disappear on their own after this long
    pub alert_timeout_secs: i64,
    pub use_system_notifications: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            lead_window_minutes: 5,
            scan_interval_secs: 30,
            alert_timeout_secs: 15,
            use_system_notifications: true,
        }
    }
}

impl NotificationSettings {
    pub fn lead_window(&self) -> Duration {
        Duration::minutes(self.lead_window_minutes)
    }

    pub fn scan_interval(&self) -> StdDuration {
        StdDuration::from_secs(self.scan_interval_secs.max(1))
    }

    pub fn alert_timeout(&self) -> Duration {
        Duration::seconds(self.alert_timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    pub model: String,
    pub endpoint: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    pub timeout_secs: u64,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key_env: "API_KEY".to_string(),
            timeout_secs: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.minimum_duration(), Duration::minutes(15));
        assert_eq!(settings.month_visible_per_day, 2);
        assert_eq!(settings.notifications.lead_window(), Duration::minutes(5));
        assert_eq!(settings.notifications.scan_interval(), StdDuration::from_secs(30));
        assert_eq!(settings.notifications.alert_timeout(), Duration::seconds(15));
        assert_eq!(settings.generation.model, "gemini-2.5-flash");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_week_start() {
        let settings = Settings {
            first_day_of_week: 7,
            ..Settings::default()
        };
        assert!(settings.validate().unwrap_err().contains("first_day_of_week"));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let settings: Settings = toml::from_str(
            "first_day_of_week = 1\n[notifications]\nlead_window_minutes = 10\n",
        )
        .unwrap();

        assert_eq!(settings.first_day_of_week, 1);
        assert_eq!(settings.notifications.lead_window_minutes, 10);
        assert_eq!(settings.notifications.scan_interval_secs, 30);
        assert_eq!(settings.generation, GenerationSettings::default());
    }
}
