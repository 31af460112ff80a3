use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

use crate::error::{CalendarError, CalendarResult};
use crate::models::settings::Settings;

const SETTINGS_FILE: &str = "settings.toml";
const DATABASE_FILE: &str = "meetings.db";

pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "KenBoyle", "MeetingScheduler")
}

/// `<data dir>/meetings.db`, or `meetings.db` in the working directory when
/// the platform has no data dir.
pub fn default_database_path() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().join(DATABASE_FILE))
        .unwrap_or_else(|| PathBuf::from(DATABASE_FILE))
}

/// Settings stored as TOML on disk.
pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Service for `<config dir>/settings.toml`.
    pub fn from_project_dirs() -> Option<Self> {
        project_dirs().map(|dirs| Self::new(dirs.config_dir().join(SETTINGS_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings; a missing file yields the defaults.
    pub fn load(&self) -> CalendarResult<Settings> {
        if !self.path.exists() {
            log::info!("No settings at {}, using defaults", self.path.display());
            return Ok(Settings::default());
        }

        let text = fs::read_to_string(&self.path).map_err(|e| {
            CalendarError::Config(format!("Failed to read {}: {}", self.path.display(), e))
        })?;
        let settings: Settings = toml::from_str(&text).map_err(|e| {
            CalendarError::Config(format!("Invalid settings in {}: {}", self.path.display(), e))
        })?;
        settings.validate().map_err(CalendarError::Config)?;

        Ok(settings)
    }

    pub fn save(&self, settings: &Settings) -> Result<()> {
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let text = toml::to_string_pretty(settings).context("Failed to serialize settings")?;
        fs::write(&self.path, text)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        Ok(())
    }

    /// Database file for `settings`, falling back to the platform data dir.
    pub fn resolve_database_path(settings: &Settings) -> PathBuf {
        settings
            .database_path
            .clone()
            .unwrap_or_else(default_database_path)
    }
}
