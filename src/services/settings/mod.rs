mod service;

pub use service::{default_database_path, project_dirs, SettingsService};
