//! Durable media: where the event store's text lives between sessions.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use chrono::Local;
use rusqlite::{params, OptionalExtension};

use super::Database;

/// Text key/value storage shared by every view in one session.
#[cfg_attr(test, mockall::automock)]
pub trait DurableMedium: Send + Sync {
    /// Read the text stored under `key`, `None` if nothing was ever written.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the text stored under `key`.
    fn write(&self, key: &str, value: &str) -> Result<()>;
}

/// SQLite-backed medium.
pub struct SqliteMedium {
    db: Mutex<Database>,
}

impl SqliteMedium {
    /// Wrap an open database, creating the storage table if needed.
    pub fn new(db: Database) -> Result<Self> {
        db.initialize_schema()?;
        Ok(Self { db: Mutex::new(db) })
    }

    pub fn open(path: &str) -> Result<Self> {
        Self::new(Database::new(path)?)
    }

    pub fn in_memory() -> Result<Self> {
        Self::open(":memory:")
    }
}

impl DurableMedium for SqliteMedium {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let db = self
            .db
            .lock()
            .map_err(|_| anyhow!("storage connection lock poisoned"))?;

        db.connection()
            .query_row("SELECT value FROM storage WHERE key = ?", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()
            .with_context(|| format!("Failed to read storage key {}", key))
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let db = self
            .db
            .lock()
            .map_err(|_| anyhow!("storage connection lock poisoned"))?;

        db.connection()
            .execute(
                "INSERT INTO storage (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, Local::now().to_rfc3339()],
            )
            .with_context(|| format!("Failed to write storage key {}", key))?;

        Ok(())
    }
}

/// Process-local medium; contents vanish with the process.
#[derive(Default)]
pub struct MemoryMedium {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryMedium {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DurableMedium for MemoryMedium {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| anyhow!("memory storage lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow!("memory storage lock poisoned"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
