//! Meeting event store.
//!
//! Owns the authoritative meeting collection, persists it as JSON text in a
//! durable medium, and broadcasts a change signal after every mutation so other
//! views on the same medium re-read. Persistence failures are logged and never
//! surface to callers; the in-memory copy stays authoritative until the next
//! successful flush.

use std::sync::{Mutex, MutexGuard};

use chrono::Duration;

use crate::error::{CalendarError, CalendarResult};
use crate::models::meeting::Meeting;
use crate::models::settings::Settings;

mod changes;
pub mod crud;
pub mod queries;
mod shared;

pub use changes::{ChangeBus, ChangeKind, ChangeSubscription, SharedMedium, StoreChange};

/// Storage key holding the serialized collection.
pub const MEETINGS_KEY: &str = "crm_meetings_data";

#[derive(Default)]
struct StoreState {
    /// Last-known-good collection
    cache: Vec<Meeting>,
    /// The cache holds writes the medium has not accepted yet
    unflushed: bool,
    last_id_millis: i64,
}

/// Durable keyed collection of meetings.
pub struct EventStore {
    shared: SharedMedium,
    key: String,
    minimum_duration: Duration,
    state: Mutex<StoreState>,
}

impl EventStore {
    pub fn new(shared: SharedMedium, minimum_duration: Duration) -> Self {
        Self {
            shared,
            key: MEETINGS_KEY.to_string(),
            minimum_duration,
            state: Mutex::new(StoreState::default()),
        }
    }

    pub fn open(shared: SharedMedium, settings: &Settings) -> Self {
        Self::new(shared, settings.minimum_duration())
    }

    /// Use a different storage key, e.g. to keep two calendars in one medium.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn minimum_duration(&self) -> Duration {
        self.minimum_duration
    }

    /// Observe mutations made through any store on the same medium.
    pub fn subscribe(&self) -> ChangeSubscription {
        self.shared.bus().subscribe()
    }

    /// True while the medium is behind the in-memory collection.
    pub fn has_unflushed_writes(&self) -> bool {
        self.lock_state().unflushed
    }

    fn lock_state(&self) -> MutexGuard<'_, StoreState> {
        // A panic elsewhere must not take the calendar down with it.
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn read_collection(&self) -> CalendarResult<Option<Vec<Meeting>>> {
        let text = self
            .shared
            .medium()
            .read(&self.key)
            .map_err(CalendarError::persistence)?;

        match text {
            Some(text) => Ok(Some(shared::decode_meetings(&text)?)),
            None => Ok(None),
        }
    }

    /// Current collection: fresh from the medium, or the cache when the medium
    /// is unreadable or behind.
    fn load_locked(&self, state: &mut StoreState) -> Vec<Meeting> {
        if state.unflushed {
            // Other views read the medium, so they only now see the held writes.
            if self.flush_locked(state) {
                log::info!("Saved meetings held back by an earlier storage failure");
                self.shared.bus().publish(StoreChange::flushed());
            }
            return state.cache.clone();
        }

        match self.read_collection() {
            Ok(Some(meetings)) => {
                state.cache = meetings.clone();
                meetings
            }
            Ok(None) => state.cache.clone(),
            Err(err) => {
                log::error!(
                    "Failed to load meetings from storage, using last known state: {}",
                    err
                );
                state.cache.clone()
            }
        }
    }

    /// Write the cache to the medium. Returns whether the write succeeded.
    fn flush_locked(&self, state: &mut StoreState) -> bool {
        let result = shared::encode_meetings(&state.cache)
            .map_err(CalendarError::from)
            .and_then(|text| {
                self.shared
                    .medium()
                    .write(&self.key, &text)
                    .map_err(CalendarError::persistence)
            });

        match result {
            Ok(()) => {
                state.unflushed = false;
                true
            }
            Err(err) => {
                state.unflushed = true;
                log::error!("Failed to save meetings to storage: {}", err);
                false
            }
        }
    }

    /// Replace the collection, persist it, and signal observers.
    fn commit_locked(&self, state: &mut StoreState, meetings: Vec<Meeting>, change: StoreChange) {
        state.cache = meetings;
        self.flush_locked(state);
        self.shared.bus().publish(change);
    }
}
