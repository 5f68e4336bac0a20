//! Durable storage for sessions and settings.
//!
//! SYSTEM CONTEXT
//! ==============
//! The workspace lives entirely in the browser. Sessions and generation
//! settings are serialized as JSON into `localStorage`; session writes are
//! debounced so a burst of streaming chunks turns into one write.
//!
//! ERROR HANDLING
//! ==============
//! Reads never fail: missing or corrupt data loads as empty. Write failures
//! are logged and otherwise ignored; the in-memory state stays authoritative.

#[cfg(test)]
#[path = "persistence_test.rs"]
mod persistence_test;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::state::artifacts::interrupt_streaming;
use crate::state::session::Session;

/// `localStorage` key holding the session list.
pub const SESSIONS_KEY: &str = "dashgen_sessions";
/// `localStorage` key holding generation settings.
pub const SETTINGS_KEY: &str = "dashgen_settings";
/// Quiet period before a scheduled session write is flushed.
pub const SAVE_DEBOUNCE_MS: u32 = 1000;

/// Failure writing to durable storage.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("local storage is unavailable")]
    Unavailable,
    #[error("failed to serialize value: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("storage write failed: {0}")]
    Write(String),
}

/// Key/value text storage. `localStorage` in the browser, a map elsewhere.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    /// # Errors
    ///
    /// Returns [`StorageError`] when the backend rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns [`StorageError`] when the backend rejects the removal.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Browser `localStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

#[cfg(feature = "csr")]
fn local_storage() -> Result<web_sys::Storage, StorageError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or(StorageError::Unavailable)
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            local_storage().ok()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            None
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        #[cfg(feature = "csr")]
        {
            local_storage()?
                .set_item(key, value)
                .map_err(|e| StorageError::Write(format!("{e:?}")))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (key, value);
            Err(StorageError::Unavailable)
        }
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        #[cfg(feature = "csr")]
        {
            local_storage()?
                .remove_item(key)
                .map_err(|e| StorageError::Write(format!("{e:?}")))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            Err(StorageError::Unavailable)
        }
    }
}

/// In-memory store used off-browser and in tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
    read_only: bool,
}

impl MemoryStore {
    /// Store whose writes always fail, for exercising failure paths.
    #[must_use]
    pub fn read_only() -> Self {
        Self { read_only: true, ..Self::default() }
    }

    /// Store pre-seeded with one raw entry.
    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::default();
        store.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.read_only {
            return Err(StorageError::Write("store is read-only".to_owned()));
        }
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        if self.read_only {
            return Err(StorageError::Write("store is read-only".to_owned()));
        }
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Load a JSON value stored under `key`. Missing or corrupt data is `None`.
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("ignoring corrupt storage entry: key={key} error={e}");
            None
        }
    }
}

/// Save a JSON value under `key`.
///
/// # Errors
///
/// Returns [`StorageError`] if serialization or the write fails.
pub fn save_json<T: Serialize + ?Sized>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

/// Session list persistence over a key/value backend.
#[derive(Clone)]
pub struct SessionStore {
    backend: Rc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(backend: Rc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Store backed by `localStorage`.
    #[must_use]
    pub fn browser() -> Self {
        Self::new(Rc::new(LocalStorage))
    }

    #[must_use]
    pub fn backend(&self) -> &dyn KeyValueStore {
        self.backend.as_ref()
    }

    /// All persisted sessions; empty when storage is missing or corrupt.
    ///
    /// Artifacts saved mid-stream come back failed: their stream died with
    /// the page that started it.
    #[must_use]
    pub fn load(&self) -> Vec<Session> {
        let mut sessions: Vec<Session> = load_json(self.backend(), SESSIONS_KEY).unwrap_or_default();
        let settled = interrupt_streaming(&mut sessions);
        if settled > 0 {
            log::info!("loaded sessions had unfinished artifacts: settled={settled}");
        }
        sessions
    }

    /// # Errors
    ///
    /// Returns [`StorageError`] if the write fails.
    pub fn save(&self, sessions: &[Session]) -> Result<(), StorageError> {
        save_json(self.backend(), SESSIONS_KEY, sessions)
    }

    /// # Errors
    ///
    /// Returns [`StorageError`] if the removal fails.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.backend.remove(SESSIONS_KEY)
    }
}

/// Revision-tagged slot coalescing a burst of writes into the latest one.
///
/// Each `schedule` supersedes earlier ones; only a `fire` carrying the most
/// recent revision yields the pending value.
#[derive(Debug)]
pub struct Debouncer<T> {
    revision: u64,
    pending: Option<T>,
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self { revision: 0, pending: None }
    }
}

impl<T> Debouncer<T> {
    pub fn schedule(&mut self, value: T) -> u64 {
        self.revision += 1;
        self.pending = Some(value);
        self.revision
    }

    /// Take the pending value if `revision` is still the latest.
    pub fn fire(&mut self, revision: u64) -> Option<T> {
        if revision == self.revision { self.pending.take() } else { None }
    }

    /// Take the pending value regardless of revision.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Debounced writer for the session list.
#[derive(Clone)]
pub struct SessionSaver {
    store: SessionStore,
    slot: Rc<RefCell<Debouncer<Vec<Session>>>>,
}

impl SessionSaver {
    pub fn new(store: SessionStore) -> Self {
        Self { store, slot: Rc::new(RefCell::new(Debouncer::default())) }
    }

    #[must_use]
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Queue `sessions` for writing after [`SAVE_DEBOUNCE_MS`] of quiet.
    ///
    /// In the browser a timer calls [`Self::fire`]; elsewhere the caller does.
    pub fn schedule(&self, sessions: Vec<Session>) -> u64 {
        let revision = self.slot.borrow_mut().schedule(sessions);
        #[cfg(feature = "csr")]
        {
            let saver = self.clone();
            gloo_timers::callback::Timeout::new(SAVE_DEBOUNCE_MS, move || {
                saver.fire(revision);
            })
            .forget();
        }
        revision
    }

    /// Write the pending list if `revision` is still the latest.
    /// Returns whether a write was attempted.
    pub fn fire(&self, revision: u64) -> bool {
        let pending = self.slot.borrow_mut().fire(revision);
        pending.is_some_and(|sessions| {
            self.write(&sessions);
            true
        })
    }

    /// Write whatever is pending now.
    pub fn flush(&self) -> bool {
        let pending = self.slot.borrow_mut().flush();
        pending.is_some_and(|sessions| {
            self.write(&sessions);
            true
        })
    }

    /// Drop anything pending and remove the stored list.
    pub fn clear(&self) {
        self.slot.borrow_mut().flush();
        if let Err(e) = self.store.clear() {
            log::warn!("failed to clear stored sessions: {e}");
        } else {
            log::info!("cleared stored sessions");
        }
    }

    fn write(&self, sessions: &[Session]) {
        match self.store.save(sessions) {
            Ok(()) => log::debug!("saved sessions: count={}", sessions.len()),
            Err(e) => log::warn!("failed to save sessions: count={} error={e}", sessions.len()),
        }
    }
}
