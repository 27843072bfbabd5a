//! Snapshot persistence over a [`Storage`] backend.
//!
//! Snapshots are written as a small JSON envelope:
//!
//! ```text
//! { "version": 1, "data": { ...snapshot fields... } }
//! ```
//!
//! Anything that cannot be read back as the current envelope (missing,
//! unreadable, malformed, written by a newer version) loads as the
//! snapshot's defaults. The two cases are only distinguished in the log.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{PrefsError, Result};
use crate::storage::Storage;

/// Envelope version written by this crate.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// A flat bundle of preference values.
///
/// Implementors should use `#[serde(default)]` so that a stored snapshot
/// missing newer fields still loads.
pub trait Snapshot: Serialize + DeserializeOwned + Default {
    /// Re-derive fields after loading. Runs on every load.
    fn normalize(&mut self) {}
}

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    version: u32,
    data: &'a T,
}

#[derive(Deserialize)]
struct Envelope {
    version: u32,
    data: serde_json::Value,
}

/// Reads and writes named snapshots.
#[derive(Debug, Clone)]
pub struct PreferenceStore<S> {
    storage: S,
}

impl<S: Storage> PreferenceStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Load the snapshot stored under `key`, or defaults.
    pub fn load<T: Snapshot>(&self, key: &str) -> T {
        let mut snapshot: T = self.read_snapshot(key).unwrap_or_default();
        snapshot.normalize();
        snapshot
    }

    fn read_snapshot<T: Snapshot>(&self, key: &str) -> Option<T> {
        let raw = match self.storage.read(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!(key, "no stored preferences, using defaults");
                return None;
            }
            Err(e) => {
                tracing::warn!(key, error = %e, "could not read preferences, using defaults");
                return None;
            }
        };

        let envelope: Envelope = match serde_json::from_str(&raw) {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::warn!(key, error = %e, "malformed preferences, using defaults");
                return None;
            }
        };

        if envelope.version > CURRENT_SCHEMA_VERSION {
            tracing::warn!(
                key,
                found = envelope.version,
                max_supported = CURRENT_SCHEMA_VERSION,
                "preferences written by a newer version, using defaults"
            );
            return None;
        }

        match serde_json::from_value(envelope.data) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                tracing::warn!(key, error = %e, "malformed preferences, using defaults");
                None
            }
        }
    }

    /// Serialize and write `snapshot`, reporting failures.
    pub fn try_save<T: Snapshot>(&self, key: &str, snapshot: &T) -> Result<()> {
        let envelope = EnvelopeRef {
            version: CURRENT_SCHEMA_VERSION,
            data: snapshot,
        };
        let json = serde_json::to_string(&envelope)
            .map_err(|source| PrefsError::Serialization { source })?;
        self.storage.write(key, &json)?;
        tracing::info!(key, "saved preferences");
        Ok(())
    }

    /// Serialize and write `snapshot`.
    ///
    /// Storage is treated as always available: failures are logged and
    /// otherwise ignored.
    pub fn save<T: Snapshot>(&self, key: &str, snapshot: &T) {
        if let Err(e) = self.try_save(key, snapshot) {
            tracing::warn!(key, error = %e, "failed to save preferences");
        }
    }

    /// Delete the value stored under `key`.
    pub fn reset(&self, key: &str) {
        match self.storage.remove(key) {
            Ok(()) => tracing::info!(key, "reset preferences"),
            Err(e) => tracing::warn!(key, error = %e, "failed to reset preferences"),
        }
    }
}

impl<S: Storage + Clone> PreferenceStore<S> {
    /// Open a live handle on the snapshot under `key`.
    pub fn preference<T: Snapshot>(&self, key: &str) -> Preference<T, S> {
        Preference::open(self.clone(), key)
    }
}

/// A loaded snapshot kept in memory and written through on every change.
#[derive(Debug)]
pub struct Preference<T, S> {
    store: PreferenceStore<S>,
    key: String,
    value: T,
}

impl<T: Snapshot, S: Storage> Preference<T, S> {
    /// Load `key` from `store`.
    pub fn open(store: PreferenceStore<S>, key: &str) -> Self {
        let value = store.load(key);
        Self {
            store,
            key: key.to_string(),
            value,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Mutate the value and persist it.
    pub fn update<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> R {
        let result = f(&mut self.value);
        self.store.save(&self.key, &self.value);
        result
    }

    /// Replace the value and persist it.
    pub fn replace(&mut self, value: T) {
        self.value = value;
        self.store.save(&self.key, &self.value);
    }

    /// Discard the in-memory value and load it again.
    pub fn reload(&mut self) {
        self.value = self.store.load(&self.key);
    }

    /// Delete the stored value and restore defaults in memory.
    pub fn reset(&mut self) {
        self.store.reset(&self.key);
        self.value = T::default();
    }
}

impl<T: Snapshot + Clone, S: Storage> Preference<T, S> {
    /// Apply a fallible change; nothing is kept or written if `f` fails.
    pub fn try_update<R>(&mut self, f: impl FnOnce(&mut T) -> Result<R>) -> Result<R> {
        let mut draft = self.value.clone();
        let result = f(&mut draft)?;
        self.value = draft;
        self.store.save(&self.key, &self.value);
        Ok(result)
    }
}
