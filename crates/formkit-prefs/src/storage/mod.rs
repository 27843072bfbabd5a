//! Storage substrate for preference snapshots.
//!
//! A string-keyed, string-valued store with synchronous read, write and
//! remove. Backends:
//! - [`MemoryStorage`] - shared in-process map
//! - [`FileStorage`] - one JSON file per key in a directory

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::Result;

/// Raw key-value access used by [`crate::PreferenceStore`].
pub trait Storage {
    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` if nothing is stored. Returns `Err` only when the
    /// backend itself failed.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

impl<S: Storage + ?Sized> Storage for &S {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
