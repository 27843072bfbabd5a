use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::Storage;
use crate::error::{PrefsError, Result};

/// Directory-backed storage: each key is stored as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Get the default data directory.
    pub fn default_dir() -> PathBuf {
        directories::ProjectDirs::from("com", "formkit", "formkit")
            .map(|dirs| dirs.data_dir().join("preferences"))
            .unwrap_or_else(|| PathBuf::from("preferences"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(PrefsError::InvalidKey {
                key: key.to_string(),
            });
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PrefsError::Io {
                operation: "read",
                path,
                source: e,
            }),
        }
    }

    /// Writes go to a temp file first and are renamed into place, so a
    /// crash mid-write leaves the previous value intact.
    fn write(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let temp_path = path.with_extension("json.tmp");

        fs::create_dir_all(&self.dir).map_err(|e| PrefsError::Io {
            operation: "create directory",
            path: self.dir.clone(),
            source: e,
        })?;

        let result = write_temp(&temp_path, value).and_then(|()| {
            fs::rename(&temp_path, &path).map_err(|e| PrefsError::AtomicWriteFailed {
                temp_path: temp_path.clone(),
                target_path: path.clone(),
                source: e,
            })
        });
        if let Err(e) = result {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }

        tracing::debug!(key, path = %path.display(), "wrote preference file");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PrefsError::Io {
                operation: "remove",
                path,
                source: e,
            }),
        }
    }
}

fn write_temp(temp_path: &Path, value: &str) -> Result<()> {
    let io_error = |operation: &'static str, source: std::io::Error| PrefsError::Io {
        operation,
        path: temp_path.to_path_buf(),
        source,
    };
    let mut file = File::create(temp_path).map_err(|e| io_error("create", e))?;
    file.write_all(value.as_bytes())
        .map_err(|e| io_error("write", e))?;
    file.sync_all().map_err(|e| io_error("sync", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_then_read() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("prefs"));

        storage.write("theme_preferences", "{}").unwrap();

        assert_eq!(
            storage.read("theme_preferences").unwrap().as_deref(),
            Some("{}")
        );
        assert!(dir.path().join("prefs/theme_preferences.json").exists());
        assert!(!dir.path().join("prefs/theme_preferences.json.tmp").exists());
    }

    #[test]
    fn test_read_missing_is_none() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        assert_eq!(storage.read("nothing").unwrap(), None);
    }

    #[test]
    fn test_remove() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        storage.write("k", "v").unwrap();
        storage.remove("k").unwrap();
        storage.remove("k").unwrap();
        assert_eq!(storage.read("k").unwrap(), None);
    }

    #[test]
    fn test_failed_write_removes_temp_file() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        // A non-empty directory where the file should go makes the rename fail
        fs::create_dir_all(dir.path().join("theme.json/inner")).unwrap();

        let err = storage.write("theme", "{}").unwrap_err();

        assert!(matches!(err, PrefsError::AtomicWriteFailed { .. }), "{err}");
        assert!(!dir.path().join("theme.json.tmp").exists());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        for key in ["", "../escape", "a/b", ".hidden"] {
            assert!(matches!(
                storage.write(key, "v"),
                Err(PrefsError::InvalidKey { .. })
            ));
        }
    }
}
