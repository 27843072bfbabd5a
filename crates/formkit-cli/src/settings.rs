//! CLI settings, read from a TOML file.
//!
//! Missing or unreadable files give the defaults; command-line flags are
//! applied on top by the caller.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub storage: StorageSettings,
    pub notifications: NotificationSettings,
    pub backend: BackendSettings,
}

/// Where preferences are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Preference directory. The platform data dir is used when unset.
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    /// How long a toast stays visible.
    pub duration_ms: u64,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self { duration_ms: 4000 }
    }
}

/// The simulated submission backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendSettings {
    pub latency_ms: u64,
    /// Reject every submission.
    pub fail: bool,
    /// Pause between the success toast and the form closing.
    pub close_delay_ms: u64,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            latency_ms: 1500,
            fail: false,
            close_delay_ms: 2000,
        }
    }
}

impl BackendSettings {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    pub fn close_delay(&self) -> Duration {
        Duration::from_millis(self.close_delay_ms)
    }
}

impl Settings {
    /// Load from `path`, or from the platform config dir when `None`.
    pub fn load(path: Option<&Path>) -> Self {
        match path {
            Some(path) => Self::load_from(path),
            None => Self::load_from(&Self::config_path()),
        }
    }

    /// Load from a specific file.
    pub fn load_from(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(error) => {
                tracing::debug!(path = %path.display(), %error, "no settings file, using defaults");
                return Self::default();
            }
        };
        toml::from_str(&content).unwrap_or_else(|error| {
            tracing::warn!(path = %path.display(), %error, "ignoring malformed settings file");
            Self::default()
        })
    }

    /// Default settings file location.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "formkit", "formkit")
            .map(|dirs| dirs.config_dir().join("settings.toml"))
            .unwrap_or_else(|| PathBuf::from("settings.toml"))
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.notifications.duration_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "[backend]\nfail = true\n").unwrap();

        let settings = Settings::load_from(&path);

        assert!(settings.backend.fail);
        assert_eq!(settings.backend.latency_ms, 1500);
        assert_eq!(settings.notifications.duration_ms, 4000);
        assert_eq!(settings.storage.dir, None);
    }

    #[test]
    fn test_malformed_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "this is = = not toml").unwrap();

        assert_eq!(Settings::load_from(&path), Settings::default());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(Some(&dir.path().join("absent.toml")));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_full_file() {
        let settings: Settings = toml::from_str(
            r#"
            [storage]
            dir = "/tmp/prefs"

            [notifications]
            duration_ms = 250

            [backend]
            latency_ms = 0
            close_delay_ms = 0
            "#,
        )
        .unwrap();
        assert_eq!(settings.storage.dir, Some(PathBuf::from("/tmp/prefs")));
        assert_eq!(settings.toast_duration(), Duration::from_millis(250));
        assert_eq!(settings.backend.latency(), Duration::ZERO);
    }
}
