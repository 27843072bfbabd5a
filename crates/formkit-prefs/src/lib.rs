//! Persisted user preferences for formkit.
//!
//! Preferences are small serde snapshots stored under a string key in a
//! synchronous key-value [`Storage`]. Loading never fails: missing or
//! unreadable data yields the snapshot's defaults. Saving writes through
//! immediately.
//!
//! # Snapshots
//!
//! - [`ThemePreferences`] - color set and light/dark mode
//! - [`ShareProgress`] - channels shared to, with the champion unlock
//! - [`RememberedAccount`] - email kept by the sign-in form
//!
//! # Example
//!
//! ```
//! use formkit_prefs::{MemoryStorage, PreferenceStore, THEME_KEY, ThemePreferences};
//!
//! let store = PreferenceStore::new(MemoryStorage::new());
//! let mut theme = store.preference::<ThemePreferences>(THEME_KEY);
//! theme.try_update(|t| t.set_primary("#FF0000")).unwrap();
//!
//! let reloaded: ThemePreferences = store.load(THEME_KEY);
//! assert_eq!(reloaded.primary.as_str(), "#ff0000");
//! ```

mod account;
mod error;
mod share;
mod storage;
mod store;
mod theme;

pub use account::{ACCOUNT_KEY, RememberedAccount};
pub use error::{PrefsError, Result};
pub use share::{
    CHAMPION_THRESHOLD, SHARE_KEY, ShareChannel, ShareOutcome, ShareProgress, ShareTracker,
};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::{CURRENT_SCHEMA_VERSION, Preference, PreferenceStore, Snapshot};
pub use theme::{HexColor, THEME_KEY, ThemeMode, ThemePreferences, preset_names};
