//! Save-then-load behavior across backends.

use formkit_prefs::{
    FileStorage, HexColor, MemoryStorage, PreferenceStore, RememberedAccount, SHARE_KEY,
    ShareChannel, ShareProgress, Snapshot, THEME_KEY, ThemeMode, ThemePreferences,
};
use proptest::prelude::*;
use tempfile::tempdir;

fn hex_color() -> impl Strategy<Value = HexColor> {
    "#[0-9a-f]{6}".prop_map(|s| HexColor::parse(&s).unwrap())
}

fn theme() -> impl Strategy<Value = ThemePreferences> {
    (hex_color(), hex_color(), hex_color(), any::<bool>()).prop_map(|(p, s, a, dark)| {
        ThemePreferences {
            primary: p,
            secondary: s,
            accent: a,
            mode: if dark { ThemeMode::Dark } else { ThemeMode::Light },
        }
    })
}

fn share_progress() -> impl Strategy<Value = ShareProgress> {
    proptest::sample::subsequence(ShareChannel::all().to_vec(), 0..=ShareChannel::all().len())
        .prop_map(|channels| {
            let mut progress = ShareProgress::default();
            for channel in channels {
                progress.record(channel);
            }
            progress
        })
}

proptest! {
    #[test]
    fn theme_round_trips(theme in theme()) {
        let store = PreferenceStore::new(MemoryStorage::new());
        store.save(THEME_KEY, &theme);
        prop_assert_eq!(store.load::<ThemePreferences>(THEME_KEY), theme);
    }

    #[test]
    fn share_progress_round_trips(progress in share_progress()) {
        let store = PreferenceStore::new(MemoryStorage::new());
        store.save(SHARE_KEY, &progress);
        prop_assert_eq!(store.load::<ShareProgress>(SHARE_KEY), progress);
    }

    #[test]
    fn repeated_shares_never_decrease_count(
        shares in proptest::collection::vec(proptest::sample::select(ShareChannel::all().to_vec()), 0..20)
    ) {
        let mut progress = ShareProgress::default();
        let mut unlocks = 0;
        for channel in shares {
            let before = progress.count;
            let outcome = progress.record(channel);
            prop_assert!(progress.count == before || progress.count == before + 1);
            if matches!(outcome, formkit_prefs::ShareOutcome::ChampionUnlocked { .. }) {
                unlocks += 1;
            }
        }
        prop_assert!(unlocks <= 1);
        prop_assert_eq!(unlocks == 1, progress.count >= 3);
    }
}

#[test]
fn test_file_storage_round_trip() {
    let dir = tempdir().unwrap();
    let store = PreferenceStore::new(FileStorage::new(dir.path()));

    let mut theme = ThemePreferences::default();
    theme.apply_preset("sunset").unwrap();
    theme.set_mode(ThemeMode::Dark);
    store.save(THEME_KEY, &theme);

    // A fresh store over the same directory sees the write
    let reopened = PreferenceStore::new(FileStorage::new(dir.path()));
    assert_eq!(reopened.load::<ThemePreferences>(THEME_KEY), theme);
}

#[test]
fn test_file_storage_corrupt_file_loads_defaults() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("theme_preferences.json"), "{ truncated").unwrap();

    let store = PreferenceStore::new(FileStorage::new(dir.path()));
    assert_eq!(
        store.load::<ThemePreferences>(THEME_KEY),
        ThemePreferences::default()
    );
}

#[test]
fn test_load_without_save_gives_defaults() {
    let store = PreferenceStore::new(MemoryStorage::new());
    assert_eq!(store.load::<ThemePreferences>(THEME_KEY), ThemePreferences::default());
    assert_eq!(store.load::<ShareProgress>(SHARE_KEY), ShareProgress::default());
    assert_eq!(
        store.load::<RememberedAccount>("remembered_account"),
        RememberedAccount::default()
    );
}

#[test]
fn test_save_failure_is_swallowed() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "file in the way").unwrap();

    let store = PreferenceStore::new(FileStorage::new(&blocker));
    store.save(THEME_KEY, &ThemePreferences::default());
    assert!(store.try_save(THEME_KEY, &ThemePreferences::default()).is_err());
}

#[test]
fn test_normalize_is_idempotent() {
    let mut progress = ShareProgress::default();
    progress.record(ShareChannel::Email);
    let mut again = progress.clone();
    again.normalize();
    assert_eq!(again, progress);
}
