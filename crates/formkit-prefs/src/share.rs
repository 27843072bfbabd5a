//! Social-share progress and the champion unlock.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use formkit_notify::Notifier;
use serde::{Deserialize, Serialize};

use crate::error::PrefsError;
use crate::storage::Storage;
use crate::store::{Preference, PreferenceStore, Snapshot};

/// Storage key for the share-progress snapshot.
pub const SHARE_KEY: &str = "share_progress";

/// Distinct channels needed to unlock champion.
pub const CHAMPION_THRESHOLD: usize = 3;

/// A place the page can be shared to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShareChannel {
    Twitter,
    Facebook,
    Linkedin,
    Whatsapp,
    Email,
    CopyLink,
}

impl ShareChannel {
    pub const fn all() -> &'static [ShareChannel] {
        &[
            Self::Twitter,
            Self::Facebook,
            Self::Linkedin,
            Self::Whatsapp,
            Self::Email,
            Self::CopyLink,
        ]
    }

    /// Display name.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Twitter => "Twitter",
            Self::Facebook => "Facebook",
            Self::Linkedin => "LinkedIn",
            Self::Whatsapp => "WhatsApp",
            Self::Email => "Email",
            Self::CopyLink => "Copy link",
        }
    }

    /// Identifier used on the command line and in storage.
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::Twitter => "twitter",
            Self::Facebook => "facebook",
            Self::Linkedin => "linkedin",
            Self::Whatsapp => "whatsapp",
            Self::Email => "email",
            Self::CopyLink => "copy-link",
        }
    }
}

impl fmt::Display for ShareChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ShareChannel {
    type Err = PrefsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|channel| channel.slug() == wanted || channel.label().to_lowercase() == wanted)
            .ok_or_else(|| PrefsError::UnknownChannel {
                name: s.to_string(),
            })
    }
}

/// Result of recording a share.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    /// New channel recorded; `count` distinct channels so far.
    Recorded { count: usize },
    /// New channel recorded and it was the one that reached the threshold.
    ChampionUnlocked { count: usize },
    /// Channel was already recorded; nothing changed.
    AlreadyRecorded,
}

/// Channels the user has shared to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareProgress {
    pub channels: BTreeSet<ShareChannel>,
    /// Number of distinct channels. Recomputed from `channels` on load.
    pub count: usize,
    /// Sticky once set.
    pub champion: bool,
}

impl Snapshot for ShareProgress {
    fn normalize(&mut self) {
        self.count = self.channels.len();
        if self.count >= CHAMPION_THRESHOLD {
            self.champion = true;
        }
    }
}

impl ShareProgress {
    pub fn has_shared(&self, channel: ShareChannel) -> bool {
        self.channels.contains(&channel)
    }

    /// Record a share on `channel`.
    pub fn record(&mut self, channel: ShareChannel) -> ShareOutcome {
        if !self.channels.insert(channel) {
            return ShareOutcome::AlreadyRecorded;
        }
        self.count = self.channels.len();
        if !self.champion && self.count >= CHAMPION_THRESHOLD {
            self.champion = true;
            ShareOutcome::ChampionUnlocked { count: self.count }
        } else {
            ShareOutcome::Recorded { count: self.count }
        }
    }

    /// Channels still needed for champion, zero once unlocked.
    pub fn remaining(&self) -> usize {
        if self.champion {
            0
        } else {
            CHAMPION_THRESHOLD.saturating_sub(self.count)
        }
    }
}

/// Records shares through a persisted [`ShareProgress`] and tells the user about it.
#[derive(Debug)]
pub struct ShareTracker<S> {
    progress: Preference<ShareProgress, S>,
    notifier: Notifier,
}

impl<S: Storage + Clone> ShareTracker<S> {
    pub fn new(store: &PreferenceStore<S>, notifier: Notifier) -> Self {
        Self {
            progress: store.preference(SHARE_KEY),
            notifier,
        }
    }
}

impl<S: Storage> ShareTracker<S> {
    pub fn progress(&self) -> &ShareProgress {
        self.progress.get()
    }

    pub fn is_champion(&self) -> bool {
        self.progress.get().champion
    }

    /// Record a share on `channel`.
    ///
    /// A repeat share is a no-op with an informational notice.
    pub fn share(&mut self, channel: ShareChannel) -> ShareOutcome {
        if self.progress.get().has_shared(channel) {
            self.notifier
                .info(&format!("You've already shared on {channel}. Try another channel!"));
            return ShareOutcome::AlreadyRecorded;
        }

        let outcome = self.progress.update(|progress| progress.record(channel));
        match outcome {
            ShareOutcome::Recorded { count } => {
                tracing::info!(channel = channel.slug(), count, "recorded share");
                self.notifier.success(&format!(
                    "Thanks for sharing on {channel}! ({count}/{CHAMPION_THRESHOLD})"
                ));
            }
            ShareOutcome::ChampionUnlocked { count } => {
                tracing::info!(channel = channel.slug(), count, "champion unlocked");
                self.notifier.success(&format!(
                    "Champion unlocked! You've shared on {count} channels."
                ));
            }
            ShareOutcome::AlreadyRecorded => {}
        }
        outcome
    }

    /// Forget all recorded shares.
    pub fn reset(&mut self) {
        self.progress.reset();
        self.notifier.info("Share progress has been reset");
    }
}
