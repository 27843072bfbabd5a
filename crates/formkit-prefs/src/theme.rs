//! Theme customizer preferences.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PrefsError, Result};
use crate::store::Snapshot;

/// Storage key for the theme snapshot.
pub const THEME_KEY: &str = "theme_preferences";

/// A `#rrggbb` color, always lower-case.
///
/// Parsing accepts `#rgb` and `#rrggbb` in any case, with or without the
/// leading `#`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    pub fn parse(value: &str) -> Result<Self> {
        let invalid = || PrefsError::InvalidColor {
            value: value.to_string(),
        };
        let trimmed = value.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let expanded = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect::<String>(),
            6 => digits.to_string(),
            _ => return Err(invalid()),
        };
        Ok(Self(format!("#{}", expanded.to_ascii_lowercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// RGB components.
    pub fn rgb(&self) -> (u8, u8, u8) {
        let channel =
            |range: std::ops::Range<usize>| u8::from_str_radix(&self.0[range], 16).unwrap_or(0);
        (channel(1..3), channel(3..5), channel(5..7))
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for HexColor {
    type Err = PrefsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for HexColor {
    type Error = PrefsError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(value: HexColor) -> Self {
        value.0
    }
}

/// Light or dark page mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl FromStr for ThemeMode {
    type Err = PrefsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(PrefsError::InvalidMode {
                value: s.to_string(),
            }),
        }
    }
}

/// Built-in color sets: (name, primary, secondary, accent).
const PRESETS: &[(&str, &str, &str, &str)] = &[
    ("default", "#4f46e5", "#0ea5e9", "#f59e0b"),
    ("ocean", "#0369a1", "#06b6d4", "#22d3ee"),
    ("sunset", "#ea580c", "#db2777", "#facc15"),
    ("forest", "#15803d", "#65a30d", "#a16207"),
    ("midnight", "#1e1b4b", "#4338ca", "#c084fc"),
];

/// Names of the built-in presets.
pub fn preset_names() -> impl Iterator<Item = &'static str> {
    PRESETS.iter().map(|(name, ..)| *name)
}

/// Active theme colors and mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemePreferences {
    pub primary: HexColor,
    pub secondary: HexColor,
    pub accent: HexColor,
    pub mode: ThemeMode,
}

impl Default for ThemePreferences {
    fn default() -> Self {
        let (_, primary, secondary, accent) = PRESETS[0];
        Self {
            primary: HexColor(primary.to_string()),
            secondary: HexColor(secondary.to_string()),
            accent: HexColor(accent.to_string()),
            mode: ThemeMode::Light,
        }
    }
}

impl Snapshot for ThemePreferences {}

impl ThemePreferences {
    pub fn set_primary(&mut self, value: &str) -> Result<()> {
        self.primary = HexColor::parse(value)?;
        Ok(())
    }

    pub fn set_secondary(&mut self, value: &str) -> Result<()> {
        self.secondary = HexColor::parse(value)?;
        Ok(())
    }

    pub fn set_accent(&mut self, value: &str) -> Result<()> {
        self.accent = HexColor::parse(value)?;
        Ok(())
    }

    pub fn set_mode(&mut self, mode: ThemeMode) {
        self.mode = mode;
    }

    pub fn toggle_mode(&mut self) -> ThemeMode {
        self.mode = self.mode.toggled();
        self.mode
    }

    /// Replace the color set with a named preset. The mode is kept.
    pub fn apply_preset(&mut self, name: &str) -> Result<()> {
        let wanted = name.trim().to_lowercase();
        let (_, primary, secondary, accent) = PRESETS
            .iter()
            .find(|(preset, ..)| *preset == wanted)
            .ok_or_else(|| PrefsError::UnknownPreset {
                name: name.to_string(),
            })?;
        self.primary = HexColor::parse(primary)?;
        self.secondary = HexColor::parse(secondary)?;
        self.accent = HexColor::parse(accent)?;
        Ok(())
    }

    /// Name of the preset matching the current colors, if any.
    pub fn preset_name(&self) -> Option<&'static str> {
        PRESETS
            .iter()
            .find(|(_, p, s, a)| {
                self.primary.as_str() == *p
                    && self.secondary.as_str() == *s
                    && self.accent.as_str() == *a
            })
            .map(|(name, ..)| *name)
    }
}
