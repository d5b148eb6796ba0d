//! Persisted viewer preferences.
//!
//! Preferences live in a single JSON file inside a capability-scoped
//! directory. A missing file means the viewer never chose, and the caller's
//! fallback (typically the system colour scheme) applies.

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use thiserror::Error;

const PREFERENCES_FILE: &str = "preferences.json";
const STAGING_FILE: &str = "preferences.json.tmp";

/// Colour theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Dark surfaces.
    Dark,
    /// Light surfaces.
    Light,
}

impl Theme {
    /// Returns the other theme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

/// Stored preference values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Selected theme.
    pub theme: Theme,
}

/// Errors raised while reading or writing preferences.
#[derive(Debug, Error)]
pub enum PreferencesError {
    /// Filesystem failure.
    #[error("preferences I/O failed: {0}")]
    Io(#[from] std::io::Error),
    /// The stored file is not valid preferences JSON.
    #[error("preferences file is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Result type for preference operations.
pub type PreferencesResult<T> = Result<T, PreferencesError>;

/// Preference file access scoped to one directory.
#[derive(Debug)]
pub struct PreferenceStore {
    dir: Dir,
}

impl PreferenceStore {
    /// Opens `path`, creating the directory when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`PreferencesError::Io`] when the directory cannot be created
    /// or opened.
    pub fn open(path: &Utf8Path) -> PreferencesResult<Self> {
        Dir::create_ambient_dir_all(path, ambient_authority())?;
        let dir = Dir::open_ambient_dir(path, ambient_authority())?;
        Ok(Self { dir })
    }

    /// Wraps an already-open directory.
    #[must_use]
    pub const fn from_dir(dir: Dir) -> Self {
        Self { dir }
    }

    /// Reads the stored preferences, if any were saved.
    ///
    /// # Errors
    ///
    /// Returns [`PreferencesError`] when the file exists but cannot be read
    /// or parsed.
    pub fn load(&self) -> PreferencesResult<Option<Preferences>> {
        match self.dir.read_to_string(PREFERENCES_FILE) {
            Ok(contents) => Ok(Some(serde_json::from_str(&contents)?)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Returns the stored theme, or `fallback` when none is stored or the
    /// file is malformed.
    ///
    /// # Errors
    ///
    /// Returns [`PreferencesError::Io`] when the file cannot be read.
    pub fn theme_or(&self, fallback: Theme) -> PreferencesResult<Theme> {
        match self.load() {
            Ok(stored) => Ok(stored.map_or(fallback, |prefs| prefs.theme)),
            Err(PreferencesError::Malformed(err)) => {
                tracing::warn!(error = %err, "ignoring malformed preferences file");
                Ok(fallback)
            }
            Err(err) => Err(err),
        }
    }

    /// Writes `preferences`, replacing the stored file.
    ///
    /// # Errors
    ///
    /// Returns [`PreferencesError`] when serialization or the write fails.
    pub fn save(&self, preferences: &Preferences) -> PreferencesResult<()> {
        let contents = serde_json::to_string_pretty(preferences)?;
        self.dir.write(STAGING_FILE, contents)?;
        self.dir.rename(STAGING_FILE, &self.dir, PREFERENCES_FILE)?;
        Ok(())
    }

    /// Flips the current theme and stores the result.
    ///
    /// # Errors
    ///
    /// Returns [`PreferencesError`] when the file cannot be read or written.
    pub fn toggle_theme(&self, fallback: Theme) -> PreferencesResult<Theme> {
        let theme = self.theme_or(fallback)?.toggled();
        self.save(&Preferences { theme })?;
        tracing::debug!(?theme, "theme toggled");
        Ok(theme)
    }
}
