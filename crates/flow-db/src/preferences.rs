use std::path::Path;

use anyhow::Result;
use tracing::{info, warn};

use flow_types::prefs::{AccentColor, Preferences, ThemeMode};

use crate::Database;

pub const THEME_KEY: &str = "flow-theme";
pub const ACCENT_KEY: &str = "flow-accent";
/// Presence-only key; the stored value is never read.
pub const ENTERED_KEY: &str = "flow-entered";

/// Two scalar preferences and the onboarding flag, read once at startup and
/// written through on every change.
pub struct PreferenceStore {
    db: Database,
    current: Preferences,
}

impl PreferenceStore {
    pub fn new(db: Database) -> Self {
        let current = read_preferences(&db);
        Self { db, current }
    }

    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::new(Database::open(path)?))
    }

    /// Open the device store, falling back to volatile storage if it cannot be
    /// opened. Storage trouble is never surfaced to the user.
    pub fn open_or_volatile(path: &Path) -> Result<Self> {
        match Self::open(path) {
            Ok(store) => Ok(store),
            Err(e) => {
                warn!("Preference storage unavailable at {} ({:#}), using defaults", path.display(), e);
                Ok(Self::new(Database::open_in_memory()?))
            }
        }
    }

    pub fn get(&self) -> Preferences {
        self.current
    }

    pub fn theme(&self) -> ThemeMode {
        self.current.theme
    }

    pub fn accent(&self) -> AccentColor {
        self.current.accent
    }

    pub fn has_entered(&self) -> bool {
        self.current.entered
    }

    pub fn set_theme(&mut self, theme: ThemeMode) {
        self.current.theme = theme;
        self.write(THEME_KEY, theme.as_str());
    }

    pub fn toggle_theme(&mut self) -> ThemeMode {
        let theme = self.current.theme.toggled();
        self.set_theme(theme);
        theme
    }

    pub fn set_accent(&mut self, accent: AccentColor) {
        self.current.accent = accent;
        self.write(ACCENT_KEY, accent.as_str());
    }

    pub fn mark_entered(&mut self) {
        self.current.entered = true;
        self.write(ENTERED_KEY, "true");
    }

    /// In-memory state is authoritative for the session even when the write fails.
    fn write(&self, key: &str, value: &str) {
        match self.db.set_value(key, value) {
            Ok(()) => info!("Preference {} = {}", key, value),
            Err(e) => warn!("Failed to persist preference {}: {:#}", key, e),
        }
    }
}

/// Absent, unreadable, or unrecognised values fall back to defaults.
fn read_preferences(db: &Database) -> Preferences {
    let defaults = Preferences::default();

    let theme = read_key(db, THEME_KEY)
        .and_then(|v| ThemeMode::parse(&v))
        .unwrap_or(defaults.theme);
    let accent = read_key(db, ACCENT_KEY)
        .and_then(|v| AccentColor::parse(&v))
        .unwrap_or(defaults.accent);
    let entered = db.has_key(ENTERED_KEY).unwrap_or_else(|e| {
        warn!("Failed to read preference {}: {:#}", ENTERED_KEY, e);
        false
    });

    Preferences {
        theme,
        accent,
        entered,
    }
}

fn read_key(db: &Database, key: &str) -> Option<String> {
    db.get_value(key).unwrap_or_else(|e| {
        warn!("Failed to read preference {}: {:#}", key, e);
        None
    })
}
