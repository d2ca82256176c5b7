use serde::{Deserialize, Serialize};

// -- Display mode --

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parse a stored value. Unknown values yield `None` so callers can fall
    /// back to the default.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }
}

// -- Accent palette --

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccentColor {
    #[default]
    Blue,
    Purple,
    Green,
    Orange,
    Pink,
}

impl AccentColor {
    pub const ALL: [AccentColor; 5] = [
        Self::Blue,
        Self::Purple,
        Self::Green,
        Self::Orange,
        Self::Pink,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Purple => "purple",
            Self::Green => "green",
            Self::Orange => "orange",
            Self::Pink => "pink",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == value)
    }

    /// Name shown in the accent picker.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Blue => "Ocean",
            Self::Purple => "Lavender",
            Self::Green => "Forest",
            Self::Orange => "Sunset",
            Self::Pink => "Rose",
        }
    }
}

/// Snapshot of the persisted preferences, read once at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Preferences {
    pub theme: ThemeMode,
    pub accent: AccentColor,
    pub entered: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_parse_rejects_unknown_values() {
        assert_eq!(ThemeMode::parse("dark"), Some(ThemeMode::Dark));
        assert_eq!(ThemeMode::parse("Dark"), None);
        assert_eq!(ThemeMode::Light.toggled(), ThemeMode::Dark);
    }

    #[test]
    fn accent_parse_covers_palette() {
        for accent in AccentColor::ALL {
            assert_eq!(AccentColor::parse(accent.as_str()), Some(accent));
        }
        assert_eq!(AccentColor::parse("teal"), None);
    }
}
