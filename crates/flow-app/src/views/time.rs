use chrono::{DateTime, Local, Utc};

/// Wording for timestamps younger than an hour and the unit suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeStyle {
    /// `just now`, `3h`, `2d`
    Compact,
    /// `now`, `3h`, `2d`
    Chat,
    /// `just now`, `3h ago`, `2d ago`
    Ago,
}

/// Age of `timestamp` at `now`, in whole hours or days.
pub fn relative(timestamp: DateTime<Utc>, now: DateTime<Utc>, style: RelativeStyle) -> String {
    let hours = (now - timestamp).num_hours();

    if hours < 1 {
        return match style {
            RelativeStyle::Chat => "now".into(),
            RelativeStyle::Compact | RelativeStyle::Ago => "just now".into(),
        };
    }

    let (amount, unit) = if hours < 24 { (hours, "h") } else { (hours / 24, "d") };
    match style {
        RelativeStyle::Ago => format!("{}{} ago", amount, unit),
        RelativeStyle::Compact | RelativeStyle::Chat => format!("{}{}", amount, unit),
    }
}

/// Wall-clock `HH:MM` in the local zone, as shown on message bubbles.
pub fn clock(timestamp: DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%H:%M").to_string()
}
