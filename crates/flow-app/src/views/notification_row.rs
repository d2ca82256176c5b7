use chrono::{DateTime, Utc};

use flow_types::models::{Notification, NotificationKind, User};

use super::time::{RelativeStyle, relative};

pub fn kind_icon(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Like => "♥",
        NotificationKind::Comment => "💬",
        NotificationKind::Follow => "+",
        NotificationKind::Mention => "@",
        NotificationKind::StoryView => "👁",
        NotificationKind::Message => "✉",
    }
}

pub fn notification_row(notification: &Notification, from: &User, now: DateTime<Utc>) -> String {
    let unread = if notification.is_read { "" } else { " •" };
    format!(
        "{} {} {}  {}{}",
        kind_icon(notification.kind),
        from.name,
        notification.message,
        relative(notification.timestamp, now, RelativeStyle::Ago),
        unread,
    )
}
