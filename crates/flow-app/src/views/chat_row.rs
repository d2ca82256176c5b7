use chrono::{DateTime, Utc};

use flow_types::models::{Chat, DeliveryStatus, Message, User};

use super::avatar;
use super::time::{RelativeStyle, clock, relative};

/// One row of the chat list, laid out against the other participant.
pub fn chat_row(chat: &Chat, other: &User, selected: bool, now: DateTime<Utc>) -> Vec<String> {
    let marker = if selected { "▌" } else { " " };
    let pin = if chat.is_pinned { " 📌" } else { "" };
    let mute = if chat.is_muted { " (muted)" } else { "" };

    let header = format!(
        "{}{}{}{}  {}",
        marker,
        avatar(other, true),
        pin,
        mute,
        relative(chat.last_message.timestamp, now, RelativeStyle::Chat),
    );
    let mut preview = format!("{}  {}", marker, chat.last_message.content);
    if chat.unread_count > 0 {
        preview.push_str(&format!("  ({})", chat.unread_count));
    }

    vec![header, preview]
}

/// Header line of an open chat window.
pub fn presence_line(user: &User) -> String {
    if user.is_online {
        "Online".to_string()
    } else {
        match user.last_seen {
            Some(seen) => format!("Last seen {}", clock(seen)),
            None => "Offline".to_string(),
        }
    }
}

/// One message bubble. Own messages are right-aligned and carry a delivery mark.
pub fn message_bubble(message: &Message, own: bool) -> String {
    if own {
        let status = match message.status {
            DeliveryStatus::Sent => "✓",
            DeliveryStatus::Delivered => "✓✓",
            DeliveryStatus::Read => "✓✓ read",
        };
        format!("{:>48} {} {}", message.content, clock(message.timestamp), status)
    } else {
        format!("{} {}", message.content, clock(message.timestamp))
    }
}
