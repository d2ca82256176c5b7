use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User intents forwarded upward from views to their screen and on to the
/// shell. There is no backend, so the shell only records them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Intent {
    /// The like toggle on a post card changed
    LikePost { post_id: Uuid, liked: bool },

    /// A non-empty comment was submitted on a post
    CommentPost { post_id: Uuid, content: String },

    /// The share control on a post card was pressed
    SharePost { post_id: Uuid },

    /// A non-empty message was sent from the chat window
    SendMessage { chat_id: Uuid, content: String },

    /// A notification row was clicked while unread
    MarkNotificationRead { notification_id: Uuid },

    /// The "mark all read" control was pressed
    MarkAllNotificationsRead,
}

impl Intent {
    /// Returns the record this intent targets, if it targets one.
    pub fn target_id(&self) -> Option<Uuid> {
        match self {
            Self::LikePost { post_id, .. } => Some(*post_id),
            Self::CommentPost { post_id, .. } => Some(*post_id),
            Self::SharePost { post_id } => Some(*post_id),
            Self::SendMessage { chat_id, .. } => Some(*chat_id),
            Self::MarkNotificationRead { notification_id } => Some(*notification_id),
            Self::MarkAllNotificationsRead => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intents_serialize_with_adjacent_tags() {
        let post_id = Uuid::from_u128(7);
        let json = serde_json::to_value(Intent::SharePost { post_id }).unwrap();
        assert_eq!(json["type"], "SharePost");
        assert_eq!(json["data"]["post_id"], post_id.to_string());

        let json = serde_json::to_value(Intent::MarkAllNotificationsRead).unwrap();
        assert_eq!(json["type"], "MarkAllNotificationsRead");
        assert!(Intent::MarkAllNotificationsRead.target_id().is_none());
    }

    #[test]
    fn target_id_names_the_touched_record() {
        let id = Uuid::from_u128(9);
        let targeted = [
            Intent::LikePost { post_id: id, liked: true },
            Intent::CommentPost { post_id: id, content: "hi".into() },
            Intent::SharePost { post_id: id },
            Intent::SendMessage { chat_id: id, content: "hi".into() },
            Intent::MarkNotificationRead { notification_id: id },
        ];
        for intent in targeted {
            assert_eq!(intent.target_id(), Some(id), "{:?}", intent);
        }
    }
}
