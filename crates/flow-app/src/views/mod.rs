//! List and card views: map a record (plus any view-local state) to lines of
//! text. User intents are exposed as methods on the stateful cards; the
//! renderers themselves never mutate anything.

pub mod chat_row;
pub mod notification_row;
pub mod post_card;
pub mod story_bar;
pub mod time;

use flow_types::models::User;

pub use post_card::PostCard;

pub fn avatar(user: &User, show_online: bool) -> String {
    if show_online && user.is_online {
        format!("({}) ●", user.name)
    } else {
        format!("({})", user.name)
    }
}

pub fn button(label: &str, disabled: bool) -> String {
    if disabled {
        format!("[{}]·", label)
    } else {
        format!("[{}]", label)
    }
}

pub fn verified_mark(user: &User) -> &'static str {
    if user.verified { " ✓" } else { "" }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn avatar_shows_presence_only_when_asked() {
        let online = fixtures::user(2, "Sarah Chen", true);
        assert_eq!(avatar(&online, true), "(Sarah Chen) ●");
        assert_eq!(avatar(&online, false), "(Sarah Chen)");

        let offline = fixtures::user(3, "Mike Rodriguez", false);
        assert_eq!(avatar(&offline, true), "(Mike Rodriguez)");
    }

    #[test]
    fn disabled_button_is_marked() {
        assert_eq!(button("Send", false), "[Send]");
        assert_eq!(button("Send", true), "[Send]·");
    }
}
