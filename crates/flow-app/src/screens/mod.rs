pub mod chats;
pub mod feed;
pub mod notifications;
pub mod profile;
pub mod stories;
pub mod story_overlay;

use chrono::{DateTime, Utc};

pub use chats::ChatsScreen;
pub use feed::FeedScreen;
pub use notifications::{NotificationsScreen, ReadFilter};
pub use profile::{ProfileScreen, ProfileTab};
pub use stories::StoriesScreen;
pub use story_overlay::StoryOverlay;

/// The screen mounted for the current route.
pub enum Screen {
    Feed(FeedScreen),
    Chats(ChatsScreen),
    Stories(StoriesScreen),
    Notifications(NotificationsScreen),
    Profile(ProfileScreen),
}

impl Screen {
    pub fn render(&self, now: DateTime<Utc>) -> Vec<String> {
        match self {
            Screen::Feed(s) => s.render(now),
            Screen::Chats(s) => s.render(now),
            Screen::Stories(s) => s.render(now),
            Screen::Notifications(s) => s.render(now),
            Screen::Profile(s) => s.render(now),
        }
    }

    /// The story overlay, on screens that host one.
    pub fn stories(&self) -> Option<&StoryOverlay> {
        match self {
            Screen::Feed(s) => Some(s.stories()),
            Screen::Stories(s) => Some(s.stories()),
            _ => None,
        }
    }

    pub fn stories_mut(&mut self) -> Option<&mut StoryOverlay> {
        match self {
            Screen::Feed(s) => Some(s.stories_mut()),
            Screen::Stories(s) => Some(s.stories_mut()),
            _ => None,
        }
    }

    /// Drop a finished story viewer, returning the screen to its list.
    pub fn dismiss_closed_story(&mut self) -> bool {
        self.stories_mut().is_some_and(StoryOverlay::dismiss_if_closed)
    }
}
