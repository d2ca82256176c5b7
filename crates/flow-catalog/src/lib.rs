//! Record Catalog: the read-only, in-memory stand-in for a backend.
//!
//! Records are loaded once from an embedded JSON seed. Seed timestamps are
//! written relative to a fixed anchor and rebased onto the current clock at
//! load, so relative times ("2h", "1d") look the same on every run.

use anyhow::{Context, Result};
use chrono::{DateTime, TimeDelta, Utc};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use flow_types::CURRENT_USER_ID;
use flow_types::models::{Chat, Message, Notification, Post, Story, User};

const SEED: &str = include_str!("../seed/catalog.json");

#[derive(Debug, Deserialize)]
struct Seed {
    anchor: DateTime<Utc>,
    #[serde(flatten)]
    catalog: Catalog,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Catalog {
    users: Vec<User>,
    posts: Vec<Post>,
    chats: Vec<Chat>,
    messages: Vec<Message>,
    stories: Vec<Story>,
    notifications: Vec<Notification>,
}

impl Catalog {
    /// Load the embedded seed with timestamps rebased onto `now`.
    pub fn seed_at(now: DateTime<Utc>) -> Result<Self> {
        let seed: Seed = serde_json::from_str(SEED).context("Record catalog seed is malformed")?;
        let mut catalog = seed.catalog;
        catalog.shift_timestamps(now - seed.anchor);

        info!(
            "Record catalog loaded: {} users, {} posts, {} chats, {} stories, {} notifications",
            catalog.users.len(),
            catalog.posts.len(),
            catalog.chats.len(),
            catalog.stories.len(),
            catalog.notifications.len(),
        );
        Ok(catalog)
    }

    pub fn seed() -> Result<Self> {
        Self::seed_at(Utc::now())
    }

    /// Build a catalog from explicit records. Used by tests and embedders that
    /// bring their own data.
    pub fn from_records(
        users: Vec<User>,
        posts: Vec<Post>,
        chats: Vec<Chat>,
        messages: Vec<Message>,
        stories: Vec<Story>,
        notifications: Vec<Notification>,
    ) -> Self {
        Self {
            users,
            posts,
            chats,
            messages,
            stories,
            notifications,
        }
    }

    fn shift_timestamps(&mut self, delta: TimeDelta) {
        for user in &mut self.users {
            if let Some(seen) = user.last_seen.as_mut() {
                *seen += delta;
            }
        }
        for post in &mut self.posts {
            post.timestamp += delta;
        }
        for chat in &mut self.chats {
            chat.last_message.timestamp += delta;
        }
        for message in &mut self.messages {
            message.timestamp += delta;
        }
        for story in &mut self.stories {
            story.timestamp += delta;
        }
        for notification in &mut self.notifications {
            notification.timestamp += delta;
        }
    }

    // -- Users --

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn user(&self, id: Uuid) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user(CURRENT_USER_ID)
    }

    // -- Posts --

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn posts_by(&self, user_id: Uuid) -> impl Iterator<Item = &Post> {
        self.posts.iter().filter(move |p| p.user_id == user_id)
    }

    // -- Chats & messages --

    pub fn chats(&self) -> &[Chat] {
        &self.chats
    }

    pub fn chat(&self, id: Uuid) -> Option<&Chat> {
        self.chats.iter().find(|c| c.id == id)
    }

    /// Messages of one chat, in catalog order.
    pub fn messages_for(&self, chat_id: Uuid) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(move |m| m.chat_id == chat_id)
    }

    // -- Stories --

    pub fn stories(&self) -> &[Story] {
        &self.stories
    }

    /// Position of a story in playback order.
    pub fn story_index(&self, id: Uuid) -> Option<usize> {
        self.stories.iter().position(|s| s.id == id)
    }

    // -- Notifications --

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_loads_and_references_resolve() {
        let catalog = Catalog::seed().unwrap();

        assert!(catalog.current_user().is_some());
        assert!(!catalog.stories().is_empty());

        for post in catalog.posts() {
            assert!(catalog.user(post.user_id).is_some(), "dangling author on {}", post.id);
        }
        for chat in catalog.chats() {
            assert!(chat.participants.contains(&CURRENT_USER_ID));
            assert_eq!(chat.last_message.chat_id, chat.id);
            assert!(catalog.messages_for(chat.id).count() > 0);
        }
        for story in catalog.stories() {
            assert!(story.duration > 0);
            assert!(catalog.user(story.user_id).is_some());
        }
        for notification in catalog.notifications() {
            assert!(catalog.user(notification.from_user).is_some());
        }
    }

    #[test]
    fn timestamps_are_rebased_onto_now() {
        let now = "2030-01-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let catalog = Catalog::seed_at(now).unwrap();

        // The newest notification was seeded 15 minutes before the anchor.
        let newest = catalog
            .notifications()
            .iter()
            .map(|n| n.timestamp)
            .max()
            .unwrap();
        assert_eq!(now - newest, TimeDelta::minutes(15));
    }

    #[test]
    fn story_index_follows_array_order() {
        let catalog = Catalog::seed().unwrap();
        for (i, story) in catalog.stories().iter().enumerate() {
            assert_eq!(catalog.story_index(story.id), Some(i));
        }
        assert_eq!(catalog.story_index(Uuid::nil()), None);
    }
}
