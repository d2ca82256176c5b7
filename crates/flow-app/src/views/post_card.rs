use chrono::{DateTime, Utc};
use uuid::Uuid;

use flow_types::events::Intent;
use flow_types::models::{Post, User};

use super::time::{RelativeStyle, relative};
use super::{avatar, button, verified_mark};

/// A post card with its view-local state. Likes and comments never reach the
/// catalog; the card keeps its own copy seeded from the post.
#[derive(Debug, Clone)]
pub struct PostCard {
    post_id: Uuid,
    liked: bool,
    likes: u32,
    show_comments: bool,
    draft: String,
}

impl PostCard {
    pub fn new(post: &Post) -> Self {
        Self {
            post_id: post.id,
            liked: post.is_liked,
            likes: post.likes,
            show_comments: false,
            draft: String::new(),
        }
    }

    pub fn post_id(&self) -> Uuid {
        self.post_id
    }

    pub fn liked(&self) -> bool {
        self.liked
    }

    pub fn likes(&self) -> u32 {
        self.likes
    }

    pub fn comments_open(&self) -> bool {
        self.show_comments
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn toggle_like(&mut self) -> Intent {
        self.liked = !self.liked;
        self.likes = if self.liked {
            self.likes.saturating_add(1)
        } else {
            self.likes.saturating_sub(1)
        };
        Intent::LikePost {
            post_id: self.post_id,
            liked: self.liked,
        }
    }

    pub fn toggle_comments(&mut self) {
        self.show_comments = !self.show_comments;
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Submit the comment draft. Blank drafts are ignored.
    pub fn submit_comment(&mut self) -> Option<Intent> {
        if self.draft.trim().is_empty() {
            return None;
        }
        let content = std::mem::take(&mut self.draft);
        self.show_comments = true;
        Some(Intent::CommentPost {
            post_id: self.post_id,
            content,
        })
    }

    pub fn share(&self) -> Intent {
        Intent::SharePost {
            post_id: self.post_id,
        }
    }

    pub fn render(&self, post: &Post, author: &User, now: DateTime<Utc>) -> Vec<String> {
        let mut lines = vec![
            format!("{}{}", avatar(author, true), verified_mark(author)),
            format!(
                "@{} · {}",
                author.username,
                relative(post.timestamp, now, RelativeStyle::Compact)
            ),
            post.content.clone(),
        ];

        if let Some(image) = &post.image {
            lines.push(format!("[image] {}", image));
        }
        if let Some(video) = &post.video {
            lines.push(format!("[video] {}", video));
        }

        let heart = if self.liked { "♥" } else { "♡" };
        lines.push(format!(
            "{} {}   💬 {}   ↗ {}",
            heart, self.likes, post.comments, post.shares
        ));

        if self.show_comments {
            let draft = if self.draft.is_empty() {
                "Write a comment..."
            } else {
                self.draft.as_str()
            };
            lines.push(format!(
                "> {} {}",
                draft,
                button("Send", self.draft.trim().is_empty())
            ));
        }

        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::fixtures;
    use flow_types::models::PostKind;

    fn post(liked: bool, likes: u32) -> Post {
        Post {
            id: Uuid::from_u128(0x101),
            user_id: Uuid::from_u128(2),
            content: "Golden hour".into(),
            image: Some("sunset.jpg".into()),
            video: None,
            timestamp: fixtures::now() - chrono::TimeDelta::hours(2),
            likes,
            comments: 4,
            shares: 1,
            is_liked: liked,
            kind: PostKind::Image,
        }
    }

    #[test]
    fn like_toggle_moves_count_by_one() {
        let mut card = PostCard::new(&post(false, 10));

        let intent = card.toggle_like();
        assert_eq!(intent, Intent::LikePost { post_id: card.post_id(), liked: true });
        assert_eq!((card.liked(), card.likes()), (true, 11));

        card.toggle_like();
        assert_eq!((card.liked(), card.likes()), (false, 10));
    }

    #[test]
    fn blank_comment_is_ignored() {
        let mut card = PostCard::new(&post(false, 0));
        card.set_draft("   ");
        assert_eq!(card.submit_comment(), None);
        assert!(!card.comments_open());
    }

    #[test]
    fn comment_submission_clears_draft_and_opens_box() {
        let mut card = PostCard::new(&post(true, 3));
        card.set_draft("Stunning!");

        let intent = card.submit_comment().unwrap();
        assert_eq!(
            intent,
            Intent::CommentPost { post_id: card.post_id(), content: "Stunning!".into() }
        );
        assert!(card.draft().is_empty());
        assert!(card.comments_open());
    }

    #[test]
    fn render_reflects_local_like_state() {
        let author = fixtures::user(2, "Sarah Chen", true);
        let p = post(false, 10);
        let mut card = PostCard::new(&p);
        card.toggle_like();

        let lines = card.render(&p, &author, fixtures::now());
        assert_eq!(lines[1], "@sarahchen · 2h");
        assert!(lines.iter().any(|l| l == "[image] sunset.jpg"));
        assert!(lines.iter().any(|l| l.starts_with("♥ 11")));
    }
}
