use chrono::{DateTime, Utc};
use uuid::Uuid;

use flow_stories::PlaybackError;

use crate::context::AppContext;
use crate::screens::story_overlay::StoryOverlay;
use crate::views::PostCard;
use crate::views::story_bar::story_ring;

/// Home feed: the stories bar over every post in the catalog.
pub struct FeedScreen {
    ctx: AppContext,
    cards: Vec<PostCard>,
    stories: StoryOverlay,
}

impl FeedScreen {
    pub fn new(ctx: AppContext) -> Self {
        let cards = ctx.catalog().posts().iter().map(PostCard::new).collect();
        Self {
            ctx,
            cards,
            stories: StoryOverlay::new(),
        }
    }

    pub fn cards(&self) -> &[PostCard] {
        &self.cards
    }

    pub fn card(&self, post_id: Uuid) -> Option<&PostCard> {
        self.cards.iter().find(|c| c.post_id() == post_id)
    }

    fn card_mut(&mut self, post_id: Uuid) -> Option<&mut PostCard> {
        self.cards.iter_mut().find(|c| c.post_id() == post_id)
    }

    pub fn toggle_like(&mut self, post_id: Uuid) -> bool {
        let Some(intent) = self.card_mut(post_id).map(PostCard::toggle_like) else {
            return false;
        };
        self.ctx.intent(intent);
        true
    }

    pub fn toggle_comments(&mut self, post_id: Uuid) -> bool {
        self.card_mut(post_id).map(PostCard::toggle_comments).is_some()
    }

    pub fn set_comment_draft(&mut self, post_id: Uuid, text: &str) -> bool {
        self.card_mut(post_id).map(|c| c.set_draft(text)).is_some()
    }

    /// Returns true if a comment left the card.
    pub fn submit_comment(&mut self, post_id: Uuid) -> bool {
        let Some(intent) = self.card_mut(post_id).and_then(PostCard::submit_comment) else {
            return false;
        };
        self.ctx.intent(intent);
        true
    }

    pub fn share(&mut self, post_id: Uuid) -> bool {
        let Some(intent) = self.card(post_id).map(PostCard::share) else {
            return false;
        };
        self.ctx.intent(intent);
        true
    }

    pub fn open_story(&mut self, story_id: Uuid) -> Result<(), PlaybackError> {
        self.stories.open(&self.ctx, story_id)
    }

    pub fn stories(&self) -> &StoryOverlay {
        &self.stories
    }

    pub fn stories_mut(&mut self) -> &mut StoryOverlay {
        &mut self.stories
    }

    pub fn render(&self, now: DateTime<Utc>) -> Vec<String> {
        if self.stories.is_open() {
            return self.stories.render(&self.ctx, now);
        }

        let catalog = self.ctx.catalog();
        let mut ring = vec!["(+ Your Story)".to_string()];
        ring.extend(catalog.stories().iter().filter_map(|story| {
            catalog.user(story.user_id).map(|author| story_ring(story, author))
        }));

        let mut lines = vec![ring.join(" "), String::new()];
        for (post, card) in catalog.posts().iter().zip(&self.cards) {
            let Some(author) = catalog.user(post.user_id) else {
                continue;
            };
            lines.extend(card.render(post, author, now));
            lines.push(String::new());
        }
        lines
    }
}
