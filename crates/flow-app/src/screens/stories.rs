use chrono::{DateTime, Utc};
use uuid::Uuid;

use flow_stories::PlaybackError;

use crate::context::AppContext;
use crate::screens::story_overlay::StoryOverlay;
use crate::views::time::{RelativeStyle, relative};
use crate::views::{avatar, button};

pub struct StoriesScreen {
    ctx: AppContext,
    stories: StoryOverlay,
}

impl StoriesScreen {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            stories: StoryOverlay::new(),
        }
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
        let mut lines = vec![
            format!("Stories  {}", button("+ Create Story", false)),
            String::new(),
            "Your Story".to_string(),
            "  (+) Add to your story · Share a photo or video".to_string(),
            String::new(),
            "Recent Stories".to_string(),
        ];

        for (i, story) in catalog.stories().iter().enumerate() {
            let Some(author) = catalog.user(story.user_id) else {
                continue;
            };
            let unseen = if story.has_viewed { " " } else { "•" };
            lines.push(format!(
                "{}{:>2}. {}  {}  ▶",
                unseen,
                i + 1,
                avatar(author, false),
                relative(story.timestamp, now, RelativeStyle::Ago),
            ));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use flow_catalog::Catalog;

    #[test]
    fn grid_marks_unseen_stories() {
        let (ctx, _rx) = AppContext::new(Arc::new(Catalog::seed().unwrap()));
        let screen = StoriesScreen::new(ctx.clone());
        let lines = screen.render(Utc::now());

        for (i, story) in ctx.catalog().stories().iter().enumerate() {
            let row = lines
                .iter()
                .find(|l| l.contains(&format!("{:>2}. ", i + 1)))
                .unwrap();
            assert_eq!(row.starts_with('•'), !story.has_viewed);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn last_story_plays_out_and_closes() {
        let (ctx, _rx) = AppContext::new(Arc::new(Catalog::seed().unwrap()));
        let last = ctx.catalog().stories().last().unwrap().clone();
        let mut screen = StoriesScreen::new(ctx);

        screen.open_story(last.id).unwrap();
        tokio::time::sleep(Duration::from_millis(last.duration as u64 + 50)).await;

        assert!(!screen.stories().is_open());
        assert!(screen.stories_mut().dismiss_if_closed());
        assert!(screen.render(Utc::now())[0].starts_with("Stories"));
    }
}
