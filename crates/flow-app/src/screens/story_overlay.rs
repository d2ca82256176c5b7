use chrono::{DateTime, Utc};
use tracing::warn;
use uuid::Uuid;

use flow_stories::{Playback, PlaybackError, StoryViewer};

use crate::context::{AppContext, ShellEvent};
use crate::views::story_bar::progress_bars;
use crate::views::time::{RelativeStyle, relative};
use crate::views::{avatar, button};

struct ActiveStory {
    story_id: Uuid,
    index: usize,
    viewer: StoryViewer,
}

/// Full-screen story viewer shared by the feed and stories screens. Holds
/// which story was opened and the mounted viewer; dropping the overlay or
/// replacing the story unmounts the viewer.
#[derive(Default)]
pub struct StoryOverlay {
    active: Option<ActiveStory>,
}

impl StoryOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the viewer over the whole catalog sequence, starting at `story_id`.
    pub fn open(&mut self, ctx: &AppContext, story_id: Uuid) -> Result<(), PlaybackError> {
        match ctx.catalog().story_index(story_id) {
            Some(index) => self.open_at(ctx, index),
            None => {
                warn!("Ignoring unknown story {}", story_id);
                Ok(())
            }
        }
    }

    pub fn open_at(&mut self, ctx: &AppContext, index: usize) -> Result<(), PlaybackError> {
        let stories = ctx.catalog().stories();
        let playback = Playback::for_stories(stories, index)?;
        let story_id = stories[index].id;

        let events = ctx.clone();
        let viewer = StoryViewer::mount(playback, move || events.emit(ShellEvent::StoryClosed));

        self.active = Some(ActiveStory {
            story_id,
            index,
            viewer,
        });
        Ok(())
    }

    /// The story the viewer was opened on and its position.
    pub fn opened(&self) -> Option<(Uuid, usize)> {
        self.active.as_ref().map(|a| (a.story_id, a.index))
    }

    pub fn is_open(&self) -> bool {
        self.active.as_ref().is_some_and(|a| !a.viewer.is_closed())
    }

    /// Unmount a viewer whose playback has ended. Returns true if one was removed.
    pub fn dismiss_if_closed(&mut self) -> bool {
        if self.active.as_ref().is_some_and(|a| a.viewer.is_closed()) {
            self.active = None;
            return true;
        }
        false
    }

    pub fn viewer(&self) -> Option<&StoryViewer> {
        self.active.as_ref().map(|a| &a.viewer)
    }

    pub fn next(&self) {
        if let Some(viewer) = self.viewer() {
            viewer.next();
        }
    }

    pub fn previous(&self) {
        if let Some(viewer) = self.viewer() {
            viewer.previous();
        }
    }

    pub fn tap(&self, x: f64) {
        if let Some(viewer) = self.viewer() {
            viewer.tap(x);
        }
    }

    pub fn close(&self) {
        if let Some(viewer) = self.viewer() {
            viewer.close();
        }
    }

    pub fn render(&self, ctx: &AppContext, now: DateTime<Utc>) -> Vec<String> {
        let Some(viewer) = self.viewer() else {
            return Vec::new();
        };
        let snapshot = viewer.snapshot();
        let Some(story) = ctx.catalog().stories().get(snapshot.index) else {
            return Vec::new();
        };

        let author = ctx
            .catalog()
            .user(story.user_id)
            .map(|u| avatar(u, false))
            .unwrap_or_default();

        vec![
            progress_bars(&snapshot),
            format!(
                "{} {}  {}",
                author,
                relative(story.timestamp, now, RelativeStyle::Compact),
                button("x", false)
            ),
            format!("[story] {}", story.media),
            format!(
                "{}  {}",
                button("<", !snapshot.can_go_back()),
                button(">", snapshot.closed)
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use flow_catalog::Catalog;

    const FULL: &str = "━━━━━━━━━━";
    const EMPTY: &str = "──────────";

    #[tokio::test(start_paused = true)]
    async fn header_and_back_control_follow_position() {
        let (ctx, _rx) = AppContext::new(Arc::new(Catalog::seed().unwrap()));
        let first = ctx.catalog().stories()[0].clone();
        let author = ctx.catalog().user(first.user_id).unwrap().name.clone();

        let mut overlay = StoryOverlay::new();
        overlay.open(&ctx, first.id).unwrap();

        let lines = overlay.render(&ctx, Utc::now());
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with(&format!("{} {}", EMPTY, EMPTY)));
        assert!(lines[1].starts_with(&format!("({}) ", author)));
        assert!(lines[1].ends_with("[x]"));
        assert_eq!(lines[2], format!("[story] {}", first.media));
        assert_eq!(lines[3], "[<]·  [>]");

        overlay.next();
        tokio::time::sleep(Duration::from_millis(1)).await;

        let lines = overlay.render(&ctx, Utc::now());
        assert!(lines[0].starts_with(&format!("{} {}", FULL, EMPTY)));
        assert_eq!(lines[3], "[<]  [>]");
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_story_leaves_overlay_closed() {
        let (ctx, _rx) = AppContext::new(Arc::new(Catalog::seed().unwrap()));
        let mut overlay = StoryOverlay::new();

        overlay.open(&ctx, Uuid::nil()).unwrap();
        assert!(!overlay.is_open());
        assert!(overlay.render(&ctx, Utc::now()).is_empty());
    }
}
