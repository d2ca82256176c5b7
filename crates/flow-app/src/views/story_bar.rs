use flow_stories::PlaybackSnapshot;
use flow_types::models::{Story, User};

const SEGMENT_WIDTH: usize = 10;

/// The row of progress segments across the top of the viewer.
pub fn progress_bars(snapshot: &PlaybackSnapshot) -> String {
    snapshot
        .bars()
        .into_iter()
        .map(segment)
        .collect::<Vec<_>>()
        .join(" ")
}

fn segment(fill: f64) -> String {
    let filled = ((fill / 100.0) * SEGMENT_WIDTH as f64).floor() as usize;
    let filled = filled.min(SEGMENT_WIDTH);
    format!("{}{}", "━".repeat(filled), "─".repeat(SEGMENT_WIDTH - filled))
}

/// Entry in the horizontal stories bar on the feed.
pub fn story_ring(story: &Story, author: &User) -> String {
    if story.has_viewed {
        format!("({})", author.first_name())
    } else {
        format!("(*{}*)", author.first_name())
    }
}
