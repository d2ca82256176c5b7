//! Story playback: an auto-advancing slideshow over an ordered sequence of
//! stories.
//!
//! [`playback::Playback`] is the synchronous state machine. [`viewer::StoryViewer`]
//! mounts it behind a single periodic tick task whose lifetime is the viewer's.

pub mod playback;
pub mod viewer;

pub use playback::{Playback, PlaybackError, PlaybackSnapshot, TICK_INTERVAL_MS, Transition};
pub use viewer::StoryViewer;
