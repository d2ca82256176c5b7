use thiserror::Error;
use tracing::debug;

use flow_types::models::Story;

/// Wall-clock cadence of the progress tick.
pub const TICK_INTERVAL_MS: u64 = 100;

/// Fraction of the screen width, from the left edge, that steps backwards on tap.
const RETREAT_TAP_ZONE: f64 = 1.0 / 3.0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    #[error("story sequence is empty")]
    Empty,

    #[error("start index {index} is out of range for {len} stories")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("story at position {index} has non-positive duration {duration}ms")]
    NonPositiveDuration { index: usize, duration: i64 },
}

/// Outcome of feeding one input to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Progress moved within the current story
    Progressed,
    /// Moved to the next story with progress reset
    Advanced { from: usize, to: usize },
    /// Moved to the previous story with progress reset
    Retreated { from: usize, to: usize },
    /// Playback ended; the close callback must fire exactly once
    Closed,
    /// Input had no effect (retreat at the first story, anything after close)
    Ignored,
}

impl Transition {
    /// True when the current story changed and the tick source must be re-armed.
    pub fn changes_story(self) -> bool {
        matches!(self, Self::Advanced { .. } | Self::Retreated { .. })
    }
}

/// Read-only view of playback state for renderers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackSnapshot {
    pub index: usize,
    pub len: usize,
    /// Percent of the current story shown, in `[0, 100]`.
    pub progress: f64,
    pub closed: bool,
}

impl PlaybackSnapshot {
    /// Fill percentage of the progress bar for the story at `position`.
    pub fn bar_fill(&self, position: usize) -> f64 {
        if position < self.index {
            100.0
        } else if position == self.index {
            self.progress
        } else {
            0.0
        }
    }

    pub fn bars(&self) -> Vec<f64> {
        (0..self.len).map(|i| self.bar_fill(i)).collect()
    }

    pub fn can_go_back(&self) -> bool {
        !self.closed && self.index > 0
    }
}

/// Playback state machine over `(current index, progress)`.
///
/// Progress is derived from elapsed tick time rather than accumulated, so
/// `progress == elapsed * 100 / duration` holds exactly and a story always
/// ends on the tick where elapsed time reaches its duration.
#[derive(Debug, Clone)]
pub struct Playback {
    durations: Vec<u64>,
    index: usize,
    elapsed_ms: u64,
    closed: bool,
}

impl Playback {
    /// Start playback at `initial_index` over stories with the given durations
    /// in milliseconds.
    pub fn new<I>(durations: I, initial_index: usize) -> Result<Self, PlaybackError>
    where
        I: IntoIterator<Item = i64>,
    {
        let durations = durations
            .into_iter()
            .enumerate()
            .map(|(index, duration)| {
                u64::try_from(duration)
                    .ok()
                    .filter(|d| *d > 0)
                    .ok_or(PlaybackError::NonPositiveDuration { index, duration })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if durations.is_empty() {
            return Err(PlaybackError::Empty);
        }
        if initial_index >= durations.len() {
            return Err(PlaybackError::IndexOutOfRange {
                index: initial_index,
                len: durations.len(),
            });
        }

        Ok(Self {
            durations,
            index: initial_index,
            elapsed_ms: 0,
            closed: false,
        })
    }

    pub fn for_stories(stories: &[Story], initial_index: usize) -> Result<Self, PlaybackError> {
        Self::new(stories.iter().map(|s| s.duration), initial_index)
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.durations.len()
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn current_duration_ms(&self) -> u64 {
        self.durations[self.index]
    }

    pub fn progress(&self) -> f64 {
        let pct = self.elapsed_ms as f64 * 100.0 / self.current_duration_ms() as f64;
        pct.min(100.0)
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            index: self.index,
            len: self.len(),
            progress: self.progress(),
            closed: self.closed,
        }
    }

    pub fn bar_fill(&self, position: usize) -> f64 {
        self.snapshot().bar_fill(position)
    }

    /// One tick of the periodic timer.
    pub fn tick(&mut self) -> Transition {
        if self.closed {
            return Transition::Ignored;
        }

        self.elapsed_ms += TICK_INTERVAL_MS;
        if self.elapsed_ms >= self.current_duration_ms() {
            return self.advance();
        }
        Transition::Progressed
    }

    /// Move to the next story, or close after the last one.
    pub fn advance(&mut self) -> Transition {
        if self.closed {
            return Transition::Ignored;
        }

        if self.index + 1 < self.len() {
            let from = self.index;
            self.index += 1;
            self.elapsed_ms = 0;
            debug!("Story playback advanced {} -> {}", from, self.index);
            Transition::Advanced {
                from,
                to: self.index,
            }
        } else {
            self.closed = true;
            debug!("Story playback finished at {}", self.index);
            Transition::Closed
        }
    }

    /// Move to the previous story. A no-op at the first story.
    pub fn retreat(&mut self) -> Transition {
        if self.closed || self.index == 0 {
            return Transition::Ignored;
        }

        let from = self.index;
        self.index -= 1;
        self.elapsed_ms = 0;
        debug!("Story playback retreated {} -> {}", from, self.index);
        Transition::Retreated {
            from,
            to: self.index,
        }
    }

    /// Tap at horizontal position `x`, a fraction of the screen width.
    /// The left third steps back, everything else steps forward. A
    /// non-finite position is not a tap.
    pub fn tap(&mut self, x: f64) -> Transition {
        if !x.is_finite() {
            return Transition::Ignored;
        }
        if x < RETREAT_TAP_ZONE {
            self.retreat()
        } else {
            self.advance()
        }
    }

    /// Explicit close control.
    pub fn close(&mut self) -> Transition {
        if self.closed {
            return Transition::Ignored;
        }
        self.closed = true;
        Transition::Closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticks_until_change(playback: &mut Playback) -> (usize, Transition) {
        let mut count = 0;
        loop {
            count += 1;
            let t = playback.tick();
            if t != Transition::Progressed {
                return (count, t);
            }
        }
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(Playback::new(Vec::<i64>::new(), 0).unwrap_err(), PlaybackError::Empty);
        assert_eq!(
            Playback::new([1000, 2000], 2).unwrap_err(),
            PlaybackError::IndexOutOfRange { index: 2, len: 2 }
        );
        assert_eq!(
            Playback::new([1000, 0], 0).unwrap_err(),
            PlaybackError::NonPositiveDuration { index: 1, duration: 0 }
        );
        assert_eq!(
            Playback::new([-5], 0).unwrap_err(),
            PlaybackError::NonPositiveDuration { index: 0, duration: -5 }
        );
    }

    #[test]
    fn starts_at_initial_index_with_zero_progress() {
        let playback = Playback::new([1000, 2000, 3000], 1).unwrap();
        assert_eq!(playback.index(), 1);
        assert_eq!(playback.progress(), 0.0);
        assert!(!playback.is_closed());
    }

    #[test]
    fn two_story_scenario_from_start() {
        let mut playback = Playback::new([1000, 2000], 0).unwrap();

        let (ticks, t) = ticks_until_change(&mut playback);
        assert_eq!(ticks, 10);
        assert_eq!(t, Transition::Advanced { from: 0, to: 1 });
        assert_eq!((playback.index(), playback.progress()), (1, 0.0));

        let (ticks, t) = ticks_until_change(&mut playback);
        assert_eq!(ticks, 20);
        assert_eq!(t, Transition::Closed);
        assert!(playback.is_closed());
    }

    #[test]
    fn two_story_scenario_retreat_from_end() {
        let mut playback = Playback::new([1000, 2000], 1).unwrap();
        playback.tick();

        assert_eq!(playback.retreat(), Transition::Retreated { from: 1, to: 0 });
        assert_eq!((playback.index(), playback.progress()), (0, 0.0));

        assert_eq!(playback.retreat(), Transition::Ignored);
        assert_eq!((playback.index(), playback.progress()), (0, 0.0));
    }

    #[test]
    fn every_start_index_reaches_next_or_close() {
        let durations = [1000, 2500, 150, 4000];
        for start in 0..durations.len() {
            let mut playback = Playback::new(durations, start).unwrap();
            let (_, t) = ticks_until_change(&mut playback);
            if start == durations.len() - 1 {
                assert_eq!(t, Transition::Closed);
            } else {
                assert_eq!(t, Transition::Advanced { from: start, to: start + 1 });
                assert_eq!(playback.progress(), 0.0);
            }
        }
    }

    #[test]
    fn progress_is_monotonic_within_a_story() {
        let mut playback = Playback::new([3000, 1000], 0).unwrap();
        let mut last = playback.progress();
        while playback.tick() == Transition::Progressed {
            let now = playback.progress();
            assert!(now >= last, "progress went backwards: {} -> {}", last, now);
            assert!(now <= 100.0);
            last = now;
        }
        assert_eq!(playback.index(), 1);
        assert_eq!(playback.progress(), 0.0);
    }

    #[test]
    fn uneven_duration_finishes_on_the_crossing_tick() {
        // 150ms: first tick is 66.6%, second crosses 100%.
        let mut playback = Playback::new([150, 1000], 0).unwrap();
        assert_eq!(playback.tick(), Transition::Progressed);
        assert!((playback.progress() - 66.666).abs() < 0.01);
        assert_eq!(playback.tick(), Transition::Advanced { from: 0, to: 1 });
    }

    #[test]
    fn close_happens_once_and_freezes_state() {
        let mut playback = Playback::new([1000, 1000], 1).unwrap();
        for _ in 0..3 {
            playback.tick();
        }
        assert_eq!(playback.advance(), Transition::Closed);

        let frozen = playback.snapshot();
        assert!(frozen.closed);
        for t in [
            playback.tick(),
            playback.advance(),
            playback.retreat(),
            playback.tap(0.9),
            playback.close(),
        ] {
            assert_eq!(t, Transition::Ignored);
        }
        assert_eq!(playback.snapshot(), frozen);
    }

    #[test]
    fn manual_close_is_terminal() {
        let mut playback = Playback::new([1000, 1000, 1000], 0).unwrap();
        assert_eq!(playback.close(), Transition::Closed);
        assert_eq!(playback.tick(), Transition::Ignored);
        assert_eq!(playback.index(), 0);
    }

    #[test]
    fn tap_zones_split_at_one_third() {
        let mut playback = Playback::new([1000, 1000, 1000], 1).unwrap();
        assert_eq!(playback.tap(0.1), Transition::Retreated { from: 1, to: 0 });
        assert_eq!(playback.tap(0.2), Transition::Ignored);
        assert_eq!(playback.tap(0.34), Transition::Advanced { from: 0, to: 1 });
        assert_eq!(playback.tap(0.99), Transition::Advanced { from: 1, to: 2 });
    }

    #[test]
    fn non_finite_tap_is_ignored() {
        let mut playback = Playback::new([1000, 1000], 0).unwrap();
        assert_eq!(playback.tap(f64::NAN), Transition::Ignored);
        assert_eq!(playback.tap(f64::INFINITY), Transition::Ignored);
        assert_eq!(playback.tap(f64::NEG_INFINITY), Transition::Ignored);
        assert_eq!(playback.index(), 0);
        assert!(!playback.is_closed());
    }

    #[test]
    fn progress_bars_track_position() {
        let mut playback = Playback::new([1000, 1000, 1000], 1).unwrap();
        for _ in 0..4 {
            playback.tick();
            let bars = playback.snapshot().bars();
            assert_eq!(bars[0], 100.0);
            assert_eq!(bars[1], playback.progress());
            assert_eq!(bars[2], 0.0);
        }
        assert_eq!(playback.bar_fill(1), 40.0);
    }

    #[test]
    fn built_from_story_records() {
        use flow_types::models::MediaKind;

        let story = |n: u128, duration: i64| Story {
            id: uuid::Uuid::from_u128(n),
            user_id: uuid::Uuid::from_u128(1),
            media: format!("story-{}.jpg", n),
            kind: MediaKind::Image,
            timestamp: chrono::Utc::now(),
            views: 0,
            has_viewed: false,
            duration,
        };

        let playback = Playback::for_stories(&[story(1, 5000), story(2, 7000)], 1).unwrap();
        assert_eq!(playback.current_duration_ms(), 7000);

        let err = Playback::for_stories(&[story(1, 5000), story(2, 0)], 0).unwrap_err();
        assert_eq!(err, PlaybackError::NonPositiveDuration { index: 1, duration: 0 });
    }
}
