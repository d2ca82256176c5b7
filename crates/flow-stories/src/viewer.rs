use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{debug, info, trace};

use crate::playback::{Playback, PlaybackSnapshot, TICK_INTERVAL_MS, Transition};

const TICK_INTERVAL: Duration = Duration::from_millis(TICK_INTERVAL_MS);

/// Manual inputs from the viewer's controls.
#[derive(Debug, Clone, Copy)]
enum Control {
    Next,
    Previous,
    Tap(f64),
    Close,
}

/// A mounted story viewer.
///
/// Owns exactly one tick task. The task is re-armed whenever the current
/// story changes and is aborted when the viewer is dropped, so no tick can
/// land after unmount. The close callback runs at most once, from the task.
pub struct StoryViewer {
    controls: mpsc::UnboundedSender<Control>,
    state: watch::Receiver<PlaybackSnapshot>,
    task: JoinHandle<()>,
}

impl StoryViewer {
    /// Mount a viewer. Must be called from within a tokio runtime.
    pub fn mount<F>(playback: Playback, on_close: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let (controls, control_rx) = mpsc::unbounded_channel();
        let (state_tx, state) = watch::channel(playback.snapshot());

        info!(
            "Story viewer mounted at {} of {}",
            playback.index(),
            playback.len()
        );
        let task = tokio::spawn(run_playback(playback, control_rx, state_tx, on_close));

        Self {
            controls,
            state,
            task,
        }
    }

    pub fn next(&self) {
        self.send(Control::Next);
    }

    pub fn previous(&self) {
        self.send(Control::Previous);
    }

    /// Tap at horizontal position `x` as a fraction of the screen width.
    pub fn tap(&self, x: f64) {
        self.send(Control::Tap(x));
    }

    pub fn close(&self) {
        self.send(Control::Close);
    }

    fn send(&self, control: Control) {
        // The task is gone only after close, when controls are ignored anyway.
        let _ = self.controls.send(control);
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        *self.state.borrow()
    }

    pub fn is_closed(&self) -> bool {
        self.state.borrow().closed
    }

    /// A receiver that observes every published state change.
    pub fn subscribe(&self) -> watch::Receiver<PlaybackSnapshot> {
        self.state.clone()
    }

    /// Wait until playback closes. Returns the final snapshot.
    pub async fn closed(&self) -> PlaybackSnapshot {
        let mut state = self.state.clone();
        // An aborted task drops the sender; report the last published state.
        let _ = state.wait_for(|s| s.closed).await;
        *state.borrow()
    }
}

impl Drop for StoryViewer {
    fn drop(&mut self) {
        self.task.abort();
        debug!("Story viewer unmounted");
    }
}

async fn run_playback<F>(
    mut playback: Playback,
    mut controls: mpsc::UnboundedReceiver<Control>,
    state: watch::Sender<PlaybackSnapshot>,
    on_close: F,
) where
    F: FnOnce() + Send + 'static,
{
    // First tick lands one interval after mount, not immediately.
    let mut ticker = interval_at(Instant::now() + TICK_INTERVAL, TICK_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        let transition = tokio::select! {
            _ = ticker.tick() => {
                let t = playback.tick();
                trace!("Story tick at {} -> {:.1}%", playback.index(), playback.progress());
                t
            }
            control = controls.recv() => match control {
                Some(Control::Next) => playback.advance(),
                Some(Control::Previous) => playback.retreat(),
                Some(Control::Tap(x)) => playback.tap(x),
                Some(Control::Close) => playback.close(),
                None => break,
            },
        };

        if transition.changes_story() {
            ticker.reset();
        }

        state.send_replace(playback.snapshot());

        if transition == Transition::Closed {
            info!("Story viewer closed at {}", playback.index());
            on_close();
            break;
        }
    }
}
