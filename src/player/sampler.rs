use std::sync::Arc;
use std::time::Duration;

use log::debug;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::backends::BackendPlayer;
use crate::data::PlayerIntent;

use super::controller::ControlMessage;

/// Poll cadence of the timeline sampler
const SAMPLE_INTERVAL: Duration = Duration::from_secs(1);

/// Seconds before the end of a track at which the next one is requested
const END_OF_TRACK_MARGIN: f64 = 2.0;

/// Polls the active backend for position and duration once per second and
/// requests the next track when the current one is almost done.
///
/// The sampler runs only while the player is playing with a loaded track:
/// the controller starts it on every entry to Playing and stops it on
/// Playing->Paused and on track teardown. Each start spawns a fresh
/// interval, so a resume never inherits the phase of an earlier timer.
pub struct TimelineSampler {
    intents: mpsc::Sender<ControlMessage>,
    task: Option<JoinHandle<()>>,
}

impl TimelineSampler {
    pub fn new(intents: mpsc::Sender<ControlMessage>) -> Self {
        Self {
            intents,
            task: None,
        }
    }

    /// Start polling the given backend, replacing any running sampler task
    pub fn start(&mut self, backend: Arc<dyn BackendPlayer>) {
        self.stop();

        let intents = self.intents.clone();
        self.task = Some(tokio::spawn(async move {
            loop {
                tokio::time::sleep(SAMPLE_INTERVAL).await;

                let position = backend.current_time();
                let duration = backend.duration();

                // Non-positive values mean "not known yet", not "finished"
                let almost_done =
                    position > 0.0 && duration > 0.0 && position > duration - END_OF_TRACK_MARGIN;
                if almost_done {
                    debug!(
                        "track almost done ({:.1}s of {:.1}s), requesting next",
                        position, duration
                    );
                    let _ = intents.send(ControlMessage::Intent(PlayerIntent::Next)).await;
                    // One advance per track; the controller starts a new
                    // sampler once the next track is loaded
                    break;
                }
            }
        }));
    }

    /// Stop polling; a no-op when no sampler task is running
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    /// Whether a sampler task is currently running
    pub fn is_running(&self) -> bool {
        self.task.as_ref().map(|task| !task.is_finished()).unwrap_or(false)
    }
}

impl Drop for TimelineSampler {
    fn drop(&mut self) {
        self.stop();
    }
}
