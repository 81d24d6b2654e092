use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Weak};

use log::{debug, info, warn};
use tokio::sync::{mpsc, watch};

use crate::backends::{BackendPlayer, BackendRegistry};
use crate::data::{
    LoadStatus, PlayerEvent, PlayerIntent, PlayerState, PlayerView, PlaylistEntry, SourceType,
};
use crate::error::{ControlError, Result};
use crate::playlist::PlaylistStore;

use super::sampler::TimelineSampler;

/// Depth of the control-message queue; senders back off once it is full
const QUEUE_DEPTH: usize = 64;

/// Trait for objects that listen to player state transitions
pub trait PlayerEventListener: Send + Sync {
    /// Called for every transition the controller commits
    fn on_event(&self, event: PlayerEvent);
}

/// Message consumed by the controller's worker task.
///
/// UI intents and backend registration travel on the same queue, so the
/// registry is only ever touched from the worker task.
pub enum ControlMessage {
    Intent(PlayerIntent),
    RegisterBackend {
        source_type: SourceType,
        backend: Arc<dyn BackendPlayer>,
    },
    Shutdown,
}

impl fmt::Debug for ControlMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlMessage::Intent(intent) => write!(f, "Intent({})", intent),
            ControlMessage::RegisterBackend { source_type, .. } => {
                write!(f, "RegisterBackend({})", source_type)
            }
            ControlMessage::Shutdown => write!(f, "Shutdown"),
        }
    }
}

/// Cloneable handle used by the UI layer to talk to the controller
#[derive(Clone)]
pub struct PlayerHandle {
    tx: mpsc::Sender<ControlMessage>,
    view: watch::Receiver<PlayerView>,
}

impl PlayerHandle {
    /// Queue an intent. Returns false if the controller is gone.
    pub async fn dispatch(&self, intent: PlayerIntent) -> bool {
        self.tx.send(ControlMessage::Intent(intent)).await.is_ok()
    }

    /// Queue an intent from synchronous code (e.g. an input thread)
    pub fn blocking_dispatch(&self, intent: PlayerIntent) -> bool {
        self.tx.blocking_send(ControlMessage::Intent(intent)).is_ok()
    }

    pub async fn play(&self) -> bool {
        self.dispatch(PlayerIntent::Play).await
    }

    pub async fn pause(&self) -> bool {
        self.dispatch(PlayerIntent::Pause).await
    }

    pub async fn next_track(&self) -> bool {
        self.dispatch(PlayerIntent::Next).await
    }

    pub async fn prev_track(&self) -> bool {
        self.dispatch(PlayerIntent::Previous).await
    }

    pub async fn set_track(&self, entry: PlaylistEntry) -> bool {
        self.dispatch(PlayerIntent::SetTrack(entry)).await
    }

    pub async fn set_track_time(&self, position: f64) -> bool {
        self.dispatch(PlayerIntent::SetTrackTime(position)).await
    }

    pub async fn toggle_mute(&self) -> bool {
        self.dispatch(PlayerIntent::ToggleMute).await
    }

    pub async fn toggle_shuffle(&self) -> bool {
        self.dispatch(PlayerIntent::ToggleShuffle).await
    }

    /// Register a backend for a source type; valid in any player state
    pub async fn register_backend(
        &self,
        source_type: SourceType,
        backend: Arc<dyn BackendPlayer>,
    ) -> bool {
        self.tx
            .send(ControlMessage::RegisterBackend {
                source_type,
                backend,
            })
            .await
            .is_ok()
    }

    /// Ask the controller to stop after draining already-queued messages
    pub async fn shutdown(&self) -> bool {
        self.tx.send(ControlMessage::Shutdown).await.is_ok()
    }

    /// Snapshot of the current player state
    pub fn view(&self) -> PlayerView {
        self.view.borrow().clone()
    }

    /// Wait until the published view changes; for UI re-render loops
    pub async fn view_changed(&mut self) -> bool {
        self.view.changed().await.is_ok()
    }
}

/// The player controller.
///
/// Owns the player state machine, the backend registry and a handle to the
/// playlist store, and reacts to intents by orchestrating backends and the
/// store before committing state transitions. All messages are handled
/// strictly one at a time on a single worker task, so handlers never
/// interleave; the only suspension point is a backend load.
pub struct PlayerController {
    state: PlayerState,
    registry: BackendRegistry,
    store: Arc<dyn PlaylistStore>,
    listeners: Vec<Weak<dyn PlayerEventListener>>,
    sampler: TimelineSampler,
    rx: mpsc::Receiver<ControlMessage>,
    /// Messages stashed aside while coalescing a seek burst
    pending: VecDeque<ControlMessage>,
    view_tx: watch::Sender<PlayerView>,
}

impl PlayerController {
    /// Create a controller over the given playlist store.
    ///
    /// Returns the controller together with a cloneable handle for
    /// dispatching intents and reading state snapshots.
    pub fn new(store: Arc<dyn PlaylistStore>) -> (PlayerController, PlayerHandle) {
        let (tx, rx) = mpsc::channel(QUEUE_DEPTH);
        let (view_tx, view_rx) = watch::channel(PlayerView::idle(store.shuffle_enabled()));

        let controller = PlayerController {
            state: PlayerState::new(),
            registry: BackendRegistry::new(),
            store,
            listeners: Vec::new(),
            sampler: TimelineSampler::new(tx.clone()),
            rx,
            pending: VecDeque::new(),
            view_tx,
        };
        let handle = PlayerHandle { tx, view: view_rx };
        (controller, handle)
    }

    /// Register a listener to be notified of committed transitions.
    ///
    /// Listeners are held as weak references and pruned once dropped.
    pub fn register_listener(&mut self, listener: Weak<dyn PlayerEventListener>) {
        self.listeners.push(listener);
    }

    /// Snapshot of the current player state
    pub fn view(&self) -> PlayerView {
        self.current_view()
    }

    /// Consume messages until shutdown is requested or every handle is gone
    pub async fn run(mut self) {
        debug!("player controller running");
        while let Some(message) = self.next_message().await {
            if matches!(message, ControlMessage::Shutdown) {
                debug!("shutdown requested");
                break;
            }
            self.process(message).await;
        }
        self.sampler.stop();
        debug!("player controller stopped");
    }

    /// Handle a single control message.
    ///
    /// Public so the controller can be embedded without spawning `run`;
    /// every failure is caught and logged here, none propagate.
    pub async fn process(&mut self, message: ControlMessage) {
        match message {
            ControlMessage::RegisterBackend {
                source_type,
                backend,
            } => self.handle_register_backend(source_type, backend),
            ControlMessage::Shutdown => {}
            ControlMessage::Intent(intent) => {
                debug!("handling intent {}", intent);
                let label = intent.to_string();
                let result = match intent {
                    PlayerIntent::Play => self.handle_play(),
                    PlayerIntent::Pause => self.handle_pause(),
                    PlayerIntent::Next => self.handle_next().await,
                    PlayerIntent::Previous => self.handle_prev().await,
                    PlayerIntent::SetTrack(entry) => self.handle_select_track(entry).await,
                    PlayerIntent::SetTrackTime(position) => self.handle_seek(position),
                    PlayerIntent::ToggleMute => self.handle_toggle_mute(),
                    PlayerIntent::ToggleShuffle => self.handle_toggle_shuffle(),
                };
                if let Err(err) = result {
                    warn!("intent {} abandoned: {}", label, err);
                }
            }
        }
    }

    /// Next message to handle, with seek bursts collapsed to the newest
    /// request. Other message types queued behind a burst keep their
    /// arrival order.
    async fn next_message(&mut self) -> Option<ControlMessage> {
        let message = match self.pending.pop_front() {
            Some(message) => message,
            None => self.rx.recv().await?,
        };

        if !matches!(
            message,
            ControlMessage::Intent(PlayerIntent::SetTrackTime(_))
        ) {
            return Some(message);
        }

        let mut latest = message;
        while let Ok(next) = self.rx.try_recv() {
            if matches!(next, ControlMessage::Intent(PlayerIntent::SetTrackTime(_))) {
                debug!("dropping superseded seek request");
                latest = next;
            } else {
                self.pending.push_back(next);
            }
        }
        Some(latest)
    }

    fn handle_register_backend(&mut self, source_type: SourceType, backend: Arc<dyn BackendPlayer>) {
        if self.registry.register(source_type, backend) {
            info!("backend registered for source type {}", source_type);
            // Adapter presence is part of the published view
            self.publish_view();
        }
    }

    fn handle_play(&mut self) -> Result<()> {
        let Some(current) = self.state.current().cloned() else {
            debug!("play ignored, no current track");
            return Ok(());
        };

        let resumed = self.state.play();
        if resumed {
            self.notify(PlayerEvent::StateChanged {
                state: self.state.playback_state(),
            });
            self.publish_view();
        }

        let backend = self.resolve_backend(current.track.source_type)?;
        backend.play();
        // Restart the timer only on an actual Paused->Playing transition,
        // so a redundant play cannot shift the sampling phase
        if resumed && self.state.load_status() == Some(LoadStatus::Ready) {
            self.sampler.start(backend);
        }
        Ok(())
    }

    fn handle_pause(&mut self) -> Result<()> {
        let Some(current) = self.state.current().cloned() else {
            debug!("pause ignored, no current track");
            return Ok(());
        };

        if self.state.pause() {
            self.sampler.stop();
            self.notify(PlayerEvent::StateChanged {
                state: self.state.playback_state(),
            });
            self.publish_view();
        }

        let backend = self.resolve_backend(current.track.source_type)?;
        backend.pause();
        Ok(())
    }

    /// Direct track selection from the UI.
    ///
    /// With shuffle enabled the selection is a forward step in the shuffle
    /// trail, so a later `previous` can land back on it.
    async fn handle_select_track(&mut self, entry: PlaylistEntry) -> Result<()> {
        if self.store.shuffle_enabled() {
            self.store.push_shuffled(&entry.track.id);
        }
        self.handle_set_track(entry).await
    }

    /// Full track-change sequence: reset the previous backend, commit the
    /// new entry (optimistically Playing), then load and start it.
    async fn handle_set_track(&mut self, entry: PlaylistEntry) -> Result<()> {
        // Release whatever the previous track's backend still holds
        if let Some(previous) = self.state.current() {
            if let Some(backend) = self.registry.resolve(previous.track.source_type) {
                backend.reset();
            }
        }
        self.sampler.stop();

        let track = entry.track.clone();
        self.state.set_current_track(entry);
        self.notify(PlayerEvent::TrackChanged {
            entry: self.state.current().cloned(),
        });
        self.notify(PlayerEvent::StateChanged {
            state: self.state.playback_state(),
        });
        self.publish_view();

        let backend = match self.resolve_backend(track.source_type) {
            Ok(backend) => backend,
            Err(err) => {
                // The optimistic commit stands; the status records that the
                // track will never start
                self.commit_load_status(&track.id, LoadStatus::Failed);
                return Err(err);
            }
        };

        match backend.load(&track).await {
            Ok(()) => {
                self.commit_load_status(&track.id, LoadStatus::Ready);
                backend.play();
                self.sampler.start(backend);
                Ok(())
            }
            Err(err) => {
                self.commit_load_status(&track.id, LoadStatus::Failed);
                Err(ControlError::LoadFailed {
                    track_id: track.id,
                    source: err,
                })
            }
        }
    }

    async fn handle_next(&mut self) -> Result<()> {
        let Some(current) = self.state.current().cloned() else {
            debug!("next ignored, no current track");
            return Ok(());
        };

        let Some(next) = self.store.next_track(&current) else {
            // End of the list; a valid terminal condition, not an error
            debug!("no next track, staying on {}", current.track.id);
            return Ok(());
        };

        if self.store.shuffle_enabled() {
            self.store.push_shuffled(&next.id);
        }

        self.handle_set_track(current.with_track(next)).await
    }

    async fn handle_prev(&mut self) -> Result<()> {
        let Some(current) = self.state.current().cloned() else {
            debug!("previous ignored, no current track");
            return Ok(());
        };

        let Some(previous) = self.store.prev_track(&current) else {
            debug!("no previous track, staying on {}", current.track.id);
            return Ok(());
        };

        // Going back removes the latest step so forward and backward
        // shuffle navigation stay symmetric
        if self.store.shuffle_enabled() {
            self.store.pop_shuffled();
        }

        self.handle_set_track(current.with_track(previous)).await
    }

    fn handle_seek(&mut self, position: f64) -> Result<()> {
        let Some(current) = self.state.current().cloned() else {
            debug!("seek ignored, no current track");
            return Ok(());
        };

        let backend = self.resolve_backend(current.track.source_type)?;
        backend.seek(position);
        Ok(())
    }

    fn handle_toggle_mute(&mut self) -> Result<()> {
        // Commit the flip first; the backend call uses the post-flip value.
        // The flag flips even without a current track.
        let muted = self.state.toggle_mute();
        self.notify(PlayerEvent::MuteChanged { muted });
        self.publish_view();

        let Some(current) = self.state.current().cloned() else {
            return Ok(());
        };

        let backend = self.resolve_backend(current.track.source_type)?;
        if muted {
            backend.mute();
        } else {
            backend.unmute();
        }
        Ok(())
    }

    fn handle_toggle_shuffle(&mut self) -> Result<()> {
        let enabled = !self.store.shuffle_enabled();
        self.store.set_shuffle(enabled);
        self.notify(PlayerEvent::ShuffleChanged { enabled });
        self.publish_view();
        Ok(())
    }

    fn resolve_backend(&self, source_type: SourceType) -> Result<Arc<dyn BackendPlayer>> {
        self.registry
            .resolve(source_type)
            .ok_or(ControlError::BackendMissing { source_type })
    }

    fn commit_load_status(&mut self, track_id: &str, status: LoadStatus) {
        self.state.set_load_status(status);
        self.notify(PlayerEvent::LoadStatusChanged {
            track_id: track_id.to_string(),
            status,
        });
        self.publish_view();
    }

    fn notify(&mut self, event: PlayerEvent) {
        self.listeners.retain(|listener| listener.upgrade().is_some());
        for listener in &self.listeners {
            if let Some(listener) = listener.upgrade() {
                listener.on_event(event.clone());
            }
        }
    }

    fn publish_view(&self) {
        let _ = self.view_tx.send_replace(self.current_view());
    }

    fn current_view(&self) -> PlayerView {
        let backend_available = self
            .state
            .current()
            .map(|current| self.registry.contains(current.track.source_type))
            .unwrap_or(false);

        PlayerView {
            state: self.state.playback_state(),
            is_playing: self.state.is_playing(),
            is_muted: self.state.is_muted(),
            current_track: self.state.current().map(|current| current.track.clone()),
            backend_available,
            shuffle_enabled: self.store.shuffle_enabled(),
            load_status: self.state.load_status(),
        }
    }
}
