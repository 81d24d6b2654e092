use serde::{Serialize, Deserialize};

use super::playback_state::PlaybackState;
use super::playlist_entry::PlaylistEntry;

/// Load progress of the current track.
///
/// The controller commits `Playing` optimistically before the backend has
/// finished loading; this tri-state lets consumers tell a requested track
/// apart from one that is actually producing audio.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LoadStatus {
    /// Backend load is in flight
    Loading,
    /// Backend finished loading and playback was started
    Ready,
    /// Backend load failed; the track will not produce audio
    Failed,
}

impl std::fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadStatus::Loading => write!(f, "loading"),
            LoadStatus::Ready => write!(f, "ready"),
            LoadStatus::Failed => write!(f, "failed"),
        }
    }
}

/// The player state machine.
///
/// Holds the current entry, the play/pause flag and the mute flag.
/// Invariant: `is_playing` can only be true while a current entry is set.
/// The struct is owned by the controller and mutated from a single task;
/// consumers read it through [`super::PlayerView`] snapshots.
#[derive(Debug, Clone, Default)]
pub struct PlayerState {
    current: Option<PlaylistEntry>,
    is_playing: bool,
    is_muted: bool,
    load_status: Option<LoadStatus>,
}

impl PlayerState {
    /// Create a new idle, unmuted player state
    pub fn new() -> Self {
        Self::default()
    }

    /// Request playback.
    ///
    /// Without a current entry the play flag is forced to false, so play
    /// alone can never leave the Idle state. Returns whether the flag
    /// changed.
    pub fn play(&mut self) -> bool {
        let was_playing = self.is_playing;
        self.is_playing = self.current.is_some();
        self.is_playing != was_playing
    }

    /// Pause playback. Returns whether the flag changed.
    pub fn pause(&mut self) -> bool {
        let was_playing = self.is_playing;
        self.is_playing = false;
        was_playing
    }

    /// Replace the current entry and mark the player playing.
    ///
    /// This is the only transition that sets a track; it applies from any
    /// state and models the "load implies play" semantics of selecting a
    /// track. The load status resets to `Loading` until the backend
    /// reports back.
    pub fn set_current_track(&mut self, entry: PlaylistEntry) {
        self.current = Some(entry);
        self.is_playing = true;
        self.load_status = Some(LoadStatus::Loading);
    }

    /// Flip the mute flag in place. Orthogonal to the playback state; works
    /// in any state, including Idle. Returns the post-flip value.
    pub fn toggle_mute(&mut self) -> bool {
        self.is_muted = !self.is_muted;
        self.is_muted
    }

    /// Record the outcome of the current track's backend load
    pub fn set_load_status(&mut self, status: LoadStatus) {
        if self.current.is_some() {
            self.load_status = Some(status);
        }
    }

    pub fn current(&self) -> Option<&PlaylistEntry> {
        self.current.as_ref()
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_muted(&self) -> bool {
        self.is_muted
    }

    pub fn load_status(&self) -> Option<LoadStatus> {
        self.load_status
    }

    /// The state-machine state implied by the flags
    pub fn playback_state(&self) -> PlaybackState {
        match (&self.current, self.is_playing) {
            (None, _) => PlaybackState::Idle,
            (Some(_), false) => PlaybackState::Paused,
            (Some(_), true) => PlaybackState::Playing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{SourceType, Track};

    fn entry(id: &str) -> PlaylistEntry {
        PlaylistEntry::new("p1", Track::new(id, format!("Track {}", id), SourceType::Youtube))
    }

    #[test]
    fn play_without_track_stays_idle() {
        let mut state = PlayerState::new();
        let changed = state.play();
        assert!(!changed);
        assert!(!state.is_playing());
        assert_eq!(state.playback_state(), PlaybackState::Idle);
    }

    #[test]
    fn set_current_track_always_plays() {
        // From idle
        let mut state = PlayerState::new();
        state.set_current_track(entry("a"));
        assert!(state.is_playing());
        assert_eq!(state.playback_state(), PlaybackState::Playing);
        assert_eq!(state.load_status(), Some(LoadStatus::Loading));

        // From paused
        state.pause();
        state.set_current_track(entry("b"));
        assert!(state.is_playing());

        // From playing
        state.set_current_track(entry("c"));
        assert!(state.is_playing());
        assert_eq!(state.current().unwrap().track.id, "c");
    }

    #[test]
    fn pause_and_resume() {
        let mut state = PlayerState::new();
        state.set_current_track(entry("a"));

        assert!(state.pause());
        assert_eq!(state.playback_state(), PlaybackState::Paused);
        // Pausing twice changes nothing
        assert!(!state.pause());

        assert!(state.play());
        assert_eq!(state.playback_state(), PlaybackState::Playing);
    }

    #[test]
    fn playing_requires_current_entry() {
        // The invariant holds after every transition sequence that ends
        // without a current entry
        let mut state = PlayerState::new();
        state.play();
        state.toggle_mute();
        state.pause();
        state.play();
        assert!(state.current().is_none());
        assert!(!state.is_playing());
    }

    #[test]
    fn mute_is_orthogonal() {
        let mut state = PlayerState::new();
        assert!(state.toggle_mute());
        assert!(!state.is_playing());
        assert_eq!(state.playback_state(), PlaybackState::Idle);

        state.set_current_track(entry("a"));
        assert!(!state.toggle_mute());
        assert!(state.is_playing());
    }

    #[test]
    fn load_status_tracks_outcome() {
        let mut state = PlayerState::new();
        // No current entry, nothing to record
        state.set_load_status(LoadStatus::Ready);
        assert_eq!(state.load_status(), None);

        state.set_current_track(entry("a"));
        state.set_load_status(LoadStatus::Ready);
        assert_eq!(state.load_status(), Some(LoadStatus::Ready));

        // A new selection resets the status
        state.set_current_track(entry("b"));
        assert_eq!(state.load_status(), Some(LoadStatus::Loading));

        state.set_load_status(LoadStatus::Failed);
        assert_eq!(state.load_status(), Some(LoadStatus::Failed));
        // Failure does not clear the optimistic play flag
        assert!(state.is_playing());
    }
}
