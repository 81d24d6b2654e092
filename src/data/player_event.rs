use serde::{Serialize, Deserialize};

use super::playback_state::PlaybackState;
use super::player_state::LoadStatus;
use super::playlist_entry::PlaylistEntry;

/// Represents the state transitions the controller announces to listeners
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum PlayerEvent {
    /// The play/pause/idle state has changed
    StateChanged {
        state: PlaybackState,
    },

    /// The current entry has been replaced
    TrackChanged {
        entry: Option<PlaylistEntry>,
    },

    /// The mute flag has flipped
    MuteChanged {
        muted: bool,
    },

    /// Shuffle mode has been toggled on the playlist store
    ShuffleChanged {
        enabled: bool,
    },

    /// The backend reported the outcome of loading the current track
    LoadStatusChanged {
        track_id: String,
        status: LoadStatus,
    },
}

impl PlayerEvent {
    /// Short name of the event variant, for logging
    pub fn name(&self) -> &'static str {
        match self {
            PlayerEvent::StateChanged { .. } => "state_changed",
            PlayerEvent::TrackChanged { .. } => "track_changed",
            PlayerEvent::MuteChanged { .. } => "mute_changed",
            PlayerEvent::ShuffleChanged { .. } => "shuffle_changed",
            PlayerEvent::LoadStatusChanged { .. } => "load_status_changed",
        }
    }
}
