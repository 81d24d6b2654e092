/// Read-only projection of the player state for UI consumers
use serde::{Serialize, Deserialize};

use super::playback_state::PlaybackState;
use super::player_state::LoadStatus;
use super::track::Track;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    /// Derived state-machine state
    pub state: PlaybackState,

    pub is_playing: bool,

    pub is_muted: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_track: Option<Track>,

    /// Whether a backend is registered for the current track's source type
    pub backend_available: bool,

    pub shuffle_enabled: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_status: Option<LoadStatus>,
}

impl PlayerView {
    /// The view of a player that has not selected a track yet
    pub fn idle(shuffle_enabled: bool) -> Self {
        Self {
            state: PlaybackState::Idle,
            is_playing: false,
            is_muted: false,
            current_track: None,
            backend_available: false,
            shuffle_enabled,
            load_status: None,
        }
    }
}
