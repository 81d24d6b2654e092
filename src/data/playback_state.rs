/// Playback state enumeration defining the states of the player state machine
use serde::{Serialize, Deserialize};
use strum_macros::EnumString;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PlaybackState {
    /// No track has been selected yet
    #[serde(rename = "idle")]
    Idle,
    /// A track is selected but playback is paused
    #[serde(rename = "paused")]
    Paused,
    /// A track is selected and marked playing
    #[serde(rename = "playing")]
    Playing,
}

impl Default for PlaybackState {
    fn default() -> Self {
        PlaybackState::Idle
    }
}

impl std::fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaybackState::Idle => write!(f, "idle"),
            PlaybackState::Paused => write!(f, "paused"),
            PlaybackState::Playing => write!(f, "playing"),
        }
    }
}
