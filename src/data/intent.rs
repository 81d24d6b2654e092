/// Intents that the UI can dispatch to the player controller
use serde::{Serialize, Deserialize};

use super::playlist_entry::PlaylistEntry;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum PlayerIntent {
    /// Simple transport intents
    #[serde(rename = "play")]
    Play,

    #[serde(rename = "pause")]
    Pause,

    #[serde(rename = "next")]
    Next,

    #[serde(rename = "previous")]
    Previous,

    /// Select a track for playback; the only intent that sets a track
    #[serde(rename = "set_track")]
    SetTrack(PlaylistEntry),

    /// Seek to a position in seconds within the current track
    #[serde(rename = "set_track_time")]
    SetTrackTime(f64),

    #[serde(rename = "toggle_shuffle")]
    ToggleShuffle,

    #[serde(rename = "toggle_mute")]
    ToggleMute,
}

impl std::fmt::Display for PlayerIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerIntent::Play => write!(f, "play"),
            PlayerIntent::Pause => write!(f, "pause"),
            PlayerIntent::Next => write!(f, "next"),
            PlayerIntent::Previous => write!(f, "previous"),
            PlayerIntent::SetTrack(entry) => write!(f, "set_track:{}", entry.track.id),
            PlayerIntent::SetTrackTime(position) => write!(f, "set_track_time:{}", position),
            PlayerIntent::ToggleShuffle => write!(f, "toggle_shuffle"),
            PlayerIntent::ToggleMute => write!(f, "toggle_mute"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{SourceType, Track};

    #[test]
    fn unit_intents_serialize_as_strings() {
        assert_eq!(serde_json::to_string(&PlayerIntent::Play).unwrap(), "\"play\"");
        assert_eq!(
            serde_json::to_string(&PlayerIntent::ToggleMute).unwrap(),
            "\"toggle_mute\""
        );
    }

    #[test]
    fn seek_round_trips() {
        let intent = PlayerIntent::SetTrackTime(42.5);
        let json = serde_json::to_string(&intent).unwrap();
        assert_eq!(json, "{\"set_track_time\":42.5}");
        let parsed: PlayerIntent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, intent);
    }

    #[test]
    fn set_track_round_trips() {
        let entry = PlaylistEntry::new("mix", Track::new("t1", "Song", SourceType::Soundcloud));
        let intent = PlayerIntent::SetTrack(entry);
        let json = serde_json::to_string(&intent).unwrap();
        let parsed: PlayerIntent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, intent);
    }
}
