use serde::{Serialize, Deserialize};

use super::track::Track;

/// A track selected for playback, together with the playlist context needed
/// to look up its neighbours.
///
/// Entries are replaced wholesale on every track change and never mutated
/// in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlaylistEntry {
    /// Identifier of the playlist the track was selected from
    pub playlist_id: String,

    pub track: Track,
}

impl PlaylistEntry {
    /// Create a new PlaylistEntry
    pub fn new(playlist_id: impl Into<String>, track: Track) -> Self {
        Self {
            playlist_id: playlist_id.into(),
            track,
        }
    }

    /// Build the entry for another track of the same playlist.
    ///
    /// Used for next/previous navigation, which keeps the playlist context
    /// of the current entry while swapping the track.
    pub fn with_track(&self, track: Track) -> Self {
        Self {
            playlist_id: self.playlist_id.clone(),
            track,
        }
    }
}
