/// Class representing a playable track and its source-specific metadata
use std::collections::HashMap;
use std::fmt;
use serde::{Serialize, Deserialize};

use super::source_type::SourceType;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    /// Stable identifier of the track, unique within its playlist
    pub id: String,

    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,

    /// Duration in seconds, when known up front
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,

    /// Which backend plays this track
    pub source_type: SourceType,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl Track {
    /// Create a new Track with the given identity and source type
    pub fn new(id: impl Into<String>, title: impl Into<String>, source_type: SourceType) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: None,
            duration: None,
            source_type,
            metadata: HashMap::new(),
        }
    }

    /// Create a new Track with an artist
    pub fn with_artist(
        id: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
        source_type: SourceType,
    ) -> Self {
        let mut track = Self::new(id, title, source_type);
        track.artist = Some(artist.into());
        track
    }
}

impl PartialEq for Track {
    fn eq(&self, other: &Self) -> bool {
        // Tracks are identified by id; the rest is display metadata
        self.id == other.id
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.artist {
            Some(artist) if !artist.is_empty() => write!(f, "{} by {}", self.title, artist),
            _ => write!(f, "{}", self.title),
        }
    }
}
