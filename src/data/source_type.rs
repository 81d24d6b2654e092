/// Source type enumeration identifying which backend plays a track
use serde::{Serialize, Deserialize};
use strum_macros::EnumString;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SourceType {
    /// Embedded YouTube player
    #[serde(rename = "youtube")]
    Youtube,
    /// SoundCloud streaming widget
    #[serde(rename = "soundcloud")]
    Soundcloud,
    /// Locally hosted media file
    #[serde(rename = "local")]
    Local,
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceType::Youtube => write!(f, "youtube"),
            SourceType::Soundcloud => write!(f, "soundcloud"),
            SourceType::Local => write!(f, "local"),
        }
    }
}
