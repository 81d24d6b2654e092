// Data structures shared across the player core

pub mod intent;
pub mod playback_state;
pub mod player_event;
pub mod player_state;
pub mod player_view;
pub mod playlist_entry;
pub mod source_type;
pub mod track;

pub use intent::PlayerIntent;
pub use playback_state::PlaybackState;
pub use player_event::PlayerEvent;
pub use player_state::{LoadStatus, PlayerState};
pub use player_view::PlayerView;
pub use playlist_entry::PlaylistEntry;
pub use source_type::SourceType;
pub use track::Track;
