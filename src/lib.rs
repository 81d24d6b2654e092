/// Shared data types for tracks, intents and player state
pub mod data;

/// Backend player adapters and their registry
pub mod backends;

/// Playlist store contract and in-memory implementation
pub mod playlist;

/// The player controller and its intent queue
pub mod player;

/// Error taxonomy for controller handlers and backend loads
pub mod error;

/// Configuration loading
pub mod config;

/// Logger initialization
pub mod logging;

// Re-export the most used items at the crate root
pub use data::{
    LoadStatus, PlaybackState, PlayerEvent, PlayerIntent, PlayerState, PlayerView, PlaylistEntry,
    SourceType, Track,
};
pub use backends::{BackendPlayer, BackendRegistry, NullBackendPlayer};
pub use error::{ControlError, LoadError};
pub use player::{ControlMessage, PlayerController, PlayerEventListener, PlayerHandle};
pub use playlist::{MemoryPlaylistStore, PlaylistStore, ShuffleHistory};
