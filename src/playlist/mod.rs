// Playlist store contract and in-memory implementation

pub mod shuffle;
pub mod store;

pub use shuffle::ShuffleHistory;
pub use store::{MemoryPlaylistStore, PlaylistStore};
