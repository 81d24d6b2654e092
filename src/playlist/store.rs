use std::collections::HashMap;
use std::sync::RwLock;

use log::{debug, warn};
use rand::Rng;

use crate::data::{PlaylistEntry, Track};

use super::shuffle::ShuffleHistory;

/// Playlist store contract consumed by the player controller.
///
/// The store owns the ordered track lists and the shuffle state. The
/// controller only ever asks for the neighbours of the current entry and
/// maintains the shuffle history through the push/pop pair; it never walks
/// playlists itself.
pub trait PlaylistStore: Send + Sync {
    /// Track following the given entry, or None at the end of the list
    fn next_track(&self, current: &PlaylistEntry) -> Option<Track>;

    /// Track preceding the given entry, or None at the beginning
    fn prev_track(&self, current: &PlaylistEntry) -> Option<Track>;

    fn shuffle_enabled(&self) -> bool;

    fn set_shuffle(&self, enabled: bool);

    /// Record a forward shuffle navigation step
    fn push_shuffled(&self, track_id: &str);

    /// Undo the most recent forward shuffle step
    fn pop_shuffled(&self) -> Option<String>;
}

struct StoreInner {
    /// Ordered track lists by playlist id
    playlists: HashMap<String, Vec<Track>>,
    shuffle: bool,
    history: ShuffleHistory,
}

/// In-memory playlist store.
///
/// Sequential adjacency follows playlist order. With shuffle enabled,
/// `next_track` picks a random other track of the same playlist and
/// `prev_track` retraces the shuffle history instead.
pub struct MemoryPlaylistStore {
    inner: RwLock<StoreInner>,
}

impl MemoryPlaylistStore {
    /// Create an empty store with shuffle disabled
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StoreInner {
                playlists: HashMap::new(),
                shuffle: false,
                history: ShuffleHistory::default(),
            }),
        }
    }

    /// Add a playlist with its ordered tracks, replacing any previous list
    /// under the same id
    pub fn add_playlist(&self, playlist_id: impl Into<String>, tracks: Vec<Track>) {
        if let Ok(mut inner) = self.inner.write() {
            inner.playlists.insert(playlist_id.into(), tracks);
        } else {
            warn!("failed to acquire write lock when adding playlist");
        }
    }

    /// Build the playlist entry for the track at the given position
    pub fn entry(&self, playlist_id: &str, index: usize) -> Option<PlaylistEntry> {
        if let Ok(inner) = self.inner.read() {
            let track = inner.playlists.get(playlist_id)?.get(index)?.clone();
            Some(PlaylistEntry::new(playlist_id, track))
        } else {
            warn!("failed to acquire read lock when building playlist entry");
            None
        }
    }

    /// Number of recorded shuffle steps, mainly for diagnostics
    pub fn shuffle_history_len(&self) -> usize {
        match self.inner.read() {
            Ok(inner) => inner.history.len(),
            Err(_) => {
                warn!("failed to acquire read lock for shuffle history");
                0
            }
        }
    }

    fn position_of(inner: &StoreInner, entry: &PlaylistEntry) -> Option<usize> {
        inner
            .playlists
            .get(&entry.playlist_id)?
            .iter()
            .position(|track| track.id == entry.track.id)
    }
}

impl Default for MemoryPlaylistStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaylistStore for MemoryPlaylistStore {
    fn next_track(&self, current: &PlaylistEntry) -> Option<Track> {
        let inner = match self.inner.read() {
            Ok(inner) => inner,
            Err(_) => {
                warn!("failed to acquire read lock for next track lookup");
                return None;
            }
        };

        let tracks = inner.playlists.get(&current.playlist_id)?;

        if inner.shuffle {
            // Random pick among the other tracks of the playlist
            let candidates: Vec<&Track> =
                tracks.iter().filter(|track| track.id != current.track.id).collect();
            if candidates.is_empty() {
                return None;
            }
            let pick = rand::thread_rng().gen_range(0..candidates.len());
            return Some(candidates[pick].clone());
        }

        let position = Self::position_of(&inner, current)?;
        tracks.get(position + 1).cloned()
    }

    fn prev_track(&self, current: &PlaylistEntry) -> Option<Track> {
        let inner = match self.inner.read() {
            Ok(inner) => inner,
            Err(_) => {
                warn!("failed to acquire read lock for previous track lookup");
                return None;
            }
        };

        let tracks = inner.playlists.get(&current.playlist_id)?;

        if inner.shuffle {
            // Walk back along the shuffle history; the top of the stack is
            // the track currently playing
            let prev_id = inner.history.previous()?;
            return tracks.iter().find(|track| track.id == prev_id).cloned();
        }

        let position = Self::position_of(&inner, current)?;
        if position == 0 {
            return None;
        }
        tracks.get(position - 1).cloned()
    }

    fn shuffle_enabled(&self) -> bool {
        match self.inner.read() {
            Ok(inner) => inner.shuffle,
            Err(_) => {
                warn!("failed to acquire read lock for shuffle status");
                false
            }
        }
    }

    fn set_shuffle(&self, enabled: bool) {
        if let Ok(mut inner) = self.inner.write() {
            inner.shuffle = enabled;
            if !enabled {
                // A fresh shuffle session starts with an empty trail
                inner.history.clear();
            }
            debug!("shuffle {}", if enabled { "enabled" } else { "disabled" });
        } else {
            warn!("failed to acquire write lock when setting shuffle");
        }
    }

    fn push_shuffled(&self, track_id: &str) {
        if let Ok(mut inner) = self.inner.write() {
            inner.history.push(track_id);
        } else {
            warn!("failed to acquire write lock when recording shuffle step");
        }
    }

    fn pop_shuffled(&self) -> Option<String> {
        if let Ok(mut inner) = self.inner.write() {
            inner.history.pop()
        } else {
            warn!("failed to acquire write lock when undoing shuffle step");
            None
        }
    }
}
