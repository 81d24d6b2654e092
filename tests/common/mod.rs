// Common helpers for integration tests:
// call-recording doubles for the backend, the playlist store and the
// event listener, all writing into one shared journal so tests can assert
// ordering across the three seams.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use playcontrol::{
    BackendPlayer, LoadError, MemoryPlaylistStore, PlayerEvent, PlayerEventListener, PlaylistEntry,
    PlaylistStore, SourceType, Track,
};

/// Shared, ordered record of everything the controller did
pub type Journal = Arc<Mutex<Vec<String>>>;

pub fn new_journal() -> Journal {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn journal_entries(journal: &Journal) -> Vec<String> {
    journal.lock().unwrap().clone()
}

/// Assert that `needles` appear in the journal in the given relative order
pub fn assert_order(journal: &Journal, needles: &[&str]) {
    let entries = journal_entries(journal);
    let mut position = 0;
    for needle in needles {
        match entries[position..].iter().position(|entry| entry == needle) {
            Some(offset) => position += offset + 1,
            None => panic!(
                "expected '{}' after position {} in journal {:?}",
                needle, position, entries
            ),
        }
    }
}

/// Backend double that records every call and can be scripted to fail
/// loads or report a timeline position.
pub struct RecordingBackend {
    name: String,
    journal: Journal,
    fail_loads: AtomicBool,
    current_time: AtomicU64,
    duration: AtomicU64,
    time_queries: AtomicUsize,
}

impl RecordingBackend {
    pub fn new(name: &str, journal: Journal) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            journal,
            fail_loads: AtomicBool::new(false),
            current_time: AtomicU64::new(0.0f64.to_bits()),
            duration: AtomicU64::new(0.0f64.to_bits()),
            time_queries: AtomicUsize::new(0),
        })
    }

    pub fn fail_loads(&self) {
        self.fail_loads.store(true, Ordering::SeqCst);
    }

    /// Script the position/duration the timeline queries report
    pub fn set_timeline(&self, current: f64, duration: f64) {
        self.current_time.store(current.to_bits(), Ordering::SeqCst);
        self.duration.store(duration.to_bits(), Ordering::SeqCst);
    }

    pub fn time_query_count(&self) -> usize {
        self.time_queries.load(Ordering::SeqCst)
    }

    fn record(&self, operation: String) {
        self.journal
            .lock()
            .unwrap()
            .push(format!("{}.{}", self.name, operation));
    }
}

#[async_trait]
impl BackendPlayer for RecordingBackend {
    async fn load(&self, track: &Track) -> Result<(), LoadError> {
        self.record(format!("load:{}", track.id));
        if self.fail_loads.load(Ordering::SeqCst) {
            Err(LoadError::Network("simulated failure".to_string()))
        } else {
            Ok(())
        }
    }

    fn play(&self) {
        self.record("play".to_string());
    }

    fn pause(&self) {
        self.record("pause".to_string());
    }

    fn reset(&self) {
        self.record("reset".to_string());
    }

    fn seek(&self, position: f64) {
        self.record(format!("seek:{}", position));
    }

    fn mute(&self) {
        self.record("mute".to_string());
    }

    fn unmute(&self) {
        self.record("unmute".to_string());
    }

    fn current_time(&self) -> f64 {
        self.time_queries.fetch_add(1, Ordering::SeqCst);
        f64::from_bits(self.current_time.load(Ordering::SeqCst))
    }

    fn duration(&self) -> f64 {
        self.time_queries.fetch_add(1, Ordering::SeqCst);
        f64::from_bits(self.duration.load(Ordering::SeqCst))
    }

    fn name(&self) -> String {
        self.name.clone()
    }
}

/// Playlist store double: a real in-memory store that journals the
/// contract calls the controller makes.
pub struct RecordingStore {
    inner: MemoryPlaylistStore,
    journal: Journal,
}

impl RecordingStore {
    pub fn new(journal: Journal) -> Arc<Self> {
        Arc::new(Self {
            inner: MemoryPlaylistStore::new(),
            journal,
        })
    }

    pub fn inner(&self) -> &MemoryPlaylistStore {
        &self.inner
    }

    fn record(&self, operation: String) {
        self.journal.lock().unwrap().push(format!("store.{}", operation));
    }
}

impl PlaylistStore for RecordingStore {
    fn next_track(&self, current: &PlaylistEntry) -> Option<Track> {
        self.record("next_track".to_string());
        self.inner.next_track(current)
    }

    fn prev_track(&self, current: &PlaylistEntry) -> Option<Track> {
        self.record("prev_track".to_string());
        self.inner.prev_track(current)
    }

    fn shuffle_enabled(&self) -> bool {
        self.inner.shuffle_enabled()
    }

    fn set_shuffle(&self, enabled: bool) {
        self.record(format!("set_shuffle:{}", enabled));
        self.inner.set_shuffle(enabled)
    }

    fn push_shuffled(&self, track_id: &str) {
        self.record(format!("push_shuffled:{}", track_id));
        self.inner.push_shuffled(track_id)
    }

    fn pop_shuffled(&self) -> Option<String> {
        self.record("pop_shuffled".to_string());
        self.inner.pop_shuffled()
    }
}

/// Listener double journaling every committed transition
pub struct RecordingListener {
    journal: Journal,
}

impl RecordingListener {
    pub fn new(journal: Journal) -> Arc<Self> {
        Arc::new(Self { journal })
    }
}

impl PlayerEventListener for RecordingListener {
    fn on_event(&self, event: PlayerEvent) {
        let line = match &event {
            PlayerEvent::StateChanged { state } => format!("state_changed:{}", state),
            PlayerEvent::TrackChanged { entry } => match entry {
                Some(entry) => format!("track_changed:{}", entry.track.id),
                None => "track_changed:none".to_string(),
            },
            PlayerEvent::MuteChanged { muted } => format!("mute_changed:{}", muted),
            PlayerEvent::ShuffleChanged { enabled } => format!("shuffle_changed:{}", enabled),
            PlayerEvent::LoadStatusChanged { track_id, status } => {
                format!("load_status_changed:{}:{}", track_id, status)
            }
        };
        self.journal.lock().unwrap().push(format!("event.{}", line));
    }
}

/// Three-track playlist spanning two source types:
/// a (youtube), b (soundcloud), c (youtube)
pub fn seed_playlist(store: &MemoryPlaylistStore) {
    store.add_playlist(
        "p1",
        vec![
            Track::new("a", "Track A", SourceType::Youtube),
            Track::new("b", "Track B", SourceType::Soundcloud),
            Track::new("c", "Track C", SourceType::Youtube),
        ],
    );
}
