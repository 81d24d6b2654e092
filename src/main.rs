use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::thread;
use std::time::Duration;

use clap::Parser;
use log::{info, warn};

use playcontrol::config::Config;
use playcontrol::logging::init_logging;
use playcontrol::{
    MemoryPlaylistStore, NullBackendPlayer, PlayerController, PlayerEvent, PlayerEventListener,
    PlayerIntent, SourceType, Track,
};

/// Demo frontend for the playcontrol core: wires null backends and a seed
/// playlist to the controller and drives intents from the keyboard.
#[derive(Parser)]
#[command(name = "playcontrol", version, about = "Control core demo for a multi-source music player")]
struct Args {
    /// Path to the JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured log level
    #[arg(long)]
    log_level: Option<String>,
}

/// Event logger that implements the PlayerEventListener trait
struct EventLogger;

impl PlayerEventListener for EventLogger {
    fn on_event(&self, event: PlayerEvent) {
        match event {
            PlayerEvent::StateChanged { state } => info!("state changed: {}", state),
            PlayerEvent::TrackChanged { entry } => match entry {
                Some(entry) => info!("track changed: {}", entry.track),
                None => info!("track cleared"),
            },
            PlayerEvent::MuteChanged { muted } => {
                info!("mute {}", if muted { "on" } else { "off" })
            }
            PlayerEvent::ShuffleChanged { enabled } => {
                info!("shuffle {}", if enabled { "on" } else { "off" })
            }
            PlayerEvent::LoadStatusChanged { track_id, status } => {
                info!("track {} load status: {}", track_id, status)
            }
        }
    }
}

/// Built-in playlist used when the configuration does not seed one
fn demo_tracks() -> Vec<Track> {
    vec![
        Track::with_artist("demo-1", "First Light", "The Placeholders", SourceType::Youtube),
        Track::with_artist("demo-2", "Second Wind", "The Placeholders", SourceType::Soundcloud),
        Track::with_artist("demo-3", "Third Rail", "The Placeholders", SourceType::Local),
    ]
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let mut config = match args.config {
        Some(path) => match Config::load(&path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("could not load config {}: {}", path.display(), err);
                std::process::exit(1);
            }
        },
        None => Config::default(),
    };
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }
    init_logging(&config.logging);

    info!("playcontrol demo starting");

    // Seed the playlist store
    let store = Arc::new(MemoryPlaylistStore::new());
    let first_playlist_id = if config.playlists.is_empty() {
        store.add_playlist("demo", demo_tracks());
        "demo".to_string()
    } else {
        for playlist in &config.playlists {
            store.add_playlist(playlist.id.clone(), playlist.tracks.clone());
        }
        config.playlists[0].id.clone()
    };

    let (mut controller, handle) = PlayerController::new(store.clone());

    let event_logger = Arc::new(EventLogger);
    controller.register_listener(Arc::downgrade(&event_logger) as Weak<dyn PlayerEventListener>);

    let controller_task = tokio::spawn(controller.run());

    // Register a null backend per enabled source type; without a backends
    // section in the config all source types get one
    let source_types = if config.backends.is_empty() {
        vec![SourceType::Youtube, SourceType::Soundcloud, SourceType::Local]
    } else {
        config.enabled_source_types()
    };
    if source_types.is_empty() {
        warn!("no backends enabled, transport intents will be abandoned");
    }
    for source_type in source_types {
        let backend = Arc::new(NullBackendPlayer::new(&source_type.to_string()));
        handle.register_backend(source_type, backend).await;
    }

    // Select the first track of the seed playlist
    match store.entry(&first_playlist_id, 0) {
        Some(entry) => {
            handle.set_track(entry).await;
        }
        None => warn!("playlist '{}' is empty, nothing selected", first_playlist_id),
    }

    // Set up a shared flag for graceful shutdown
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        println!("\nReceived Ctrl+C, shutting down...");
        r.store(false, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl+C handler");

    println!("Keyboard controls active:");
    println!("  Space: Play/Pause");
    println!("  n: Next track");
    println!("  p: Previous track");
    println!("  m: Toggle mute");
    println!("  s: Toggle shuffle");
    println!("  Ctrl+C: Exit");

    // Keyboard handler thread feeding intents into the queue
    let keyboard_handle = handle.clone();
    let keyboard_running = running.clone();
    thread::spawn(move || {
        let mut stdin = io::stdin();
        let mut buffer = [0u8; 1];

        while keyboard_running.load(Ordering::SeqCst) {
            if stdin.read_exact(&mut buffer).is_ok() {
                let intent = match buffer[0] {
                    b' ' => {
                        if keyboard_handle.view().is_playing {
                            Some(PlayerIntent::Pause)
                        } else {
                            Some(PlayerIntent::Play)
                        }
                    }
                    b'n' | b'N' => Some(PlayerIntent::Next),
                    b'p' | b'P' => Some(PlayerIntent::Previous),
                    b'm' | b'M' => Some(PlayerIntent::ToggleMute),
                    b's' | b'S' => Some(PlayerIntent::ToggleShuffle),
                    _ => None,
                };
                if let Some(intent) = intent {
                    if !keyboard_handle.blocking_dispatch(intent) {
                        break;
                    }
                }
            } else {
                thread::sleep(Duration::from_millis(10));
            }
        }
    });

    while running.load(Ordering::SeqCst) {
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    info!("exiting");
    handle.shutdown().await;
    let _ = controller_task.await;
}
