use thiserror::Error;

use crate::data::SourceType;

/// Failure reported by a backend while loading a track.
///
/// Loading is the only fallible backend operation; the synchronous
/// transport operations are assumed not to fail fatally.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("network failure: {0}")]
    Network(String),

    #[error("unsupported media: {0}")]
    Unsupported(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures a controller handler can run into.
///
/// Handlers catch these at their own boundary: the failure is logged, the
/// intent is abandoned and already-committed state transitions stand. A
/// missing next/previous track is a normal early exit, not an error.
#[derive(Debug, Error)]
pub enum ControlError {
    #[error("no backend registered for source type {source_type}")]
    BackendMissing { source_type: SourceType },

    #[error("failed to load track {track_id}: {source}")]
    LoadFailed {
        track_id: String,
        #[source]
        source: LoadError,
    },
}

pub type Result<T> = std::result::Result<T, ControlError>;
