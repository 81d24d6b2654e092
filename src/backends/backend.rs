use async_trait::async_trait;

use crate::data::Track;
use crate::error::LoadError;

/// BackendPlayer trait - abstract interface for per-source-type players
///
/// This trait defines the transport operations the controller needs from
/// any playback backend. One implementation is registered per
/// [`crate::data::SourceType`]; the controller resolves the adapter for the
/// current track's source type before every backend interaction.
#[async_trait]
pub trait BackendPlayer: Send + Sync {
    /// Prepare the backend for playing the given track.
    ///
    /// This is the only asynchronous operation: loading remote or streaming
    /// media suspends until the backend has fetched enough to start.
    async fn load(&self, track: &Track) -> Result<(), LoadError>;

    /// Start or resume playback of the loaded track
    fn play(&self);

    /// Pause playback
    fn pause(&self);

    /// Release whatever the backend holds for the current track.
    ///
    /// Called best-effort before another track (possibly on a different
    /// backend) takes over.
    fn reset(&self);

    /// Jump to the given position, in seconds from the start of the track
    fn seek(&self, position: f64);

    /// Silence the backend output
    fn mute(&self);

    /// Restore the backend output
    fn unmute(&self);

    /// Current playback position in seconds.
    ///
    /// Values `<= 0.0` mean the position is not known yet (metadata still
    /// loading), never that the track has finished.
    fn current_time(&self) -> f64;

    /// Duration of the loaded track in seconds; `<= 0.0` while unknown
    fn duration(&self) -> f64;

    /// Name of this backend, for logging (e.g. "youtube", "null")
    fn name(&self) -> String;
}
