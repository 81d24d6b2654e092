use async_trait::async_trait;
use log::{debug, info};

use crate::data::Track;
use crate::error::LoadError;

use super::backend::BackendPlayer;

/// A null backend player that does nothing
///
/// This implementation is useful for debugging and testing purposes.
/// Every transport operation is logged and succeeds; position and duration
/// stay unknown, so the timeline sampler never auto-advances on it.
pub struct NullBackendPlayer {
    name: String,
}

impl NullBackendPlayer {
    /// Create a new null backend with the given display name
    pub fn new(name: &str) -> Self {
        debug!("creating NullBackendPlayer '{}'", name);
        Self {
            name: name.to_string(),
        }
    }
}

#[async_trait]
impl BackendPlayer for NullBackendPlayer {
    async fn load(&self, track: &Track) -> Result<(), LoadError> {
        info!("NullBackendPlayer '{}': load {} (no action taken)", self.name, track);
        Ok(())
    }

    fn play(&self) {
        info!("NullBackendPlayer '{}': play (no action taken)", self.name);
    }

    fn pause(&self) {
        info!("NullBackendPlayer '{}': pause (no action taken)", self.name);
    }

    fn reset(&self) {
        debug!("NullBackendPlayer '{}': reset (no-op)", self.name);
    }

    fn seek(&self, position: f64) {
        info!("NullBackendPlayer '{}': seek to {:.1}s (no action taken)", self.name, position);
    }

    fn mute(&self) {
        debug!("NullBackendPlayer '{}': mute (no-op)", self.name);
    }

    fn unmute(&self) {
        debug!("NullBackendPlayer '{}': unmute (no-op)", self.name);
    }

    fn current_time(&self) -> f64 {
        0.0
    }

    fn duration(&self) -> f64 {
        0.0
    }

    fn name(&self) -> String {
        self.name.clone()
    }
}
