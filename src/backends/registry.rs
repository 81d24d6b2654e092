use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, warn};

use crate::data::SourceType;

use super::backend::BackendPlayer;

/// Registry of backend players, keyed by source type.
///
/// Backends are registered once per source type at startup and stay for the
/// process lifetime; a second registration for an occupied slot is refused.
/// The registry is owned by the controller and only mutated on its worker
/// task, so lookups need no synchronization.
#[derive(Default)]
pub struct BackendRegistry {
    backends: HashMap<SourceType, Arc<dyn BackendPlayer>>,
}

impl BackendRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a backend for a source type.
    ///
    /// Returns false without replacing anything if the source type already
    /// has a backend.
    pub fn register(&mut self, source_type: SourceType, backend: Arc<dyn BackendPlayer>) -> bool {
        if self.backends.contains_key(&source_type) {
            warn!(
                "backend for source type {} already registered, keeping the existing one",
                source_type
            );
            return false;
        }
        debug!("registering {} backend for source type {}", backend.name(), source_type);
        self.backends.insert(source_type, backend);
        true
    }

    /// Look up the backend for a source type
    pub fn resolve(&self, source_type: SourceType) -> Option<Arc<dyn BackendPlayer>> {
        self.backends.get(&source_type).cloned()
    }

    /// Whether a backend is registered for the source type
    pub fn contains(&self, source_type: SourceType) -> bool {
        self.backends.contains_key(&source_type)
    }

    pub fn len(&self) -> usize {
        self.backends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::NullBackendPlayer;

    #[test]
    fn register_and_resolve() {
        let mut registry = BackendRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.resolve(SourceType::Youtube).is_none());

        let backend = Arc::new(NullBackendPlayer::new("youtube"));
        assert!(registry.register(SourceType::Youtube, backend));
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(SourceType::Youtube));
        assert_eq!(registry.resolve(SourceType::Youtube).unwrap().name(), "youtube");
    }

    #[test]
    fn registration_is_write_once() {
        let mut registry = BackendRegistry::new();
        let first = Arc::new(NullBackendPlayer::new("first"));
        let second = Arc::new(NullBackendPlayer::new("second"));

        assert!(registry.register(SourceType::Local, first));
        assert!(!registry.register(SourceType::Local, second));

        // The original registration survives
        assert_eq!(registry.resolve(SourceType::Local).unwrap().name(), "first");
        assert_eq!(registry.len(), 1);
    }
}
