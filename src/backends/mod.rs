// Backend player adapters and their registry

pub mod backend;
pub mod null_backend;
pub mod registry;

pub use backend::BackendPlayer;
pub use null_backend::NullBackendPlayer;
pub use registry::BackendRegistry;
