// The player controller, its intent queue and the timeline sampler

pub mod controller;
pub mod sampler;

pub use controller::{ControlMessage, PlayerController, PlayerEventListener, PlayerHandle};
pub use sampler::TimelineSampler;
