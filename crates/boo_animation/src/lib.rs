//! Boo Animation
//!
//! The animation side of Boo behavior states.
//!
//! # Features
//!
//! - **Name Registry**: Classifies keyframe names into transition directions
//! - **Name Table**: The keyframe name contract with the stylesheet, generated
//!   from a prefix or loaded from TOML
//! - **Timeline**: A deterministic clock that plays named animations and
//!   reports `animationstart` / `animationend` signals in firing order

pub mod error;
pub mod names;
pub mod registry;
pub mod timeline;

pub use error::{ConfigError, RegistryError};
pub use names::{AnimationNames, BehaviorKind, NameSet, DEFAULT_PREFIX};
pub use registry::{AnimationNameRegistry, Direction, RegistryBuilder};
pub use timeline::{
    AnimationId, AnimationSignal, AnimationTimeline, DurationTable, RunningAnimation, SignalKind,
    DEFAULT_DURATION_MS,
};
