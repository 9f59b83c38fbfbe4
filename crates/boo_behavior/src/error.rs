//! Behavior state error types
//!
//! State machine operations never fail; an unexpected signal or a call after
//! disposal is reported as an ignored step. Errors only arise while building
//! configuration.

use boo_animation::{ConfigError, RegistryError};
use thiserror::Error;

/// Behavior configuration errors
#[derive(Error, Debug)]
pub enum BehaviorError {
    /// The animation names of a domain do not form a valid registry
    #[error("Invalid animation registry: {0}")]
    Registry(#[from] RegistryError),

    /// The animation name table could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for behavior configuration
pub type Result<T> = std::result::Result<T, BehaviorError>;
