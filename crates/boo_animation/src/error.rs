//! Animation error types

use thiserror::Error;

use crate::registry::Direction;

/// Errors raised while building an animation name registry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A binary direction has no animation name
    #[error("No animation name registered for the {0} direction")]
    MissingDirection(Direction),

    /// An empty string was registered as a name
    #[error("Empty animation name registered for the {0} direction")]
    EmptyName(Direction),

    /// The same name was registered for two directions
    #[error("Animation name `{name}` registered for both {first} and {second}")]
    Ambiguous {
        name: String,
        first: Direction,
        second: Direction,
    },
}

/// Errors raised while loading an animation name table
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The table is not valid TOML or does not match the expected shape
    #[error("Invalid animation name table: {0}")]
    Parse(#[from] toml::de::Error),

    /// A domain section builds an invalid registry
    #[error("Invalid animation names for `{domain}`: {source}")]
    Registry {
        domain: String,
        #[source]
        source: RegistryError,
    },
}

/// Result type for animation configuration
pub type Result<T> = std::result::Result<T, ConfigError>;
