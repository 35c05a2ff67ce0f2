//! Physics error types
//!
//! Invariant violations are caller bugs and are reported, never clamped or
//! silently ignored. Degenerate numeric cases inside the narrow phase are not
//! errors: they resolve locally to "no time of impact".

use thiserror::Error;

use crate::dynamics::BodyId;

/// Unified error type for physics operations.
#[derive(Debug, Error)]
pub enum PhysicsError {
    /// `set_velocity` was called on a fixed body
    #[error("cannot set velocity of fixed body {0}")]
    FixedBodyVelocity(BodyId),

    /// Elasticity outside `[0, 1]`
    #[error("elasticity must be within 0-1, got {0}")]
    InvalidElasticity(f64),

    /// Mass that is not strictly positive
    #[error("mass must be greater than zero, got {0}")]
    InvalidMass(f64),

    /// Negative or non-finite radius, width or height
    #[error("invalid {what}: {value}")]
    InvalidDimension {
        /// Which dimension was rejected
        what: &'static str,
        /// The rejected value
        value: f64,
    },

    /// A body id that is already registered
    #[error("body with id {0} already exists")]
    DuplicateBody(BodyId),

    /// A body id that is not registered
    #[error("no body with id {0}")]
    UnknownBody(BodyId),

    /// Attempt to remove one of the world's boundary bodies
    #[error("body {0} is a world boundary and cannot be removed")]
    BoundaryBody(BodyId),

    /// A configuration value that cannot be used
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A configuration document that failed to parse
    #[error("failed to parse configuration: {0}")]
    Config(#[from] serde_yaml::Error),
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, PhysicsError>;
