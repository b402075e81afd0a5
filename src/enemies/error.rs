//! Error types for turret setup, turret data loading and hit resolution.

use bevy::prelude::Entity;
use thiserror::Error;

/// Errors raised by a single turret. None of them may abort another turret's step.
#[derive(Debug, Error)]
pub enum TurretError {
    /// No player entity carries the configured target name.
    #[error("Target entity '{0}' not found")]
    TargetNotFound(String),

    /// An injected target entity does not exist or is not a player.
    #[error("Injected target {0} is not a player")]
    TargetNotAPlayer(Entity),

    /// A tuning value is out of range.
    #[error("Invalid turret config: {field} = {value}")]
    InvalidConfig { field: &'static str, value: f32 },

    /// A player bullet touched the turret but carries no projectile data.
    #[error("Invalid player projectile collision with {0}")]
    InvalidCollision(Entity),
}

/// Errors that can occur when loading turret definition files.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// Directory or file could not be found.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },

    /// File parsed but the tuning values are unusable.
    #[error("Invalid definition in '{path}': {source}")]
    Invalid {
        path: String,
        #[source]
        source: TurretError,
    },
}
