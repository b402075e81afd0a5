//! Turret Sentinel - a 2D arena built around a stationary turret enemy.
//!
//! The turret sleeps until the player comes close, then fires aimed shots
//! whenever it has line of sight, and is knocked back into hitstun by the
//! player's bullets.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, global events, collision layers, smoothing
//! - **Player**: Player body, collider and focus points
//! - **Combat**: Projectiles, hit resolution
//! - **Enemies**: Turret state machine, targeting, data files
//! - **Camera**: Follow camera with cursor look-ahead
//! - **World**: Arena setup, interactables

pub mod camera;
pub mod combat;
pub mod core;
pub mod enemies;
pub mod player;
pub mod world;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct TurretSentinelPlugin;

impl Plugin for TurretSentinelPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Combat systems
            .add_plugins(combat::CombatPlugin)

            // Enemy systems
            .add_plugins(enemies::TurretPlugin)

            // Camera systems
            .add_plugins(camera::CameraPlugin)

            // World systems
            .add_plugins(world::WorldPlugin);
    }
}
