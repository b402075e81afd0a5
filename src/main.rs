//! Turret Sentinel - Entry Point
//!
//! Controls:
//! - Mouse: Camera look-ahead
//! - E: Interact
//! - Escape: Pause/Unpause

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

fn main() {
    App::new()
        // Bevy default plugins
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Turret Sentinel".to_string(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))

        // Physics, stepped alongside the turret logic
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default().in_fixed_schedule())

        // Our game plugin
        .add_plugins(turret_sentinel::TurretSentinelPlugin)

        .run();
}
