//! Camera plugin - follow camera and cursor tracking.

use bevy::prelude::*;

use super::follow::*;
use crate::core::{GameState, PlayState};

/// Camera plugin - spawns the follow camera and keeps it on the player.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CursorWorld>()
            .add_systems(Startup, spawn_follow_camera)
            .add_systems(Update, track_cursor)
            .add_systems(
                FixedUpdate,
                camera_follow
                    .run_if(in_state(GameState::InGame))
                    .run_if(in_state(PlayState::Running)),
            );
    }
}
