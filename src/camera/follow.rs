//! Smoothed 2D follow camera with cursor look-ahead.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::core::smooth_toward;
use crate::player::{FocusPoints, Player};

/// Follow camera tuning and state.
#[derive(Component, Debug, Clone)]
pub struct FollowCamera {
    /// Multiplier from goal offset to camera speed
    pub movement_speed: f32,
    /// Rate at which camera speed converges
    pub movement_sharpness: f32,
    /// Look-ahead distance along x and y when the cursor leans away
    pub mouse_offset: Vec2,
    /// Cursor distance from the aim pivot below which there is no look-ahead
    pub mouse_influence_range: f32,
    /// Current camera velocity
    pub speed: Vec2,
}

impl Default for FollowCamera {
    fn default() -> Self {
        Self {
            movement_speed: 5.0,
            movement_sharpness: 10.0,
            mouse_offset: Vec2::new(5.0, 2.0),
            mouse_influence_range: 1.0,
            speed: Vec2::ZERO,
        }
    }
}

impl FollowCamera {
    /// Where the camera wants to be: the focus point, pushed toward the
    /// cursor once it leaves the influence range around the aim pivot.
    pub fn goal(&self, focus: Vec2, aim_pivot: Vec2, cursor: Option<Vec2>) -> Vec2 {
        let Some(cursor) = cursor else {
            return focus;
        };

        let lean = cursor - aim_pivot;
        if lean.length() > self.mouse_influence_range {
            focus + lean.normalize() * self.mouse_offset
        } else {
            focus
        }
    }

    /// Advance the camera one step toward `goal`, returning the new position.
    pub fn advance(&mut self, position: Vec2, goal: Vec2, dt: f32) -> Vec2 {
        let goal_speed = (goal - position) * self.movement_speed;
        self.speed = smooth_toward(self.speed, goal_speed, self.movement_sharpness, dt);
        position + self.speed * dt
    }
}

/// Cursor position in world space, if the cursor is over the window.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct CursorWorld(pub Option<Vec2>);

/// Spawn the gameplay camera.
pub fn spawn_follow_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        OrthographicProjection {
            scale: 1.0 / 32.0,
            ..OrthographicProjection::default_2d()
        },
        FollowCamera::default(),
    ));
}

/// Project the window cursor into the world.
pub fn track_cursor(
    mut cursor: ResMut<CursorWorld>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<FollowCamera>>,
) {
    let (Ok(window), Ok((camera, camera_transform))) = (windows.get_single(), cameras.get_single())
    else {
        return;
    };

    cursor.0 = window
        .cursor_position()
        .and_then(|screen| camera.viewport_to_world_2d(camera_transform, screen).ok());
}

/// Move the camera toward the player. Runs on the fixed step so the
/// smoothing matches the physics the player moves with.
pub fn camera_follow(
    time: Res<Time>,
    cursor: Res<CursorWorld>,
    players: Query<(&Transform, &FocusPoints), With<Player>>,
    mut cameras: Query<(&mut Transform, &mut FollowCamera), Without<Player>>,
) {
    let Ok((player_transform, focus)) = players.get_single() else {
        return;
    };
    let player = player_transform.translation.truncate();

    for (mut transform, mut follow) in cameras.iter_mut() {
        let goal = follow.goal(
            focus.focus_position(player),
            focus.aim_pivot_position(player),
            cursor.0,
        );
        let position = follow.advance(transform.translation.truncate(), goal, time.delta_secs());
        transform.translation = position.extend(transform.translation.z);
    }
}
