//! Player spawning.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::*;
use crate::core::layers;

/// Name turrets look the player up by.
pub const PLAYER_NAME: &str = "Dimwick";

const HALF_HEIGHT: f32 = 0.5;
const RADIUS: f32 = 0.3;

/// Spawn the player body.
pub fn spawn_player(commands: &mut Commands, position: Vec2) -> Entity {
    commands
        .spawn((
            Player,
            Name::new(PLAYER_NAME),
            PlayerCollider::capsule(Vec2::ZERO, HALF_HEIGHT, RADIUS),
            FocusPoints::default(),
            Sprite::from_color(
                Color::srgb(0.4, 0.7, 1.0),
                Vec2::new(RADIUS * 2.0, (HALF_HEIGHT + RADIUS) * 2.0),
            ),
            Transform::from_translation(position.extend(0.5)),
            RigidBody::KinematicPositionBased,
            Collider::capsule_y(HALF_HEIGHT, RADIUS),
            ActiveEvents::COLLISION_EVENTS,
            ActiveCollisionTypes::default() | ActiveCollisionTypes::KINEMATIC_STATIC,
            layers::player_groups(),
        ))
        .id()
}
