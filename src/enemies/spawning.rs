//! Turret spawning.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::animation::TurretPresentation;
use super::components::{NeedsBrain, Turret, TurretTarget, TurretType};
use super::data::TurretDefinition;
use crate::core::layers;

/// Spawn a turret body. Its brain is built on the next fixed step, once the
/// target is resolved: `target` injects it directly, otherwise the player
/// named in the definition's config is looked up.
pub fn spawn_turret(
    commands: &mut Commands,
    turret_type: &str,
    definition: &TurretDefinition,
    position: Vec2,
    target: Option<Entity>,
) -> Entity {
    let mut turret = commands.spawn((
        Turret,
        TurretType(turret_type.to_string()),
        Name::new(definition.name.clone()),
        definition.config.clone(),
        NeedsBrain,
        TurretPresentation::default(),
        Sprite::from_color(Color::srgb(0.3, 0.3, 0.35), Vec2::splat(definition.sprite_size)),
        Transform::from_translation(position.extend(0.0)),
        (
            RigidBody::Dynamic,
            GravityScale(0.0),
            LockedAxes::ROTATION_LOCKED,
            Velocity::zero(),
            Collider::ball(definition.collider_radius),
            ActiveEvents::COLLISION_EVENTS,
            layers::enemy_groups(),
        ),
    ));

    if let Some(target) = target {
        turret.insert(TurretTarget(target));
    }

    let entity = turret.id();
    info!("Spawned {} at ({}, {})", definition.name, position.x, position.y);
    entity
}
