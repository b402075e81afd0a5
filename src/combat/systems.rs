//! Combat systems - hit resolution and shot lifetime.

use bevy::prelude::*;

use super::components::*;
use crate::core::{GameState, PlayState};
use crate::enemies::TurretError;

/// Configure combat systems.
pub fn setup_combat_systems(app: &mut App) {
    app.add_systems(
        FixedUpdate,
        expire_turret_shots
            .run_if(in_state(GameState::InGame))
            .run_if(in_state(PlayState::Running)),
    );
}

/// Build a [`HitEvent`] from a player bullet that touched `victim`.
///
/// A tagged bullet without projectile data is an invalid collision: the
/// caller logs it and leaves the victim untouched.
pub fn resolve_hit(
    bullet: Entity,
    projectile: Option<&Projectile>,
    bullet_transform: &Transform,
) -> Result<HitEvent, TurretError> {
    let projectile = projectile.ok_or(TurretError::InvalidCollision(bullet))?;

    Ok(HitEvent {
        damage: projectile.damage,
        hitstun_duration: projectile.hitstun_time,
        knockback_speed: projectile.knockback_speed,
        bullet_facing_degrees: facing_degrees(bullet_transform),
    })
}

/// Rotation of a transform around z, in degrees.
pub fn facing_degrees(transform: &Transform) -> f32 {
    let (_, _, z) = transform.rotation.to_euler(EulerRot::XYZ);
    z.to_degrees()
}

/// Despawn turret shots whose lifetime ran out.
fn expire_turret_shots(
    mut commands: Commands,
    time: Res<Time>,
    mut shots: Query<(Entity, &mut TurretShot)>,
) {
    for (entity, mut shot) in shots.iter_mut() {
        shot.lifetime.tick(time.delta());
        if shot.lifetime.finished() {
            commands.entity(entity).despawn_recursive();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_projectile_payload() {
        let projectile = Projectile {
            damage: 2.0,
            hitstun_time: 1.0,
            knockback_speed: 4.0,
        };
        let transform = Transform::from_rotation(Quat::from_rotation_z(180f32.to_radians()));
        let hit = resolve_hit(Entity::from_raw(3), Some(&projectile), &transform)
            .expect("projectile data present");

        assert_eq!(hit.damage, 2.0);
        assert_eq!(hit.hitstun_duration, 1.0);
        assert_eq!(hit.knockback_speed, 4.0);
        assert!((hit.bullet_facing_degrees.abs() - 180.0).abs() < 1e-3);
    }

    #[test]
    fn missing_projectile_is_invalid_collision() {
        let bullet = Entity::from_raw(5);
        let result = resolve_hit(bullet, None, &Transform::default());
        assert!(matches!(result, Err(TurretError::InvalidCollision(e)) if e == bullet));
    }

    #[test]
    fn facing_reads_z_rotation() {
        let transform = Transform::from_rotation(Quat::from_rotation_z(30f32.to_radians()));
        assert!((facing_degrees(&transform) - 30.0).abs() < 1e-3);
    }
}
