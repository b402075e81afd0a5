//! Combat-related components and hit payloads.

use bevy::prelude::*;

/// Tag for projectiles fired by the player. Turrets treat any contact with
/// a tagged entity as an incoming hit.
#[derive(Component)]
pub struct PlayerBullet;

/// Hit payload carried by a player projectile.
#[derive(Component, Clone, Copy, Debug)]
pub struct Projectile {
    pub damage: f32,
    /// Seconds the victim stays stunned
    pub hitstun_time: f32,
    pub knockback_speed: f32,
}

impl Default for Projectile {
    fn default() -> Self {
        Self {
            damage: 1.0,
            hitstun_time: 0.3,
            knockback_speed: 4.0,
        }
    }
}

/// Shot fired by a turret; despawned when its lifetime runs out.
#[derive(Component)]
pub struct TurretShot {
    pub lifetime: Timer,
}

/// A resolved projectile hit, consumed once by the victim.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitEvent {
    pub damage: f32,
    pub hitstun_duration: f32,
    pub knockback_speed: f32,
    /// Rotation of the bullet around z at impact, in degrees
    pub bullet_facing_degrees: f32,
}

impl HitEvent {
    /// Knockback impulse after the victim's reduction is applied.
    pub fn knockback(&self, reduction_factor: f32) -> Vec2 {
        Vec2::from_angle(self.bullet_facing_degrees.to_radians())
            * self.knockback_speed
            * (1.0 - reduction_factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn knockback_follows_bullet_facing() {
        let hit = HitEvent {
            damage: 1.0,
            hitstun_duration: 0.5,
            knockback_speed: 4.0,
            bullet_facing_degrees: 90.0,
        };
        let k = hit.knockback(0.75);
        assert!(k.x.abs() < 1e-5);
        assert!((k.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn full_reduction_cancels_knockback() {
        let hit = HitEvent {
            damage: 1.0,
            hitstun_duration: 0.5,
            knockback_speed: 4.0,
            bullet_facing_degrees: 30.0,
        };
        assert_eq!(hit.knockback(1.0), Vec2::ZERO);
    }
}
