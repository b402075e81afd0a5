//! Turning an attack decision into a projectile in the world.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use rand::Rng;

use super::components::TurretShot;
use crate::core::layers;

/// Where and in which direction a turret fires.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttackIntent {
    pub spawn_position: Vec2,
    /// Angle from +x, counter-clockwise, including spread
    pub aim_angle_degrees: f32,
}

impl AttackIntent {
    /// Aim from `origin` at `target`, jittered uniformly within `±spread_degrees`.
    pub fn aimed<R: Rng + ?Sized>(
        origin: Vec2,
        target: Vec2,
        spread_degrees: f32,
        rng: &mut R,
    ) -> Self {
        let to_target = target - origin;
        let base = to_target.y.atan2(to_target.x).to_degrees();
        let jitter = rng.gen_range(-spread_degrees..=spread_degrees);

        Self {
            spawn_position: origin,
            aim_angle_degrees: base + jitter,
        }
    }

    /// Hand the intent to a projectile factory.
    pub fn dispatch<F: ProjectileFactory + ?Sized>(self, factory: &mut F) {
        factory.spawn_projectile(self.spawn_position, self.aim_angle_degrees);
    }
}

/// Fire-and-forget projectile creation.
pub trait ProjectileFactory {
    fn spawn_projectile(&mut self, position: Vec2, angle_degrees: f32);
}

/// Spawns turret shots through `Commands`.
pub struct ShotSpawner<'a, 'w, 's> {
    pub commands: &'a mut Commands<'w, 's>,
    pub speed: f32,
    pub lifetime: f32,
}

impl ProjectileFactory for ShotSpawner<'_, '_, '_> {
    fn spawn_projectile(&mut self, position: Vec2, angle_degrees: f32) {
        let radians = angle_degrees.to_radians();

        self.commands.spawn((
            TurretShot {
                lifetime: Timer::from_seconds(self.lifetime, TimerMode::Once),
            },
            Name::new("Turret Shot"),
            Sprite::from_color(Color::srgb(1.0, 0.55, 0.2), Vec2::splat(0.25)),
            Transform::from_translation(position.extend(1.0))
                .with_rotation(Quat::from_rotation_z(radians)),
            RigidBody::KinematicVelocityBased,
            Velocity::linear(Vec2::from_angle(radians) * self.speed),
            Collider::ball(0.125),
            Sensor,
            ActiveEvents::COLLISION_EVENTS,
            ActiveCollisionTypes::default() | ActiveCollisionTypes::KINEMATIC_KINEMATIC,
            layers::enemy_bullet_groups(),
        ));
    }
}
