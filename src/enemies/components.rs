//! Turret-related components.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;

use super::error::TurretError;
use crate::player::PLAYER_NAME;

/// Marker component for all turrets.
#[derive(Component)]
pub struct Turret;

/// Turret type identifier (matches RON file name).
#[derive(Component, Clone)]
pub struct TurretType(pub String);

/// Behaviour state of a turret.
#[derive(Default, PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub enum TurretState {
    /// Dormant until the target comes within the wake-up radius.
    #[default]
    Sleeping,
    /// Awake, holding position and shooting when it has line of sight.
    Active,
    /// Knocked back and unable to act until hitstun runs out.
    Stunned,
}

/// Per-turret tuning. Immutable once the turret's brain is built.
#[derive(Component, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct TurretConfig {
    /// Rate at which velocity converges to its target
    pub movement_sharpness: f32,
    /// Fraction of incoming knockback that is ignored (0.0 to 1.0)
    pub knockback_reduction_factor: f32,
    /// Radius of the line-of-sight circle cast
    pub raycast_radius: f32,
    /// Maximum distance of the line-of-sight circle cast
    pub raycast_range: f32,
    /// Seconds between attack attempts
    pub attack_cooldown: f32,
    /// Maximum random deviation of a shot, in degrees
    pub spread_angle: f32,
    pub max_hit_points: f32,
    /// Distance below which a sleeping turret wakes up
    pub wakeup_radius: f32,
    /// Name of the entity the turret tracks
    pub target_name: String,
    pub projectile_speed: f32,
    /// Seconds before a shot despawns
    pub projectile_lifetime: f32,
    /// Fixed seed for the spread RNG; derived from the entity when absent
    pub rng_seed: Option<u64>,
}

impl Default for TurretConfig {
    fn default() -> Self {
        Self {
            movement_sharpness: 10.0,
            knockback_reduction_factor: 0.75,
            raycast_radius: 0.5,
            raycast_range: 3.0,
            attack_cooldown: 5.0,
            spread_angle: 3.0,
            max_hit_points: 5.0,
            wakeup_radius: 10.0,
            target_name: PLAYER_NAME.to_string(),
            projectile_speed: 8.0,
            projectile_lifetime: 2.0,
            rng_seed: None,
        }
    }
}

impl TurretConfig {
    /// Reject values the state machine cannot run with.
    pub fn validate(&self) -> Result<(), TurretError> {
        let non_negative = [
            ("movement_sharpness", self.movement_sharpness),
            ("raycast_radius", self.raycast_radius),
            ("raycast_range", self.raycast_range),
            ("attack_cooldown", self.attack_cooldown),
            ("spread_angle", self.spread_angle),
            ("wakeup_radius", self.wakeup_radius),
            ("projectile_speed", self.projectile_speed),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(TurretError::InvalidConfig { field, value });
            }
        }

        let reduction = self.knockback_reduction_factor;
        if !(0.0..=1.0).contains(&reduction) {
            return Err(TurretError::InvalidConfig {
                field: "knockback_reduction_factor",
                value: reduction,
            });
        }

        for (field, value) in [
            ("max_hit_points", self.max_hit_points),
            ("projectile_lifetime", self.projectile_lifetime),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(TurretError::InvalidConfig { field, value });
            }
        }

        Ok(())
    }
}

/// Marker for turrets awaiting target lookup and brain construction.
#[derive(Component)]
pub struct NeedsBrain;

/// The entity a turret watches and shoots at.
#[derive(Component, Clone, Copy, Debug)]
pub struct TurretTarget(pub Entity);

/// Seedable random source used for shot spread.
#[derive(Component)]
pub struct TurretRng(pub ChaCha8Rng);

impl TurretRng {
    pub fn seeded(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}
