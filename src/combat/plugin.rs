//! Combat plugin - projectile hits and turret shots.

use bevy::prelude::*;

use super::systems;

/// Combat plugin - handles shot lifetime. Hit application happens in the
/// turret step so it shares the turret's fixed tick.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        systems::setup_combat_systems(app);
    }
}
