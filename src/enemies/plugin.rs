//! Turret plugin - registers all turret systems.

use bevy::prelude::*;

use super::ai;
use super::animation;
use super::data::{load_turret_definitions, TurretRegistry};
use crate::core::{GameState, PlayState};

/// Ordering for the turret fixed step.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum TurretSet {
    /// Target lookup for newly spawned turrets
    Setup,
    /// Contacts from the previous physics step
    Hits,
    /// State machine update, attacks, and death
    Step,
    /// Presentation pulses
    Feedback,
}

/// Turret plugin - handles turret data, AI, hits, death, and sprites.
pub struct TurretPlugin;

impl Plugin for TurretPlugin {
    fn build(&self, app: &mut App) {
        app
            .init_resource::<TurretRegistry>()
            .add_systems(Startup, load_turret_definitions)
            .configure_sets(
                FixedUpdate,
                (
                    TurretSet::Setup,
                    TurretSet::Hits,
                    TurretSet::Step,
                    TurretSet::Feedback,
                )
                    .chain()
                    .run_if(in_state(GameState::InGame))
                    .run_if(in_state(PlayState::Running)),
            )
            .add_systems(FixedUpdate, ai::attach_turret_brains.in_set(TurretSet::Setup))
            .add_systems(FixedUpdate, ai::apply_turret_hits.in_set(TurretSet::Hits))
            .add_systems(
                FixedUpdate,
                (ai::step_turrets, ai::remove_destroyed_turrets)
                    .chain()
                    .in_set(TurretSet::Step),
            )
            .add_systems(
                FixedUpdate,
                animation::trigger_attack_flash.in_set(TurretSet::Feedback),
            )
            .add_systems(
                Update,
                animation::animate_turrets.run_if(in_state(GameState::InGame)),
            );
    }
}
