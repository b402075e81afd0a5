//! World plugin - arena setup and interactables.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::interactable::{spawn_interactable, track_interaction_range, update_interactables};
use crate::core::{layers, GameState, Interacted};
use crate::enemies::{spawn_turret, TurretDefinition, TurretRegistry};
use crate::player::spawn_player;

/// Turret type spawned into the arena.
const ARENA_TURRET: &str = "turret";

const MOUNTED_TURRET: Vec2 = Vec2::new(2.0, 2.0);

/// World plugin - handles the demo arena and interactables.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::InGame), setup_arena)
            .add_systems(
                Update,
                (track_interaction_range, update_interactables, log_interactions)
                    .chain()
                    .run_if(in_state(GameState::InGame)),
            );
    }
}

/// Build the arena: floor, player, three turrets, and a signpost.
///
/// The mounted turret is close enough to shoot. The second one wakes but is
/// out of line-of-sight range, and the far one never wakes.
pub fn setup_arena(mut commands: Commands, registry: Res<TurretRegistry>) {
    commands.spawn((
        Name::new("Floor"),
        Sprite::from_color(Color::srgb(0.15, 0.15, 0.2), Vec2::new(40.0, 1.0)),
        Transform::from_xyz(0.0, -1.5, -1.0),
        RigidBody::Fixed,
        Collider::cuboid(20.0, 0.5),
        CollisionGroups::new(layers::TERRAIN, Group::ALL),
    ));

    let player = spawn_player(&mut commands, Vec2::ZERO);

    let fallback = TurretDefinition::default();
    let definition = registry.get(ARENA_TURRET).unwrap_or_else(|| {
        warn!("No '{}' turret definition, using defaults", ARENA_TURRET);
        &fallback
    });

    // mounted above the player so its cast sweeps through the body
    spawn_turret(&mut commands, ARENA_TURRET, definition, MOUNTED_TURRET, Some(player));
    spawn_turret(&mut commands, ARENA_TURRET, definition, Vec2::new(-8.0, 2.0), None);
    spawn_turret(&mut commands, ARENA_TURRET, definition, Vec2::new(12.0, 0.0), None);

    spawn_interactable(&mut commands, Vec2::new(-3.0, -0.5), Vec2::new(0.5, 0.5));
}

fn log_interactions(mut interacted: EventReader<Interacted>) {
    for event in interacted.read() {
        info!("Interacted with {}", event.interactable);
    }
}
