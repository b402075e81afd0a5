//! Collision groups shared by every physics body in the game.

use bevy_rapier2d::prelude::*;

pub const PLAYER: Group = Group::GROUP_1;
pub const TERRAIN: Group = Group::GROUP_2;
pub const ENEMY: Group = Group::GROUP_3;
pub const PLAYER_BULLET: Group = Group::GROUP_4;
pub const ENEMY_BULLET: Group = Group::GROUP_5;
pub const TRIGGER: Group = Group::GROUP_6;

/// Layers a turret's line-of-sight cast can be blocked by.
pub const LINE_OF_SIGHT: Group = PLAYER.union(TERRAIN);

/// Groups for a turret body: hit by player bullets, blocked by terrain.
pub fn enemy_groups() -> CollisionGroups {
    CollisionGroups::new(ENEMY, PLAYER.union(TERRAIN).union(PLAYER_BULLET))
}

/// Groups for shots fired by turrets.
pub fn enemy_bullet_groups() -> CollisionGroups {
    CollisionGroups::new(ENEMY_BULLET, PLAYER.union(TERRAIN))
}

/// Groups for the player body.
pub fn player_groups() -> CollisionGroups {
    CollisionGroups::new(
        PLAYER,
        TERRAIN.union(ENEMY).union(ENEMY_BULLET).union(TRIGGER),
    )
}

/// Groups for sensors that only care about the player entering them.
pub fn trigger_groups() -> CollisionGroups {
    CollisionGroups::new(TRIGGER, PLAYER)
}
