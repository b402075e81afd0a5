//! Global events used for cross-system communication.

use bevy::prelude::*;

/// Sent when a turret's hit points drop below zero, right before it is despawned.
#[derive(Event, Debug, Clone, Copy)]
pub struct TurretDestroyed {
    /// The turret entity being removed
    pub entity: Entity,
    /// Where it was when it died
    pub position: Vec2,
}

/// Sent when the player activates an interactable.
///
/// Listeners own the actual interaction (opening a door, reading a sign,
/// despawning the interactable, ...).
#[derive(Event, Debug, Clone, Copy)]
pub struct Interacted {
    /// The interactable entity
    pub interactable: Entity,
}
