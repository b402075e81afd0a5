//! Generic "press E near it" interactables.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::{layers, Interacted};
use crate::player::Player;

/// Something the player can interact with while standing in its sensor.
#[derive(Component, Debug)]
pub struct Interactable {
    /// Child entity shown while interaction is possible
    pub indicator: Entity,
    in_range: bool,
}

impl Interactable {
    pub fn new(indicator: Entity) -> Self {
        Self {
            indicator,
            in_range: false,
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.in_range
    }

    pub fn player_entered(&mut self) {
        self.in_range = true;
    }

    pub fn player_left(&mut self) {
        self.in_range = false;
    }

    /// Whether an interact press this frame should fire.
    pub fn should_fire(&self, pressed: bool) -> bool {
        self.in_range && pressed
    }
}

/// Key that triggers interactions.
pub const INTERACT_KEY: KeyCode = KeyCode::KeyE;

/// Spawn an interactable sensor with a hidden indicator above it.
pub fn spawn_interactable(commands: &mut Commands, position: Vec2, half_extents: Vec2) -> Entity {
    let indicator = commands
        .spawn((
            Sprite::from_color(Color::srgb(1.0, 1.0, 0.6), Vec2::splat(0.3)),
            Transform::from_xyz(0.0, half_extents.y + 0.4, 1.0),
            Visibility::Hidden,
        ))
        .id();

    commands
        .spawn((
            Interactable::new(indicator),
            Name::new("Interactable"),
            Sprite::from_color(Color::srgb(0.5, 0.4, 0.25), half_extents * 2.0),
            Transform::from_translation(position.extend(0.0)),
            Collider::cuboid(half_extents.x, half_extents.y),
            Sensor,
            ActiveEvents::COLLISION_EVENTS,
            layers::trigger_groups(),
        ))
        .add_child(indicator)
        .id()
}

/// Track the player entering and leaving interactable sensors.
pub fn track_interaction_range(
    mut collisions: EventReader<CollisionEvent>,
    players: Query<(), With<Player>>,
    mut interactables: Query<&mut Interactable>,
) {
    for event in collisions.read() {
        let (a, b, entered) = match event {
            CollisionEvent::Started(a, b, _) => (*a, *b, true),
            CollisionEvent::Stopped(a, b, _) => (*a, *b, false),
        };

        for (zone, other) in [(a, b), (b, a)] {
            if !players.contains(other) {
                continue;
            }
            let Ok(mut interactable) = interactables.get_mut(zone) else {
                continue;
            };

            if entered {
                interactable.player_entered();
            } else {
                interactable.player_left();
            }
        }
    }
}

/// Show indicators and dispatch interaction presses.
pub fn update_interactables(
    keyboard: Res<ButtonInput<KeyCode>>,
    interactables: Query<(Entity, &Interactable)>,
    mut indicators: Query<&mut Visibility>,
    mut interacted: EventWriter<Interacted>,
) {
    let pressed = keyboard.just_pressed(INTERACT_KEY);

    for (entity, interactable) in interactables.iter() {
        if let Ok(mut visibility) = indicators.get_mut(interactable.indicator) {
            *visibility = if interactable.is_interactive() {
                Visibility::Inherited
            } else {
                Visibility::Hidden
            };
        }

        if interactable.should_fire(pressed) {
            interacted.send(Interacted {
                interactable: entity,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_fires_while_player_in_range() {
        let mut interactable = Interactable::new(Entity::from_raw(9));
        assert!(!interactable.should_fire(true));

        interactable.player_entered();
        assert!(interactable.is_interactive());
        assert!(interactable.should_fire(true));
        assert!(!interactable.should_fire(false));

        interactable.player_left();
        assert!(!interactable.should_fire(true));
    }
}
