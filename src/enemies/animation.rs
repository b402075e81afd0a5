//! Turret presentation: maps the per-step flags onto the sprite.

use bevy::prelude::*;

use super::machine::PresentationFrame;

/// Presentation sink written by the turret step, read by the animation systems.
#[derive(Component, Default, Debug, Clone, Copy)]
pub struct TurretPresentation {
    pub frame: PresentationFrame,
}

/// Short muzzle flash started by an attack pulse.
#[derive(Component)]
pub struct AttackFlash(pub Timer);

const FLASH_SECONDS: f32 = 0.12;

/// Sprite tint for a presentation frame.
pub fn turret_tint(frame: PresentationFrame, flashing: bool) -> Color {
    if frame.sleeping {
        Color::srgb(0.3, 0.3, 0.35)
    } else if frame.stunned {
        Color::srgb(0.95, 0.95, 0.95)
    } else if flashing {
        Color::srgb(1.0, 0.8, 0.3)
    } else {
        Color::srgb(0.8, 0.2, 0.25)
    }
}

/// Starts a flash on the attack pulse. The pulse lasts a single step, so this
/// runs in the same fixed schedule as the turret step.
pub fn trigger_attack_flash(
    mut commands: Commands,
    query: Query<(Entity, &TurretPresentation), Changed<TurretPresentation>>,
) {
    for (entity, presentation) in query.iter() {
        if presentation.frame.attack {
            commands
                .entity(entity)
                .try_insert(AttackFlash(Timer::from_seconds(FLASH_SECONDS, TimerMode::Once)));
        }
    }
}

/// Tint turret sprites from their presentation state.
pub fn animate_turrets(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &TurretPresentation, &mut Sprite, Option<&mut AttackFlash>)>,
) {
    for (entity, presentation, mut sprite, flash) in query.iter_mut() {
        let flashing = match flash {
            Some(mut flash) => {
                flash.0.tick(time.delta());
                if flash.0.finished() {
                    commands.entity(entity).remove::<AttackFlash>();
                    false
                } else {
                    true
                }
            }
            None => false,
        };

        sprite.color = turret_tint(presentation.frame, flashing);
    }
}
