//! Turret AI systems: brain setup, hit intake, and the fixed-step update.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::animation::TurretPresentation;
use super::components::{NeedsBrain, Turret, TurretConfig, TurretRng, TurretTarget, TurretType};
use super::error::TurretError;
use super::machine::{StepContext, TurretBrain};
use super::targeting::{RapierOcclusion, TargetSnapshot};
use crate::combat::{resolve_hit, PlayerBullet, Projectile, ShotSpawner};
use crate::core::{layers, TurretDestroyed};
use crate::player::{Player, PlayerCollider};

/// Find the player entity named `name`.
pub fn locate_target<'a, I>(name: &str, candidates: I) -> Result<Entity, TurretError>
where
    I: IntoIterator<Item = (Entity, &'a Name)>,
{
    candidates
        .into_iter()
        .find(|(_, candidate)| candidate.as_str() == name)
        .map(|(entity, _)| entity)
        .ok_or_else(|| TurretError::TargetNotFound(name.to_string()))
}

/// Resolve each new turret's target and give it a brain.
///
/// A turret whose target can't be resolved or whose config is invalid is
/// logged and left without a brain, so it never steps.
pub fn attach_turret_brains(
    mut commands: Commands,
    turrets: Query<(Entity, &TurretConfig, Option<&TurretTarget>), (With<Turret>, With<NeedsBrain>)>,
    players: Query<(Entity, &Name), With<Player>>,
) {
    for (entity, config, injected) in turrets.iter() {
        commands.entity(entity).remove::<NeedsBrain>();

        let target = match injected {
            Some(target) if players.contains(target.0) => Ok(target.0),
            Some(target) => Err(TurretError::TargetNotAPlayer(target.0)),
            None => locate_target(&config.target_name, players.iter()),
        };

        let built = target.and_then(|target| Ok((target, TurretBrain::new(config.clone())?)));

        match built {
            Ok((target, brain)) => {
                let seed = config.rng_seed.unwrap_or_else(|| entity.to_bits());
                commands
                    .entity(entity)
                    .insert((TurretTarget(target), brain, TurretRng::seeded(seed)));
                debug!("Turret {} tracking {}", entity, target);
            }
            Err(e) => error!("Turret {} disabled: {}", entity, e),
        }
    }
}

/// Feed player bullet contacts into the turrets they touched.
pub fn apply_turret_hits(
    mut collisions: EventReader<CollisionEvent>,
    mut turrets: Query<&mut TurretBrain>,
    bullets: Query<(Option<&Projectile>, &Transform), With<PlayerBullet>>,
) {
    for event in collisions.read() {
        let (a, b) = match event {
            CollisionEvent::Started(a, b, _) => (*a, *b),
            CollisionEvent::Stopped(..) => continue,
        };

        for (turret, other) in [(a, b), (b, a)] {
            let Ok(mut brain) = turrets.get_mut(turret) else {
                continue;
            };
            let Ok((projectile, transform)) = bullets.get(other) else {
                continue;
            };

            match resolve_hit(other, projectile, transform) {
                Ok(hit) => {
                    if brain.apply_hit(&hit) {
                        debug!(
                            "Turret {} hit for {} ({} hp left)",
                            turret,
                            hit.damage,
                            brain.hit_points()
                        );
                    }
                }
                Err(e) => error!("{}", e),
            }
        }
    }
}

/// Advance every turret by one fixed step.
///
/// A turret whose target is gone still steps so hitstun, braking and the
/// death check keep running; it just can't wake or shoot.
pub fn step_turrets(
    mut commands: Commands,
    time: Res<Time>,
    rapier_context: Query<&RapierContext>,
    targets: Query<(&Transform, Option<&PlayerCollider>), With<Player>>,
    mut turrets: Query<
        (
            Entity,
            &Transform,
            &TurretTarget,
            &mut TurretBrain,
            &mut TurretRng,
            &mut Velocity,
            &mut TurretPresentation,
        ),
        Without<Player>,
    >,
) {
    let context = rapier_context.get_single().ok();
    let is_player = |entity: Entity| targets.contains(entity);
    let dt = time.delta_secs();

    for (entity, transform, target, mut brain, mut rng, mut velocity, mut presentation) in
        turrets.iter_mut()
    {
        let snapshot = targets
            .get(target.0)
            .ok()
            .map(|(target_transform, collider)| TargetSnapshot {
                position: target_transform.translation.truncate(),
                collider_offset: collider.map_or(Vec2::ZERO, |c| c.offset),
                collider_size: collider.map_or(Vec2::ZERO, |c| c.size),
            });
        let occlusion = context
            .map(|context| RapierOcclusion::new(context, entity, layers::LINE_OF_SIGHT, is_player));

        let ctx = StepContext {
            dt,
            position: transform.translation.truncate(),
            target: snapshot,
            occlusion: &occlusion,
        };

        let mut linvel = velocity.linvel;
        let outcome = brain.step(ctx, &mut rng.0, &mut linvel);
        velocity.linvel = linvel;
        presentation.frame = outcome.presentation;

        if let Some(intent) = outcome.attack {
            debug!("Turret {} fires at {:.1} deg", entity, intent.aim_angle_degrees);
            let config = brain.config();
            intent.dispatch(&mut ShotSpawner {
                commands: &mut commands,
                speed: config.projectile_speed,
                lifetime: config.projectile_lifetime,
            });
        }
    }
}

/// Announce and despawn turrets whose hit points fell below zero.
pub fn remove_destroyed_turrets(
    mut commands: Commands,
    turrets: Query<(Entity, &Transform, &TurretType, &TurretBrain)>,
    mut destroyed: EventWriter<TurretDestroyed>,
) {
    for (entity, transform, turret_type, brain) in turrets.iter() {
        if !brain.is_destroyed() {
            continue;
        }

        info!("Turret {} ({}) destroyed", entity, turret_type.0);
        destroyed.send(TurretDestroyed {
            entity,
            position: transform.translation.truncate(),
        });
        commands.entity(entity).despawn_recursive();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::HitEvent;
    use crate::enemies::TurretState;
    use crate::player::PLAYER_NAME;
    use bevy_rapier2d::rapier::geometry::CollisionEventFlags;

    fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_event::<CollisionEvent>()
            .add_event::<TurretDestroyed>();
        app
    }

    fn spawn_turret_with_brain(app: &mut App, brain: TurretBrain, target: Entity) -> Entity {
        app.world_mut()
            .spawn((
                Turret,
                TurretType("turret".to_string()),
                Transform::default(),
                TurretTarget(target),
                brain,
                TurretRng::seeded(1),
                Velocity::zero(),
                TurretPresentation::default(),
            ))
            .id()
    }

    fn spawn_unbrained_turret(app: &mut App, target: Option<Entity>) -> Entity {
        let mut turret = app
            .world_mut()
            .spawn((Turret, TurretConfig::default(), NeedsBrain));
        if let Some(target) = target {
            turret.insert(TurretTarget(target));
        }
        turret.id()
    }

    #[test]
    fn locates_player_by_name() {
        let names = [
            (Entity::from_raw(1), Name::new("Crate")),
            (Entity::from_raw(2), Name::new("Dimwick")),
        ];
        let found = locate_target("Dimwick", names.iter().map(|(e, n)| (*e, n)));
        assert_eq!(found.ok(), Some(Entity::from_raw(2)));
    }

    #[test]
    fn missing_target_is_a_configuration_error() {
        let names = [(Entity::from_raw(1), Name::new("Crate"))];
        let result = locate_target("Dimwick", names.iter().map(|(e, n)| (*e, n)));
        assert!(matches!(result, Err(TurretError::TargetNotFound(name)) if name == "Dimwick"));
    }

    #[test]
    fn brain_attached_when_player_found_by_name() {
        let mut app = test_app();
        app.add_systems(Update, attach_turret_brains);
        let player = app
            .world_mut()
            .spawn((Player, Name::new(PLAYER_NAME)))
            .id();
        let turret = spawn_unbrained_turret(&mut app, None);

        app.update();

        let world = app.world();
        assert!(world.get::<TurretBrain>(turret).is_some());
        assert!(world.get::<TurretRng>(turret).is_some());
        assert_eq!(world.get::<TurretTarget>(turret).map(|t| t.0), Some(player));
        assert!(world.get::<NeedsBrain>(turret).is_none());
    }

    #[test]
    fn no_brain_without_a_player_to_track() {
        let mut app = test_app();
        app.add_systems(Update, attach_turret_brains);
        let turret = spawn_unbrained_turret(&mut app, None);

        app.update();

        assert!(app.world().get::<TurretBrain>(turret).is_none());
        assert!(app.world().get::<NeedsBrain>(turret).is_none());
    }

    #[test]
    fn no_brain_when_injected_target_is_not_a_player() {
        let mut app = test_app();
        app.add_systems(Update, attach_turret_brains);
        // right name, but not a player
        let decoy = app.world_mut().spawn(Name::new(PLAYER_NAME)).id();
        let turret = spawn_unbrained_turret(&mut app, Some(decoy));

        app.update();

        assert!(app.world().get::<TurretBrain>(turret).is_none());
    }

    #[test]
    fn bullet_without_payload_leaves_turret_untouched() {
        let mut app = test_app();
        app.add_systems(Update, apply_turret_hits);
        let brain = TurretBrain::new(TurretConfig::default()).expect("valid config");
        let turret = spawn_turret_with_brain(&mut app, brain, Entity::PLACEHOLDER);
        let bullet = app
            .world_mut()
            .spawn((PlayerBullet, Transform::default()))
            .id();

        app.world_mut().send_event(CollisionEvent::Started(
            bullet,
            turret,
            CollisionEventFlags::SENSOR,
        ));
        app.update();

        let brain = app.world().get::<TurretBrain>(turret).expect("turret alive");
        assert_eq!(brain.state(), TurretState::Sleeping);
        assert_eq!(brain.hit_points(), 5.0);
        assert_eq!(brain.target_velocity(), Vec2::ZERO);
    }

    #[test]
    fn bullet_hit_stuns_turret_in_either_order() {
        let mut app = test_app();
        app.add_systems(Update, apply_turret_hits);
        let brain = TurretBrain::new(TurretConfig::default()).expect("valid config");
        let turret = spawn_turret_with_brain(&mut app, brain, Entity::PLACEHOLDER);
        let bullet = app
            .world_mut()
            .spawn((
                PlayerBullet,
                Projectile {
                    damage: 2.0,
                    hitstun_time: 1.0,
                    knockback_speed: 4.0,
                },
                Transform::default(),
            ))
            .id();

        app.world_mut().send_event(CollisionEvent::Started(
            turret,
            bullet,
            CollisionEventFlags::SENSOR,
        ));
        app.update();

        let brain = app.world().get::<TurretBrain>(turret).expect("turret alive");
        assert_eq!(brain.state(), TurretState::Stunned);
        assert_eq!(brain.hit_points(), 3.0);
        assert!((brain.target_velocity().x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn lethally_hit_turret_is_destroyed_after_player_is_gone() {
        let mut app = test_app();
        app.add_systems(Update, (step_turrets, remove_destroyed_turrets).chain());

        let gone = app.world_mut().spawn(Player).id();
        app.world_mut().despawn(gone);

        let config = TurretConfig {
            max_hit_points: 1.0,
            ..default()
        };
        let mut brain = TurretBrain::new(config).expect("valid config");
        brain.apply_hit(&HitEvent {
            damage: 1.5,
            hitstun_duration: 1.0,
            knockback_speed: 4.0,
            bullet_facing_degrees: 0.0,
        });
        let turret = spawn_turret_with_brain(&mut app, brain, gone);

        app.update();

        assert!(app.world().get::<TurretBrain>(turret).is_none());
        let events = app.world().resource::<Events<TurretDestroyed>>();
        let sent: Vec<_> = events.iter_current_update_events().collect();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].entity, turret);
    }

    #[test]
    fn healthy_turret_survives_the_step() {
        let mut app = test_app();
        app.add_systems(Update, (step_turrets, remove_destroyed_turrets).chain());
        let player = app
            .world_mut()
            .spawn((Player, Transform::from_xyz(3.0, 0.0, 0.0)))
            .id();
        let brain = TurretBrain::new(TurretConfig::default()).expect("valid config");
        let turret = spawn_turret_with_brain(&mut app, brain, player);

        app.update();

        let brain = app.world().get::<TurretBrain>(turret).expect("turret alive");
        assert_eq!(brain.state(), TurretState::Active);
        let events = app.world().resource::<Events<TurretDestroyed>>();
        assert_eq!(events.iter_current_update_events().count(), 0);
    }
}
