//! Line-of-sight checks between a turret and its target.

use bevy::prelude::*;
use bevy_rapier2d::parry::query::ShapeCastOptions;
use bevy_rapier2d::prelude::*;

/// What an occlusion query ran into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitTarget {
    Player(Entity),
    Other(Entity),
}

/// Nearest blocking contact reported by an occlusion query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OcclusionHit {
    pub target: HitTarget,
    pub distance: f32,
}

impl OcclusionHit {
    pub fn is_player(&self) -> bool {
        matches!(self.target, HitTarget::Player(_))
    }
}

/// Directional cast that reports the nearest blocking entity within a range.
///
/// `direction` is expected to be normalized.
pub trait OcclusionQuery {
    fn cast_circle(
        &self,
        origin: Vec2,
        radius: f32,
        direction: Vec2,
        max_range: f32,
    ) -> Option<OcclusionHit>;
}

/// No physics world to ask: nothing is ever visible.
impl<Q: OcclusionQuery> OcclusionQuery for Option<Q> {
    fn cast_circle(
        &self,
        origin: Vec2,
        radius: f32,
        direction: Vec2,
        max_range: f32,
    ) -> Option<OcclusionHit> {
        self.as_ref()?
            .cast_circle(origin, radius, direction, max_range)
    }
}

/// Read-only view of the tracked target for one step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TargetSnapshot {
    pub position: Vec2,
    /// Collider center relative to `position`
    pub collider_offset: Vec2,
    pub collider_size: Vec2,
}

impl TargetSnapshot {
    /// Target with a zero-sized collider centered on `position`.
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            collider_offset: Vec2::ZERO,
            collider_size: Vec2::ZERO,
        }
    }

    /// Point the line-of-sight cast is aimed at: the collider center pulled
    /// down by one full collider height, which lands below the target's feet.
    /// Casts from above the target sweep through its body on the way there.
    pub fn aim_point(&self) -> Vec2 {
        self.position + self.collider_offset - Vec2::Y * self.collider_size.y
    }
}

/// Whether a circle cast from `origin` toward the target's aim point touches
/// the player before anything else.
pub fn has_line_of_sight<Q: OcclusionQuery + ?Sized>(
    origin: Vec2,
    target: &TargetSnapshot,
    radius: f32,
    range: f32,
    occlusion: &Q,
) -> bool {
    let direction = (target.aim_point() - origin).normalize_or_zero();
    if direction == Vec2::ZERO {
        return false;
    }

    occlusion
        .cast_circle(origin, radius, direction, range)
        .is_some_and(|hit| hit.is_player())
}

/// Rapier-backed occlusion query.
pub struct RapierOcclusion<'a, F>
where
    F: Fn(Entity) -> bool,
{
    context: &'a RapierContext,
    filter: QueryFilter<'a>,
    is_player: F,
}

impl<'a, F> RapierOcclusion<'a, F>
where
    F: Fn(Entity) -> bool,
{
    /// Query that ignores `caster`'s own body and only sees `groups`.
    pub fn new(context: &'a RapierContext, caster: Entity, groups: Group, is_player: F) -> Self {
        let filter = QueryFilter::default()
            .exclude_rigid_body(caster)
            .exclude_collider(caster)
            .groups(CollisionGroups::new(Group::ALL, groups));

        Self {
            context,
            filter,
            is_player,
        }
    }
}

impl<F> OcclusionQuery for RapierOcclusion<'_, F>
where
    F: Fn(Entity) -> bool,
{
    fn cast_circle(
        &self,
        origin: Vec2,
        radius: f32,
        direction: Vec2,
        max_range: f32,
    ) -> Option<OcclusionHit> {
        let shape = Collider::ball(radius);
        let (entity, hit) = self.context.cast_shape(
            origin,
            0.0,
            direction,
            &shape,
            ShapeCastOptions::with_max_time_of_impact(max_range),
            self.filter,
        )?;

        let target = if (self.is_player)(entity) {
            HitTarget::Player(entity)
        } else {
            HitTarget::Other(entity)
        };

        Some(OcclusionHit {
            target,
            distance: hit.time_of_impact,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct FakeCast {
        hit: Option<OcclusionHit>,
        last_direction: Cell<Vec2>,
    }

    impl OcclusionQuery for FakeCast {
        fn cast_circle(&self, _: Vec2, _: f32, direction: Vec2, _: f32) -> Option<OcclusionHit> {
            self.last_direction.set(direction);
            self.hit
        }
    }

    fn fake(target: Option<HitTarget>) -> FakeCast {
        FakeCast {
            hit: target.map(|target| OcclusionHit {
                target,
                distance: 1.0,
            }),
            last_direction: Cell::new(Vec2::ZERO),
        }
    }

    #[test]
    fn aim_point_drops_one_collider_height() {
        let target = TargetSnapshot {
            position: Vec2::new(4.0, 2.0),
            collider_offset: Vec2::new(0.0, 0.5),
            collider_size: Vec2::new(0.6, 1.6),
        };
        let aim = target.aim_point();
        assert!((aim.x - 4.0).abs() < 1e-6);
        assert!((aim.y - 0.9).abs() < 1e-6);
    }

    #[test]
    fn player_hit_is_line_of_sight() {
        let p = fake(Some(HitTarget::Player(Entity::from_raw(1))));
        let target = TargetSnapshot::at(Vec2::new(2.0, 0.0));
        assert!(has_line_of_sight(Vec2::ZERO, &target, 0.5, 3.0, &p));
        assert_eq!(p.last_direction.get(), Vec2::X);
    }

    #[test]
    fn obstacle_and_miss_block() {
        let target = TargetSnapshot::at(Vec2::new(2.0, 0.0));
        for hit in [Some(HitTarget::Other(Entity::from_raw(7))), None] {
            assert!(!has_line_of_sight(Vec2::ZERO, &target, 0.5, 3.0, &fake(hit)));
        }
    }

    #[test]
    fn missing_physics_world_sees_nothing() {
        let target = TargetSnapshot::at(Vec2::new(2.0, 0.0));
        let absent: Option<FakeCast> = None;
        assert!(!has_line_of_sight(Vec2::ZERO, &target, 0.5, 3.0, &absent));

        let present = Some(fake(Some(HitTarget::Player(Entity::from_raw(1)))));
        assert!(has_line_of_sight(Vec2::ZERO, &target, 0.5, 3.0, &present));
    }

    #[test]
    fn target_on_top_of_turret_has_no_direction() {
        let p = fake(Some(HitTarget::Player(Entity::from_raw(1))));
        assert!(!has_line_of_sight(Vec2::ONE, &TargetSnapshot::at(Vec2::ONE), 0.5, 3.0, &p));
    }
}
