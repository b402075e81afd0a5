//! Turret state machine and combat clock.
//!
//! [`TurretBrain`] is plain data driven once per fixed step. Physics, the
//! projectile factory and the animation sink stay outside; the brain only
//! sees them through [`StepContext`], [`OcclusionQuery`] and the returned
//! [`StepOutcome`].

use bevy::prelude::*;
use rand::Rng;

use super::components::{TurretConfig, TurretState};
use super::error::TurretError;
use super::targeting::{has_line_of_sight, OcclusionQuery, TargetSnapshot};
use crate::combat::{AttackIntent, HitEvent};
use crate::core::smooth_toward;

/// Flags handed to the animation sink every step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PresentationFrame {
    pub sleeping: bool,
    pub stunned: bool,
    /// Raised only on the step an attack fired
    pub attack: bool,
}

/// Entry/exit effects for one state.
struct StateHooks {
    enter: fn(&mut PresentationFrame),
    exit: fn(&mut PresentationFrame),
}

impl TurretState {
    fn hooks(self) -> StateHooks {
        match self {
            TurretState::Sleeping => StateHooks {
                enter: |frame| frame.sleeping = true,
                exit: |frame| frame.sleeping = false,
            },
            TurretState::Active => StateHooks {
                enter: |_| {},
                exit: |_| {},
            },
            TurretState::Stunned => StateHooks {
                enter: |frame| frame.stunned = true,
                exit: |frame| frame.stunned = false,
            },
        }
    }
}

/// Everything a turret reads from the world for one step.
pub struct StepContext<'a, Q: ?Sized> {
    /// Elapsed simulation time for this step, in seconds
    pub dt: f32,
    pub position: Vec2,
    /// `None` once the tracked entity is gone; timers and death still advance
    pub target: Option<TargetSnapshot>,
    pub occlusion: &'a Q,
}

/// What a step produced for the outside world.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepOutcome {
    pub attack: Option<AttackIntent>,
    pub presentation: PresentationFrame,
    /// Set once hit points fell below zero; the owner despawns the turret
    pub destroyed: bool,
}

/// A `Sleeping -> Active -> Stunned` turret with its timers.
#[derive(Component, Debug, Clone)]
pub struct TurretBrain {
    config: TurretConfig,
    state: TurretState,
    previous: Option<TurretState>,
    hit_points: f32,
    attack_cooldown_remaining: f32,
    hitstun_remaining: f32,
    target_velocity: Vec2,
    flags: PresentationFrame,
    destroyed: bool,
    #[cfg(test)]
    pub(crate) hook_log: Vec<HookRun>,
}

/// One hook invocation, recorded so tests can count them.
#[cfg(test)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum HookRun {
    Exit(TurretState),
    Enter(TurretState),
}

impl TurretBrain {
    /// Build a sleeping turret at full health.
    pub fn new(config: TurretConfig) -> Result<Self, TurretError> {
        config.validate()?;

        Ok(Self {
            hit_points: config.max_hit_points,
            config,
            state: TurretState::Sleeping,
            previous: None,
            attack_cooldown_remaining: 0.0,
            hitstun_remaining: 0.0,
            target_velocity: Vec2::ZERO,
            flags: PresentationFrame {
                sleeping: true,
                ..default()
            },
            destroyed: false,
            #[cfg(test)]
            hook_log: Vec::new(),
        })
    }

    pub fn state(&self) -> TurretState {
        self.state
    }

    pub fn previous_state(&self) -> Option<TurretState> {
        self.previous
    }

    pub fn config(&self) -> &TurretConfig {
        &self.config
    }

    pub fn hit_points(&self) -> f32 {
        self.hit_points
    }

    pub fn attack_cooldown_remaining(&self) -> f32 {
        self.attack_cooldown_remaining
    }

    pub fn hitstun_remaining(&self) -> f32 {
        self.hitstun_remaining
    }

    /// Velocity the physics body is being pulled toward.
    pub fn target_velocity(&self) -> Vec2 {
        self.target_velocity
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Run exit effects of the current state, switch, then run entry effects
    /// of `next`. Self-transitions run both.
    pub fn transition_to(&mut self, next: TurretState) {
        let from = self.state;
        (from.hooks().exit)(&mut self.flags);
        #[cfg(test)]
        self.hook_log.push(HookRun::Exit(from));

        self.previous = Some(from);
        self.state = next;

        (next.hooks().enter)(&mut self.flags);
        #[cfg(test)]
        self.hook_log.push(HookRun::Enter(next));

        debug!("Turret {:?} -> {:?}", from, next);
    }

    /// Apply a projectile hit: stun (restarting any current stun), take
    /// damage, overwrite hitstun and add knockback to the target velocity.
    ///
    /// Returns `false` if the turret is already destroyed.
    pub fn apply_hit(&mut self, hit: &HitEvent) -> bool {
        if self.destroyed {
            return false;
        }

        self.transition_to(TurretState::Stunned);
        self.hit_points -= hit.damage;
        self.hitstun_remaining = hit.hitstun_duration;
        self.target_velocity += hit.knockback(self.config.knockback_reduction_factor);

        true
    }

    /// Advance one simulation step.
    ///
    /// `velocity` is the physics body's current linear velocity and is
    /// smoothed in place while the turret is awake. Without a target the
    /// turret can neither wake nor attack, but hitstun and death still run.
    pub fn step<Q, R>(
        &mut self,
        ctx: StepContext<'_, Q>,
        rng: &mut R,
        velocity: &mut Vec2,
    ) -> StepOutcome
    where
        Q: OcclusionQuery + ?Sized,
        R: Rng + ?Sized,
    {
        if self.destroyed {
            return self.outcome(None, false);
        }

        let mut attack = None;

        match self.state {
            TurretState::Sleeping => {
                let in_range = ctx.target.is_some_and(|target| {
                    ctx.position.distance(target.position) < self.config.wakeup_radius
                });
                if in_range {
                    self.transition_to(TurretState::Active);
                }
            }
            TurretState::Active => {
                // turrets hold position on their own
                self.target_velocity = Vec2::ZERO;
                self.smooth_velocity(velocity, ctx.dt);
                attack = self.gate_attack(&ctx, rng);
            }
            TurretState::Stunned => {
                self.smooth_velocity(velocity, ctx.dt);
                self.hitstun_remaining -= ctx.dt;
                if self.hitstun_remaining < 0.0 {
                    self.transition_to(TurretState::Active);
                }
            }
        }

        if self.hit_points < 0.0 {
            self.destroyed = true;
        }

        let fired = attack.is_some();
        self.outcome(attack, fired)
    }

    fn smooth_velocity(&self, velocity: &mut Vec2, dt: f32) {
        *velocity = smooth_toward(
            *velocity,
            self.target_velocity,
            self.config.movement_sharpness,
            dt,
        );
    }

    fn gate_attack<Q, R>(&mut self, ctx: &StepContext<'_, Q>, rng: &mut R) -> Option<AttackIntent>
    where
        Q: OcclusionQuery + ?Sized,
        R: Rng + ?Sized,
    {
        if self.attack_cooldown_remaining > 0.0 {
            self.attack_cooldown_remaining = (self.attack_cooldown_remaining - ctx.dt).max(0.0);
            return None;
        }

        let target = ctx.target?;
        let visible = has_line_of_sight(
            ctx.position,
            &target,
            self.config.raycast_radius,
            self.config.raycast_range,
            ctx.occlusion,
        );
        if !visible {
            return None;
        }

        let intent = AttackIntent::aimed(
            ctx.position,
            target.position,
            self.config.spread_angle,
            rng,
        );
        self.attack_cooldown_remaining = self.config.attack_cooldown;

        Some(intent)
    }

    fn outcome(&self, attack: Option<AttackIntent>, fired: bool) -> StepOutcome {
        StepOutcome {
            attack,
            presentation: PresentationFrame {
                attack: fired,
                ..self.flags
            },
            destroyed: self.destroyed,
        }
    }
}
