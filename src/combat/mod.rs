//! Combat module - projectile payloads, hit resolution, and turret shots.

mod components;
mod plugin;
mod projectile;
mod systems;

pub use components::*;
pub use plugin::CombatPlugin;
pub use projectile::{AttackIntent, ProjectileFactory, ShotSpawner};
pub use systems::{facing_degrees, resolve_hit};
