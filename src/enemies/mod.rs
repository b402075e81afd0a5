//! Turrets module - stationary enemies, their state machine, and spawning.

mod ai;
pub mod animation;
mod components;
pub mod data;
mod error;
pub mod machine;
mod plugin;
mod spawning;
pub mod targeting;


pub use ai::locate_target;
pub use animation::TurretPresentation;
pub use components::*;
pub use data::{TurretDefinition, TurretRegistry};
pub use error::{DataLoadError, TurretError};
pub use machine::{PresentationFrame, StepContext, StepOutcome, TurretBrain};
pub use plugin::{TurretPlugin, TurretSet};
pub use spawning::spawn_turret;
