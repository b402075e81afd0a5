//! Core game module - states, events, physics layers and smoothing helpers.
//!
//! This module provides the foundation that all other game systems build upon.

mod events;
pub mod layers;
mod plugin;
mod states;
mod tween;

pub use events::*;
pub use plugin::CorePlugin;
pub use states::*;
pub use tween::*;
