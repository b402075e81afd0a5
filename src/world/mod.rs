//! World module - demo arena and interactables.

mod interactable;
mod plugin;

pub use interactable::{spawn_interactable, Interactable, INTERACT_KEY};
pub use plugin::{setup_arena, WorldPlugin};
