//! Player module - the entity turrets track and the camera follows.
//!
//! Movement and shooting input live outside this crate; the player here is
//! a physics body with the metadata other systems read.

mod components;
mod spawning;

pub use components::*;
pub use spawning::{spawn_player, PLAYER_NAME};
