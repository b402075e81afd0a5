//! Camera module - 2D follow camera.

mod follow;
mod plugin;

pub use follow::{CursorWorld, FollowCamera};
pub use plugin::CameraPlugin;
