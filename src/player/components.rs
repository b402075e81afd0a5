//! Player-related components.

use bevy::prelude::*;

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

/// Collider metadata turrets read when aiming at the player.
#[derive(Component, Clone, Copy, Debug)]
pub struct PlayerCollider {
    /// Collider center relative to the player's position
    pub offset: Vec2,
    /// Full width and height of the collider
    pub size: Vec2,
}

impl PlayerCollider {
    /// Metadata for a vertical capsule built with `Collider::capsule_y`.
    pub fn capsule(offset: Vec2, half_height: f32, radius: f32) -> Self {
        Self {
            offset,
            size: Vec2::new(radius * 2.0, (half_height + radius) * 2.0),
        }
    }
}

/// Points the follow camera tracks, relative to the player's position.
#[derive(Component, Clone, Copy, Debug)]
pub struct FocusPoints {
    /// Where the camera centers when the cursor is idle
    pub focus: Vec2,
    /// Pivot the cursor look-ahead is measured from
    pub aim_pivot: Vec2,
}

impl Default for FocusPoints {
    fn default() -> Self {
        Self {
            focus: Vec2::new(0.0, 0.5),
            aim_pivot: Vec2::new(0.0, 0.3),
        }
    }
}

impl FocusPoints {
    pub fn focus_position(&self, player: Vec2) -> Vec2 {
        player + self.focus
    }

    pub fn aim_pivot_position(&self, player: Vec2) -> Vec2 {
        player + self.aim_pivot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capsule_size_covers_caps() {
        let collider = PlayerCollider::capsule(Vec2::ZERO, 0.5, 0.3);
        assert!((collider.size.x - 0.6).abs() < 1e-6);
        assert!((collider.size.y - 1.6).abs() < 1e-6);
    }
}
