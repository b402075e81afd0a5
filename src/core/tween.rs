//! Frame-rate independent exponential smoothing.

use bevy::prelude::*;

/// Fraction of the remaining distance to cover this step.
///
/// Applying `1 - exp(-sharpness * dt)` twice with `dt / 2` lands on the same
/// value as applying it once with `dt`.
pub fn smoothing_factor(sharpness: f32, dt: f32) -> f32 {
    1.0 - (-sharpness * dt).exp()
}

/// Move `current` toward `target` by exponential decay with rate `sharpness`.
pub fn smooth_toward(current: Vec2, target: Vec2, sharpness: f32, dt: f32) -> Vec2 {
    current.lerp(target, smoothing_factor(sharpness, dt))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_dt_does_not_move() {
        let v = smooth_toward(Vec2::new(3.0, -2.0), Vec2::ZERO, 10.0, 0.0);
        assert_eq!(v, Vec2::new(3.0, -2.0));
    }

    #[test]
    fn long_step_converges() {
        let v = smooth_toward(Vec2::new(3.0, -2.0), Vec2::ONE, 10.0, 10.0);
        assert!(v.distance(Vec2::ONE) < 1e-4);
    }

    #[test]
    fn split_steps_match_single_step() {
        let start = Vec2::new(4.0, 0.0);
        let once = smooth_toward(start, Vec2::ZERO, 10.0, 0.1);
        let half = smooth_toward(start, Vec2::ZERO, 10.0, 0.05);
        let twice = smooth_toward(half, Vec2::ZERO, 10.0, 0.05);
        assert!(once.distance(twice) < 1e-5);
    }
}
