//! Facing-angle smoothing.

use glam::Vec2;

/// Velocities shorter than this keep the current facing.
const MIN_HEADING_SPEED: f32 = 1e-3;

/// Wraps an angle difference into `[-180, 180]` degrees.
pub fn normalize_delta(delta: f32) -> f32 {
    let wrapped = (delta + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 && delta > 0.0 { 180.0 } else { wrapped }
}

/// Eases `facing` toward the heading of `velocity` by `smoothing` of the gap.
pub fn smooth_facing(facing: f32, velocity: Vec2, smoothing: f32) -> f32 {
    if velocity.length_squared() < MIN_HEADING_SPEED * MIN_HEADING_SPEED {
        return facing;
    }
    let target = velocity.y.atan2(velocity.x).to_degrees();
    let delta = normalize_delta(target - facing);
    normalize_delta(facing + delta * smoothing)
}
