// Math utilities and helper functions

use glam::Vec2;

/// Unit step toward the sign of `value`: -1, 0 or +1
pub fn sign_step(value: f32) -> f32 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Per-axis unit step from `from` toward `to` (8-directional, not normalized)
pub fn step_toward(from: Vec2, to: Vec2) -> Vec2 {
    let delta = to - from;
    Vec2::new(sign_step(delta.x), sign_step(delta.y))
}

/// Check that both components of a vector are finite
pub fn is_finite_vec(v: Vec2) -> bool {
    v.x.is_finite() && v.y.is_finite()
}
