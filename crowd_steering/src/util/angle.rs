use std::f64::consts::{PI, TAU};

use crate::Vec2f;

/// Wraps an angle in radians into `(-PI, PI]`.
///
/// The result is congruent to `angle` modulo `2 * PI`, and the function is
/// idempotent. Non-finite input is returned unchanged.
pub fn normalize_angle(angle: f64) -> f64 {
    if !angle.is_finite() {
        return angle;
    }
    let mut wrapped = angle % TAU;
    if wrapped > PI {
        wrapped -= TAU;
    } else if wrapped <= -PI {
        wrapped += TAU;
    }
    // Rounding in the subtraction above can land exactly on -PI.
    if wrapped <= -PI {
        wrapped = PI;
    }
    wrapped
}

/// Unit vector pointing along `orientation`.
///
/// Orientations use screen space: y grows downward, so a positive angle
/// turns counter-clockwise on screen.
pub fn orientation_to_vector(orientation: f64) -> Vec2f {
    Vec2f::new(orientation.cos(), -orientation.sin())
}

/// Orientation of `direction` in screen space, in `(-PI, PI]`. The zero
/// vector maps to 0.
pub fn vector_to_orientation(direction: &Vec2f) -> f64 {
    // atan2 can return -PI for a negative zero y.
    normalize_angle((-direction.y).atan2(direction.x))
}

/// Orientation facing along `velocity`, or `current` if the agent is not
/// moving.
pub fn new_orientation(current: f64, velocity: &Vec2f) -> f64 {
    if velocity.norm_squared() > 0f64 {
        vector_to_orientation(velocity)
    } else {
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_normalize_angle_range() {
        let samples = [
            0f64, 1f64, -1f64, PI, -PI, 3f64 * PI, -3f64 * PI, 7.5f64, -7.5f64, 1000.25f64,
            -1000.25f64, TAU, -TAU, 1e-12f64,
        ];
        for angle in samples {
            let wrapped = normalize_angle(angle);
            assert!(wrapped > -PI && wrapped <= PI, "{angle} -> {wrapped}");
            let diff = (wrapped - angle).rem_euclid(TAU);
            assert!(diff < 1e-9 || TAU - diff < 1e-9, "{angle} -> {wrapped}");
        }
    }

    #[test]
    fn test_normalize_angle_idempotent() {
        for i in -200..200 {
            let angle = i as f64 * 0.173f64;
            let once = normalize_angle(angle);
            assert_eq!(normalize_angle(once), once);
        }
    }

    #[test]
    fn test_normalize_angle_boundaries() {
        assert_eq!(normalize_angle(PI), PI);
        assert_eq!(normalize_angle(-PI), PI);
        assert_eq!(normalize_angle(0f64), 0f64);
        assert_abs_diff_eq!(normalize_angle(1.5f64 * PI), -0.5f64 * PI, epsilon = 1e-12);
    }

    #[test]
    fn test_orientation_screen_space() {
        // Facing "up" on screen is negative y.
        let up = orientation_to_vector(PI / 2f64);
        assert_abs_diff_eq!(up.x, 0f64, epsilon = 1e-12);
        assert_abs_diff_eq!(up.y, -1f64, epsilon = 1e-12);

        assert_abs_diff_eq!(vector_to_orientation(&up), PI / 2f64, epsilon = 1e-12);
        assert_eq!(new_orientation(0.3f64, &Vec2f::zeros()), 0.3f64);
        assert_eq!(vector_to_orientation(&Vec2f::new(-1f64, 0f64)), PI);
    }
}
