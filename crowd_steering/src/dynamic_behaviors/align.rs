use std::f64::consts::PI;

use log::trace;

use crate::error::{require_non_negative, require_positive, SteeringResult};
use crate::util::angle::normalize_angle;
use crate::{Kinematic, SteeringOutput, Static};

/// Rotates the agent to match a target orientation.
///
/// The angular counterpart of [`DynamicArrive`](super::dynamic_arrive::DynamicArrive):
/// full `max_rotation` beyond `slow_radius`, proportionally less inside it,
/// and no rotation at all inside `target_radius`. Both radii are angles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Align {
    max_rotation: f64,
    max_angular_acceleration: f64,
    target_radius: f64,
    slow_radius: f64,
    time_to_target: f64,
}

impl Default for Align {
    fn default() -> Self {
        Self {
            max_rotation: PI,
            max_angular_acceleration: PI,
            target_radius: 0.01f64,
            slow_radius: PI / 4f64,
            time_to_target: 0.1f64,
        }
    }
}

impl Align {
    pub fn new(
        max_rotation: f64,
        max_angular_acceleration: f64,
        target_radius: f64,
        slow_radius: f64,
        time_to_target: f64,
    ) -> SteeringResult<Self> {
        Ok(Self {
            max_rotation: require_non_negative("max_rotation", max_rotation)?,
            max_angular_acceleration: require_non_negative(
                "max_angular_acceleration",
                max_angular_acceleration,
            )?,
            target_radius: require_non_negative("target_radius", target_radius)?,
            slow_radius: require_positive("slow_radius", slow_radius)?,
            time_to_target: require_positive("time_to_target", time_to_target)?,
        })
    }

    /// Align with the default radii and time constant.
    pub fn with_limits(max_rotation: f64, max_angular_acceleration: f64) -> SteeringResult<Self> {
        let defaults = Self::default();
        Self::new(
            max_rotation,
            max_angular_acceleration,
            defaults.target_radius,
            defaults.slow_radius,
            defaults.time_to_target,
        )
    }

    pub fn get_steering(&self, character: &Kinematic, target: &Static) -> SteeringOutput {
        SteeringOutput::angular(self.angular_acceleration(character, target.orientation))
    }

    /// Angular acceleration turning `character` towards `target_orientation`.
    ///
    /// Shared by every behaviour that needs to face somewhere.
    pub fn angular_acceleration(&self, character: &Kinematic, target_orientation: f64) -> f64 {
        let rotation = normalize_angle(target_orientation - character.orientation);
        let rotation_size = rotation.abs();

        // The zero check also covers a zero target radius.
        if rotation_size < self.target_radius || rotation_size == 0f64 {
            trace!("Agent {} aligned", character.agent_id);
            return 0f64;
        }

        let target_speed = if rotation_size > self.slow_radius {
            self.max_rotation
        } else {
            self.max_rotation * rotation_size / self.slow_radius
        };
        let target_rotation = target_speed * rotation.signum();

        let angular = (target_rotation - character.rotation) / self.time_to_target;
        angular
            .max(-self.max_angular_acceleration)
            .min(self.max_angular_acceleration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Point;
    use approx::assert_relative_eq;

    #[test]
    fn test_turns_the_short_way() {
        let character = Kinematic::new(0, Point::new(0f64, 0f64), 0f64);
        let target = Static::new(Point::new(0f64, 0f64), PI / 2f64);
        let align = Align::new(PI, PI, 0.01f64, PI / 3f64, 0.1f64).unwrap();

        let steering = align.get_steering(&character, &target);
        assert!(steering.angular > 0f64);
        assert_eq!(steering.linear, crate::Vec2f::zeros());

        // Across the +/-PI seam the short way is negative.
        let character = Kinematic::new(0, Point::new(0f64, 0f64), 3f64);
        let target = Static::new(Point::new(0f64, 0f64), -2f64);
        assert!(align.get_steering(&character, &target).angular > 0f64);
        let target = Static::new(Point::new(0f64, 0f64), 2f64);
        assert!(align.get_steering(&character, &target).angular < 0f64);
    }

    #[test]
    fn test_within_target_radius_is_zero() {
        let character = Kinematic::new(0, Point::new(0f64, 0f64), 1f64);
        let target = Static::new(Point::new(0f64, 0f64), 1.005f64);
        assert!(Align::default().get_steering(&character, &target).is_zero());

        let exact = Align::new(PI, PI, 0f64, PI / 4f64, 0.1f64).unwrap();
        let target = Static::new(Point::new(0f64, 0f64), 1f64);
        assert!(exact.get_steering(&character, &target).is_zero());
    }

    #[test]
    fn test_scales_inside_slow_radius() {
        let align = Align::new(2f64, 100f64, 0.01f64, 1f64, 1f64).unwrap();
        let mut character = Kinematic::new(0, Point::new(0f64, 0f64), 0f64);
        character.rotation = 0.5f64;

        // Aimed rotation is 2 * 0.5 / 1 = 1, current rotation 0.5.
        let angular = align.angular_acceleration(&character, 0.5f64);
        assert_relative_eq!(angular, 0.5f64, epsilon = 1e-12);

        let angular = align.angular_acceleration(&character, -0.5f64);
        assert_relative_eq!(angular, -1.5f64, epsilon = 1e-12);
    }

    #[test]
    fn test_caps_angular_acceleration() {
        let character = Kinematic::new(0, Point::new(0f64, 0f64), 0f64);
        let align = Align::new(PI, 1f64, 0.01f64, 0.1f64, 0.1f64).unwrap();
        assert_eq!(align.angular_acceleration(&character, 2f64), 1f64);
    }
}
