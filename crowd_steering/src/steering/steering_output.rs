use std::ops::{Add, AddAssign, Mul};

use crate::util::vector::limit_magnitude;
use crate::Vec2f;

/// Acceleration command produced by the dynamic behaviours and consumed by
/// [`Kinematic::update`](crate::Kinematic::update).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SteeringOutput {
    /// Linear acceleration
    pub linear: Vec2f,
    /// Angular acceleration in rad/s^2
    pub angular: f64,
}

/// Velocity command produced by the kinematic behaviours and consumed by
/// [`Kinematic::update_kinematic`](crate::Kinematic::update_kinematic).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KinematicSteeringOutput {
    pub velocity: Vec2f,
    /// Turn rate in rad/s
    pub rotation: f64,
}

impl SteeringOutput {
    pub fn new(linear: Vec2f, angular: f64) -> Self {
        Self { linear, angular }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    pub fn linear(linear: Vec2f) -> Self {
        Self {
            linear,
            angular: 0f64,
        }
    }

    pub fn angular(angular: f64) -> Self {
        Self {
            linear: Vec2f::zeros(),
            angular,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.linear == Vec2f::zeros() && self.angular == 0f64
    }

    pub fn is_finite(&self) -> bool {
        self.linear.x.is_finite() && self.linear.y.is_finite() && self.angular.is_finite()
    }

    /// Rescales the linear part to at most `max_acceleration` and clamps the
    /// angular part to `[-max_angular_acceleration, max_angular_acceleration]`.
    pub fn clamped(&self, max_acceleration: f64, max_angular_acceleration: f64) -> Self {
        Self {
            linear: limit_magnitude(&self.linear, max_acceleration),
            angular: self
                .angular
                .max(-max_angular_acceleration)
                .min(max_angular_acceleration),
        }
    }

    /// Keeps the linear part and replaces the angular part.
    pub fn with_angular(&self, angular: f64) -> Self {
        Self {
            linear: self.linear,
            angular,
        }
    }

    /// Keeps the linear part and takes the angular part from `other`, e.g.
    /// pursuit thrust combined with look-where-you-are-going rotation.
    pub fn with_angular_from(&self, other: &SteeringOutput) -> Self {
        self.with_angular(other.angular)
    }

    /// Weighted sum of several outputs, re-clamped to the agent's limits.
    pub fn blend(
        weighted: &[(SteeringOutput, f64)],
        max_acceleration: f64,
        max_angular_acceleration: f64,
    ) -> Self {
        weighted
            .iter()
            .fold(Self::zero(), |sum, (output, weight)| sum + *output * *weight)
            .clamped(max_acceleration, max_angular_acceleration)
    }

    /// Returns the first output with a linear or angular magnitude above
    /// `epsilon`, or zero when every output is negligible.
    pub fn prioritized(outputs: &[SteeringOutput], epsilon: f64) -> Self {
        outputs
            .iter()
            .find(|output| output.linear.norm() > epsilon || output.angular.abs() > epsilon)
            .copied()
            .unwrap_or_default()
    }
}

impl Default for SteeringOutput {
    fn default() -> Self {
        Self {
            linear: Vec2f::zeros(),
            angular: 0f64,
        }
    }
}

impl Add for SteeringOutput {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            linear: self.linear + other.linear,
            angular: self.angular + other.angular,
        }
    }
}

impl AddAssign for SteeringOutput {
    fn add_assign(&mut self, other: Self) {
        self.linear += other.linear;
        self.angular += other.angular;
    }
}

impl Mul<f64> for SteeringOutput {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        Self {
            linear: self.linear * scalar,
            angular: self.angular * scalar,
        }
    }
}

impl Default for KinematicSteeringOutput {
    fn default() -> Self {
        Self {
            velocity: Vec2f::zeros(),
            rotation: 0f64,
        }
    }
}

impl KinematicSteeringOutput {
    pub fn new(velocity: Vec2f, rotation: f64) -> Self {
        Self { velocity, rotation }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    pub fn is_finite(&self) -> bool {
        self.velocity.x.is_finite() && self.velocity.y.is_finite() && self.rotation.is_finite()
    }

    pub fn clamped(&self, max_speed: f64, max_rotation: f64) -> Self {
        Self {
            velocity: limit_magnitude(&self.velocity, max_speed),
            rotation: self.rotation.max(-max_rotation).min(max_rotation),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_blend_reclamps() {
        let seek = SteeringOutput::linear(Vec2f::new(100f64, 0f64));
        let separation = SteeringOutput::linear(Vec2f::new(0f64, 100f64));
        let blended = SteeringOutput::blend(&[(seek, 1f64), (separation, 1f64)], 100f64, 1f64);
        assert_relative_eq!(blended.linear.norm(), 100f64, epsilon = 1e-9);
        assert_relative_eq!(blended.linear.x, blended.linear.y, epsilon = 1e-9);

        let weighted = SteeringOutput::blend(&[(seek, 0.25f64)], 100f64, 1f64);
        assert_relative_eq!(weighted.linear, Vec2f::new(25f64, 0f64));
    }

    #[test]
    fn test_angular_override() {
        let pursue = SteeringOutput::new(Vec2f::new(1f64, 2f64), 5f64);
        let look = SteeringOutput::angular(-0.5f64);
        let combined = pursue.with_angular_from(&look);
        assert_eq!(combined.linear, Vec2f::new(1f64, 2f64));
        assert_eq!(combined.angular, -0.5f64);
    }

    #[test]
    fn test_prioritized_skips_negligible_outputs() {
        let avoid = SteeringOutput::zero();
        let thrust = SteeringOutput::linear(Vec2f::new(0f64, 10f64));
        assert_eq!(SteeringOutput::prioritized(&[avoid, thrust], 1e-6), thrust);
        assert!(SteeringOutput::prioritized(&[avoid], 1e-6).is_zero());
    }

    #[test]
    fn test_clamped_angular() {
        let output = SteeringOutput::angular(10f64).clamped(1f64, 2f64);
        assert_eq!(output.angular, 2f64);
        let output = SteeringOutput::angular(-10f64).clamped(1f64, 2f64);
        assert_eq!(output.angular, -2f64);

        let command = KinematicSteeringOutput::new(Vec2f::new(0f64, 300f64), 9f64).clamped(200f64, 3f64);
        assert_relative_eq!(command.velocity, Vec2f::new(0f64, 200f64));
        assert_eq!(command.rotation, 3f64);
    }
}
