use log::debug;

use crate::error::{require_non_negative, require_positive, SteeringResult};
use crate::util::vector::{limit_magnitude, normalize_or_zero};
use crate::{Kinematic, SteeringOutput, Static, Vec2f};

/// Velocity-based arrival.
///
/// Beyond `slow_radius` the agent aims for `max_speed`; inside it the aimed
/// speed falls off linearly with distance. Inside `target_radius` the agent is
/// brought to a halt: its velocity is zeroed and the output is zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DynamicArrive {
    max_acceleration: f64,
    max_speed: f64,
    target_radius: f64,
    slow_radius: f64,
    time_to_target: f64,
}

impl DynamicArrive {
    pub fn new(
        max_acceleration: f64,
        max_speed: f64,
        target_radius: f64,
        slow_radius: f64,
        time_to_target: f64,
    ) -> SteeringResult<Self> {
        Ok(Self {
            max_acceleration: require_non_negative("max_acceleration", max_acceleration)?,
            max_speed: require_non_negative("max_speed", max_speed)?,
            target_radius: require_non_negative("target_radius", target_radius)?,
            slow_radius: require_positive("slow_radius", slow_radius)?,
            time_to_target: require_positive("time_to_target", time_to_target)?,
        })
    }

    pub fn get_steering(&self, character: &mut Kinematic, target: &Static) -> SteeringOutput {
        let direction = target.position - character.position;
        let distance = direction.norm();

        if distance < self.target_radius {
            if character.velocity != Vec2f::zeros() {
                debug!(
                    "Agent {} reached target radius {}, stopping",
                    character.agent_id, self.target_radius
                );
            }
            character.velocity = Vec2f::zeros();
            return SteeringOutput::zero();
        }

        let target_speed = if distance > self.slow_radius {
            self.max_speed
        } else {
            self.max_speed * distance / self.slow_radius
        };
        let target_velocity = normalize_or_zero(&direction) * target_speed;

        let linear = (target_velocity - character.velocity) / self.time_to_target;
        SteeringOutput::linear(limit_magnitude(&linear, self.max_acceleration))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Point;
    use approx::assert_relative_eq;

    fn arrive() -> DynamicArrive {
        DynamicArrive::new(100f64, 200f64, 40f64, 150f64, 0.1f64).unwrap()
    }

    #[test]
    fn test_halts_on_target() {
        let mut character = Kinematic::new(0, Point::new(50f64, 50f64), 0f64)
            .with_velocity(Vec2f::new(30f64, -10f64));
        let steering = arrive().get_steering(&mut character, &Static::at(Point::new(50f64, 50f64)));

        assert!(steering.is_zero());
        assert_eq!(character.velocity, Vec2f::zeros());
    }

    #[test]
    fn test_far_away_accelerates_at_max() {
        let mut character = Kinematic::new(0, Point::new(0f64, 0f64), 0f64);
        let steering = arrive().get_steering(&mut character, &Static::at(Point::new(500f64, 0f64)));
        assert_relative_eq!(steering.linear, Vec2f::new(100f64, 0f64));
    }

    #[test]
    fn test_brakes_inside_slow_radius() {
        // Aimed speed is 200 * 75 / 150 = 100 but the agent already moves at 180.
        let mut character = Kinematic::new(0, Point::new(0f64, 0f64), 0f64)
            .with_velocity(Vec2f::new(180f64, 0f64));
        let gentle = DynamicArrive::new(1000f64, 200f64, 40f64, 150f64, 1f64).unwrap();
        let steering = gentle.get_steering(&mut character, &Static::at(Point::new(75f64, 0f64)));

        assert_relative_eq!(steering.linear, Vec2f::new(-80f64, 0f64));
        assert_eq!(character.velocity, Vec2f::new(180f64, 0f64));
    }

    #[test]
    fn test_rejects_degenerate_parameters() {
        assert!(DynamicArrive::new(100f64, 200f64, 40f64, 0f64, 0.1f64).is_err());
        assert!(DynamicArrive::new(100f64, 200f64, 40f64, 150f64, 0f64).is_err());
        assert!(DynamicArrive::new(100f64, 200f64, 40f64, 150f64, -0.1f64).is_err());
    }
}
