use crate::error::{require_non_negative, SteeringResult};
use crate::util::vector::normalize_or_zero;
use crate::{Kinematic, Point, SteeringOutput, Static};

/// Full acceleration towards `target`. Zero when already there.
pub fn seek_acceleration(position: &Point, target: &Point, max_acceleration: f64) -> SteeringOutput {
    SteeringOutput::linear(normalize_or_zero(&(target - position)) * max_acceleration)
}

/// Full acceleration away from `target`. Zero when on top of it.
pub fn flee_acceleration(position: &Point, target: &Point, max_acceleration: f64) -> SteeringOutput {
    SteeringOutput::linear(normalize_or_zero(&(position - target)) * max_acceleration)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DynamicSeek {
    max_acceleration: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DynamicFlee {
    max_acceleration: f64,
}

impl DynamicSeek {
    pub fn new(max_acceleration: f64) -> SteeringResult<Self> {
        Ok(Self {
            max_acceleration: require_non_negative("max_acceleration", max_acceleration)?,
        })
    }

    pub fn get_steering(&self, character: &Kinematic, target: &Static) -> SteeringOutput {
        seek_acceleration(&character.position, &target.position, self.max_acceleration)
    }
}

impl DynamicFlee {
    pub fn new(max_acceleration: f64) -> SteeringResult<Self> {
        Ok(Self {
            max_acceleration: require_non_negative("max_acceleration", max_acceleration)?,
        })
    }

    pub fn get_steering(&self, character: &Kinematic, target: &Static) -> SteeringOutput {
        flee_acceleration(&character.position, &target.position, self.max_acceleration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vec2f;
    use approx::assert_relative_eq;

    #[test]
    fn test_seek_full_acceleration() {
        let character = Kinematic::new(0, Point::new(10f64, 10f64), 0f64);
        let target = Static::at(Point::new(13f64, 14f64));
        let steering = DynamicSeek::new(150f64).unwrap().get_steering(&character, &target);

        assert_relative_eq!(steering.linear.norm(), 150f64);
        assert_relative_eq!(steering.linear, Vec2f::new(0.6f64, 0.8f64) * 150f64);
        assert_eq!(steering.angular, 0f64);
    }

    #[test]
    fn test_flee_is_opposite_of_seek() {
        let character = Kinematic::new(0, Point::new(0f64, 0f64), 0f64);
        let target = Static::at(Point::new(-20f64, 0f64));
        let seek = DynamicSeek::new(100f64).unwrap().get_steering(&character, &target);
        let flee = DynamicFlee::new(100f64).unwrap().get_steering(&character, &target);

        assert_relative_eq!(seek.linear, -flee.linear);
        assert_relative_eq!(flee.linear, Vec2f::new(100f64, 0f64));
    }

    #[test]
    fn test_zero_distance_gives_zero() {
        let character = Kinematic::new(0, Point::new(1f64, 1f64), 0f64);
        let target = Static::at(Point::new(1f64, 1f64));
        assert!(DynamicSeek::new(100f64).unwrap().get_steering(&character, &target).is_zero());
        assert!(DynamicFlee::new(100f64).unwrap().get_steering(&character, &target).is_zero());
    }
}
