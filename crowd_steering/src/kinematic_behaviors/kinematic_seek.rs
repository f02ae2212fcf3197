use crate::error::{require_non_negative, SteeringResult};
use crate::util::angle::new_orientation;
use crate::util::vector::normalize_or_zero;
use crate::{Kinematic, KinematicSteeringOutput, Static, Vec2f};

/// Full speed straight at the target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KinematicSeek {
    max_speed: f64,
}

/// Full speed straight away from the target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KinematicFlee {
    max_speed: f64,
}

/// Moves along `direction` at `speed` and faces the agent that way. A zero
/// direction gives a zero command and leaves the orientation alone.
pub(crate) fn move_along(
    character: &mut Kinematic,
    direction: &Vec2f,
    speed: f64,
) -> KinematicSteeringOutput {
    let velocity = normalize_or_zero(direction) * speed;
    character.orientation = new_orientation(character.orientation, &velocity);
    KinematicSteeringOutput::new(velocity, 0f64)
}

impl KinematicSeek {
    pub fn new(max_speed: f64) -> SteeringResult<Self> {
        Ok(Self {
            max_speed: require_non_negative("max_speed", max_speed)?,
        })
    }

    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    pub fn get_steering(
        &self,
        character: &mut Kinematic,
        target: &Static,
    ) -> KinematicSteeringOutput {
        move_along(
            character,
            &(target.position - character.position),
            self.max_speed,
        )
    }
}

impl KinematicFlee {
    pub fn new(max_speed: f64) -> SteeringResult<Self> {
        Ok(Self {
            max_speed: require_non_negative("max_speed", max_speed)?,
        })
    }

    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    pub fn get_steering(
        &self,
        character: &mut Kinematic,
        target: &Static,
    ) -> KinematicSteeringOutput {
        move_along(
            character,
            &(character.position - target.position),
            self.max_speed,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Point;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_seek_full_speed_toward_target() {
        let mut character = Kinematic::new(0, Point::new(0f64, 0f64), 1f64);
        let target = Static::at(Point::new(0f64, -50f64));
        let seek = KinematicSeek::new(200f64).unwrap();

        let steering = seek.get_steering(&mut character, &target);

        assert_relative_eq!(steering.velocity.norm(), 200f64);
        assert_relative_eq!(steering.velocity, Vec2f::new(0f64, -200f64));
        assert_eq!(steering.rotation, 0f64);
        // Target is straight up on screen.
        assert_relative_eq!(character.orientation, PI / 2f64);
    }

    #[test]
    fn test_seek_on_target_is_zero() {
        let mut character = Kinematic::new(0, Point::new(5f64, 5f64), 1f64);
        let target = Static::at(Point::new(5f64, 5f64));
        let steering = KinematicSeek::new(200f64)
            .unwrap()
            .get_steering(&mut character, &target);

        assert_eq!(steering, KinematicSteeringOutput::zero());
        assert_eq!(character.orientation, 1f64);
    }

    #[test]
    fn test_flee_reverses_direction() {
        let mut character = Kinematic::new(0, Point::new(0f64, 0f64), 0f64);
        let target = Static::at(Point::new(10f64, 0f64));
        let steering = KinematicFlee::new(150f64)
            .unwrap()
            .get_steering(&mut character, &target);

        assert_relative_eq!(steering.velocity, Vec2f::new(-150f64, 0f64));
        assert_relative_eq!(character.orientation, PI);
    }

    #[test]
    fn test_rejects_negative_speed() {
        assert!(KinematicSeek::new(-1f64).is_err());
        assert!(KinematicFlee::new(f64::NAN).is_err());
    }
}
