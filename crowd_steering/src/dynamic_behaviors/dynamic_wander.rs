use rand::Rng;

use super::face::Face;
use crate::error::{require_non_negative, SteeringResult};
use crate::util::angle::{normalize_angle, orientation_to_vector};
use crate::{Kinematic, Point, SteeringOutput};

/// Wanders by facing a target that drifts around a circle projected ahead of
/// the agent, while thrusting forward at full acceleration.
///
/// The drift is held in `wander_orientation`, relative to the agent's own
/// orientation, and changes by at most `wander_rate` per call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DynamicWander {
    face: Face,
    wander_offset: f64,
    wander_radius: f64,
    wander_rate: f64,
    max_acceleration: f64,
    wander_orientation: f64,
}

impl DynamicWander {
    pub fn new(
        face: Face,
        wander_offset: f64,
        wander_radius: f64,
        wander_rate: f64,
        max_acceleration: f64,
    ) -> SteeringResult<Self> {
        Ok(Self {
            face,
            wander_offset: require_non_negative("wander_offset", wander_offset)?,
            wander_radius: require_non_negative("wander_radius", wander_radius)?,
            wander_rate: require_non_negative("wander_rate", wander_rate)?,
            max_acceleration: require_non_negative("max_acceleration", max_acceleration)?,
            wander_orientation: 0f64,
        })
    }

    pub fn wander_orientation(&self) -> f64 {
        self.wander_orientation
    }

    /// Point on the wander circle selected by the current drift.
    pub fn target_position(&self, character: &Kinematic) -> Point {
        let circle_center = character.position + character.heading() * self.wander_offset;
        let target_orientation = self.wander_orientation + character.orientation;
        circle_center + orientation_to_vector(target_orientation) * self.wander_radius
    }

    pub fn get_steering<R: Rng + ?Sized>(
        &mut self,
        character: &Kinematic,
        rng: &mut R,
    ) -> SteeringOutput {
        self.wander_orientation = normalize_angle(
            self.wander_orientation + rng.gen_range(-1f64..=1f64) * self.wander_rate,
        );

        let target = self.target_position(character);
        let turn = self.face.get_steering(character, &target);

        // Forward thrust does not depend on where the target lies.
        SteeringOutput::new(character.heading() * self.max_acceleration, turn.angular)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vec2f;
    use approx::assert_relative_eq;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_thrusts_forward() {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut wander = DynamicWander::new(Face::default(), 50f64, 20f64, 0.4f64, 100f64).unwrap();
        let character = Kinematic::new(0, Point::new(200f64, 200f64), 1.2f64);

        for _ in 0..50 {
            let before = wander.wander_orientation();
            let steering = wander.get_steering(&character, &mut rng);
            assert_relative_eq!(steering.linear, character.heading() * 100f64, epsilon = 1e-9);
            assert!(normalize_angle(wander.wander_orientation() - before).abs() <= 0.4f64 + 1e-12);
        }
    }

    #[test]
    fn test_target_on_wander_circle() {
        let wander = DynamicWander::new(Face::default(), 50f64, 20f64, 0.4f64, 100f64).unwrap();
        let character = Kinematic::new(0, Point::new(0f64, 0f64), 0f64);

        // No drift yet: the target sits straight ahead at offset + radius.
        assert_relative_eq!(
            wander.target_position(&character),
            Point::new(70f64, 0f64),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_zero_rate_keeps_heading() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut wander = DynamicWander::new(Face::default(), 50f64, 20f64, 0f64, 100f64).unwrap();
        let character = Kinematic::new(0, Point::new(0f64, 0f64), 0.5f64)
            .with_velocity(Vec2f::new(1f64, 0f64));

        let steering = wander.get_steering(&character, &mut rng);
        assert_eq!(wander.wander_orientation(), 0f64);
        // Target straight ahead: already facing it.
        assert_eq!(steering.angular, 0f64);
    }
}
