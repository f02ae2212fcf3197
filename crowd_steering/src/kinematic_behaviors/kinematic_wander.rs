use rand::Rng;

use crate::error::{require_non_negative, SteeringResult};
use crate::util::angle::{normalize_angle, orientation_to_vector};
use crate::{Kinematic, KinematicSteeringOutput};

/// Constant-speed motion whose heading drifts randomly every call.
///
/// The drift accumulates in the agent's orientation; it is never reset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KinematicWander {
    max_speed: f64,
    max_rotation: f64,
}

impl KinematicWander {
    pub fn new(max_speed: f64, max_rotation: f64) -> SteeringResult<Self> {
        Ok(Self {
            max_speed: require_non_negative("max_speed", max_speed)?,
            max_rotation: require_non_negative("max_rotation", max_rotation)?,
        })
    }

    /// Turns the agent by a random amount in `[-max_rotation, max_rotation]`,
    /// then moves it at `max_speed` along the new heading.
    pub fn get_steering<R: Rng + ?Sized>(
        &self,
        character: &mut Kinematic,
        rng: &mut R,
    ) -> KinematicSteeringOutput {
        let drift = rng.gen_range(-self.max_rotation..=self.max_rotation);
        character.orientation = normalize_angle(character.orientation + drift);

        KinematicSteeringOutput::new(
            orientation_to_vector(character.orientation) * self.max_speed,
            0f64,
        )
    }
}
