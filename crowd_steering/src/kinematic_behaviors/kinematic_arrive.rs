use log::debug;

use super::kinematic_seek::move_along;
use crate::error::{require_non_negative, require_positive, SteeringResult};
use crate::{Kinematic, KinematicSteeringOutput, Static};

/// Approaches the target so as to reach it in `time_to_target`, never faster
/// than `max_speed`, and stops once inside `radius`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KinematicArrive {
    max_speed: f64,
    radius: f64,
    time_to_target: f64,
}

impl KinematicArrive {
    pub fn new(max_speed: f64, radius: f64, time_to_target: f64) -> SteeringResult<Self> {
        Ok(Self {
            max_speed: require_non_negative("max_speed", max_speed)?,
            radius: require_non_negative("radius", radius)?,
            time_to_target: require_positive("time_to_target", time_to_target)?,
        })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn get_steering(
        &self,
        character: &mut Kinematic,
        target: &Static,
    ) -> KinematicSteeringOutput {
        let direction = target.position - character.position;
        let distance = direction.norm();

        if distance < self.radius {
            debug!("Agent {} arrived within {}", character.agent_id, self.radius);
            return KinematicSteeringOutput::zero();
        }

        let speed = (distance / self.time_to_target).min(self.max_speed);
        move_along(character, &direction, speed)
    }
}
