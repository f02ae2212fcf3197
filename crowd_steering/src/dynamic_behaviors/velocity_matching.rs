use crate::error::{require_non_negative, require_positive, SteeringResult};
use crate::util::vector::limit_magnitude;
use crate::{Kinematic, SteeringOutput};

/// Accelerates so the agent's velocity matches the target's.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VelocityMatching {
    max_acceleration: f64,
    time_to_target: f64,
}

impl VelocityMatching {
    pub fn new(max_acceleration: f64, time_to_target: f64) -> SteeringResult<Self> {
        Ok(Self {
            max_acceleration: require_non_negative("max_acceleration", max_acceleration)?,
            time_to_target: require_positive("time_to_target", time_to_target)?,
        })
    }

    pub fn get_steering(&self, character: &Kinematic, target: &Kinematic) -> SteeringOutput {
        let linear = (target.velocity - character.velocity) / self.time_to_target;
        SteeringOutput::linear(limit_magnitude(&linear, self.max_acceleration))
    }
}
