use log::trace;

use crate::error::{require_non_negative, SteeringResult};
use crate::util::vector::limit_magnitude;
use crate::{Kinematic, SteeringOutput, Vec2f};

/// Inverse-square repulsion from every neighbour closer than `threshold`.
///
/// Each neighbour contributes `min(decay_coefficient / distance^2,
/// max_acceleration)` away from itself; the sum is capped at
/// `max_acceleration`. A neighbour at exactly the agent's position has no
/// defined direction and contributes nothing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Separation {
    threshold: f64,
    decay_coefficient: f64,
    max_acceleration: f64,
}

impl Default for Separation {
    fn default() -> Self {
        Self {
            threshold: 20f64,
            decay_coefficient: 1000f64,
            max_acceleration: 100f64,
        }
    }
}

impl Separation {
    pub fn new(threshold: f64, decay_coefficient: f64, max_acceleration: f64) -> SteeringResult<Self> {
        Ok(Self {
            threshold: require_non_negative("threshold", threshold)?,
            decay_coefficient: require_non_negative("decay_coefficient", decay_coefficient)?,
            max_acceleration: require_non_negative("max_acceleration", max_acceleration)?,
        })
    }

    pub fn get_steering(&self, character: &Kinematic, neighbours: &[Kinematic]) -> SteeringOutput {
        let mut linear = Vec2f::zeros();

        for neighbour in neighbours
            .iter()
            .filter(|neighbour| neighbour.agent_id != character.agent_id)
        {
            let direction = character.position - neighbour.position;
            let distance = direction.norm();
            if distance >= self.threshold {
                continue;
            }
            if distance == 0f64 {
                trace!(
                    "Agent {} coincides with agent {}, ignoring",
                    character.agent_id,
                    neighbour.agent_id
                );
                continue;
            }

            let strength = (self.decay_coefficient / (distance * distance)).min(self.max_acceleration);
            linear += direction / distance * strength;
        }

        SteeringOutput::linear(limit_magnitude(&linear, self.max_acceleration))
    }
}
