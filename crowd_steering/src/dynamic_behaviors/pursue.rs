use log::trace;

use super::dynamic_seek::{flee_acceleration, seek_acceleration};
use crate::error::{require_non_negative, require_positive, SteeringResult};
use crate::{Kinematic, SteeringOutput, Static};

/// How far ahead to extrapolate a moving target.
///
/// If the pursuer is too slow to cover `distance` within `max_prediction`
/// the horizon is `max_prediction`, otherwise it is the time needed to cover
/// the distance at the current `speed`.
pub fn prediction_time(distance: f64, speed: f64, max_prediction: f64) -> f64 {
    if speed <= distance / max_prediction {
        max_prediction
    } else {
        distance / speed
    }
}

/// Where `target` will be after `prediction` seconds at its current velocity.
pub fn predict_position(target: &Kinematic, prediction: f64) -> Static {
    Static::new(
        target.position + target.velocity * prediction,
        target.orientation,
    )
}

/// Seeks the point a moving target is predicted to reach.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pursue {
    max_acceleration: f64,
    max_prediction: f64,
}

/// Flees the point a moving target is predicted to reach.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Evade {
    max_acceleration: f64,
    max_prediction: f64,
}

impl Default for Pursue {
    fn default() -> Self {
        Self {
            max_acceleration: 100f64,
            max_prediction: 2f64,
        }
    }
}

impl Default for Evade {
    fn default() -> Self {
        Self {
            max_acceleration: 100f64,
            max_prediction: 2f64,
        }
    }
}

fn predicted_target(character: &Kinematic, target: &Kinematic, max_prediction: f64) -> Static {
    let distance = (target.position - character.position).norm();
    let prediction = prediction_time(distance, character.speed(), max_prediction);
    trace!(
        "Agent {} predicting agent {} {}s ahead",
        character.agent_id,
        target.agent_id,
        prediction
    );
    predict_position(target, prediction)
}

impl Pursue {
    pub fn new(max_acceleration: f64, max_prediction: f64) -> SteeringResult<Self> {
        Ok(Self {
            max_acceleration: require_non_negative("max_acceleration", max_acceleration)?,
            max_prediction: require_positive("max_prediction", max_prediction)?,
        })
    }

    pub fn predicted_target(&self, character: &Kinematic, target: &Kinematic) -> Static {
        predicted_target(character, target, self.max_prediction)
    }

    pub fn get_steering(&self, character: &Kinematic, target: &Kinematic) -> SteeringOutput {
        let predicted = self.predicted_target(character, target);
        seek_acceleration(&character.position, &predicted.position, self.max_acceleration)
    }
}

impl Evade {
    pub fn new(max_acceleration: f64, max_prediction: f64) -> SteeringResult<Self> {
        Ok(Self {
            max_acceleration: require_non_negative("max_acceleration", max_acceleration)?,
            max_prediction: require_positive("max_prediction", max_prediction)?,
        })
    }

    pub fn predicted_target(&self, character: &Kinematic, target: &Kinematic) -> Static {
        predicted_target(character, target, self.max_prediction)
    }

    pub fn get_steering(&self, character: &Kinematic, target: &Kinematic) -> SteeringOutput {
        let predicted = self.predicted_target(character, target);
        flee_acceleration(&character.position, &predicted.position, self.max_acceleration)
    }
}
