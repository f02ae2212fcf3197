use super::align::Align;
use crate::util::angle::vector_to_orientation;
use crate::{Kinematic, Point, SteeringOutput, Static};

/// Turns the agent towards a point.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Face {
    align: Align,
}

/// Turns the agent towards its direction of travel.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LookWhereYouAreGoing {
    align: Align,
}

impl Face {
    pub fn new(align: Align) -> Self {
        Self { align }
    }

    pub fn get_steering(&self, character: &Kinematic, target_position: &Point) -> SteeringOutput {
        let direction = target_position - character.position;
        if direction.norm_squared() == 0f64 {
            return SteeringOutput::zero();
        }
        let orientation = vector_to_orientation(&direction);
        SteeringOutput::angular(self.align.angular_acceleration(character, orientation))
    }

    /// Face the position of a goal snapshot, ignoring its orientation.
    pub fn get_steering_to(&self, character: &Kinematic, target: &Static) -> SteeringOutput {
        self.get_steering(character, &target.position)
    }
}

impl LookWhereYouAreGoing {
    pub fn new(align: Align) -> Self {
        Self { align }
    }

    pub fn get_steering(&self, character: &Kinematic) -> SteeringOutput {
        if character.velocity.norm_squared() == 0f64 {
            return SteeringOutput::zero();
        }
        let orientation = vector_to_orientation(&character.velocity);
        SteeringOutput::angular(self.align.angular_acceleration(character, orientation))
    }
}
