use log::trace;

use crate::error::{require_non_negative, require_positive, SteeringResult};
use crate::util::vector::normalize_or_zero;
use crate::{AgentId, Kinematic, Point, SteeringOutput, Vec2f};

/// Radius each agent is treated as occupying
pub const DEFAULT_COLLISION_RADIUS: f64 = 50f64;

/// Steers away from the moving agent the character is predicted to collide
/// with first.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollisionAvoidance {
    max_acceleration: f64,
    collision_radius: f64,
}

/// The soonest collision found so far
#[derive(Clone, Copy, Debug)]
struct CollisionCandidate {
    agent_id: AgentId,
    position: Point,
    time_to_collision: f64,
    min_separation: f64,
    distance: f64,
    relative_pos: Vec2f,
    relative_vel: Vec2f,
}

impl Default for CollisionAvoidance {
    fn default() -> Self {
        Self {
            max_acceleration: 100f64,
            collision_radius: DEFAULT_COLLISION_RADIUS,
        }
    }
}

impl CollisionAvoidance {
    pub fn new(max_acceleration: f64, collision_radius: f64) -> SteeringResult<Self> {
        Ok(Self {
            max_acceleration: require_non_negative("max_acceleration", max_acceleration)?,
            collision_radius: require_positive("collision_radius", collision_radius)?,
        })
    }

    pub fn collision_radius(&self) -> f64 {
        self.collision_radius
    }

    fn first_collision(
        &self,
        character: &Kinematic,
        neighbours: &[Kinematic],
    ) -> Option<CollisionCandidate> {
        let mut first: Option<CollisionCandidate> = None;

        for target in neighbours
            .iter()
            .filter(|target| target.agent_id != character.agent_id)
        {
            let relative_pos = target.position - character.position;
            let relative_vel = target.velocity - character.velocity;
            let relative_speed = relative_vel.norm();
            // Same velocity: the gap never changes.
            if relative_speed == 0f64 {
                continue;
            }

            let time_to_collision =
                -relative_pos.dot(&relative_vel) / (relative_speed * relative_speed);
            let distance = relative_pos.norm();
            let min_separation = distance - relative_speed * time_to_collision;
            if min_separation > 2f64 * self.collision_radius {
                continue;
            }

            let sooner = first.map_or(true, |candidate| {
                time_to_collision < candidate.time_to_collision
            });
            if time_to_collision > 0f64 && sooner {
                first = Some(CollisionCandidate {
                    agent_id: target.agent_id,
                    position: target.position,
                    time_to_collision,
                    min_separation,
                    distance,
                    relative_pos,
                    relative_vel,
                });
            }
        }
        first
    }

    pub fn get_steering(&self, character: &Kinematic, neighbours: &[Kinematic]) -> SteeringOutput {
        let Some(candidate) = self.first_collision(character, neighbours) else {
            return SteeringOutput::zero();
        };
        trace!(
            "Agent {} avoiding agent {} in {}s",
            character.agent_id,
            candidate.agent_id,
            candidate.time_to_collision
        );

        let already_colliding = candidate.min_separation <= 0f64
            || candidate.distance < 2f64 * self.collision_radius;
        let relative_pos = if already_colliding {
            candidate.position - character.position
        } else {
            candidate.relative_pos + candidate.relative_vel * candidate.time_to_collision
        };

        SteeringOutput::linear(-normalize_or_zero(&relative_pos) * self.max_acceleration)
    }
}
