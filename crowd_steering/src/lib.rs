use std::f64::consts::PI;

pub extern crate nalgebra as na;
use log::warn;
use na::Vector2;

pub mod dynamic_behaviors;
pub mod error;
pub mod group_behaviors;
pub mod kinematic_behaviors;
pub mod map_representation;
pub mod path_following;
pub mod steering;
pub mod util;

pub use crate::dynamic_behaviors::align::Align;
pub use crate::dynamic_behaviors::dynamic_arrive::DynamicArrive;
pub use crate::dynamic_behaviors::dynamic_seek::{DynamicFlee, DynamicSeek};
pub use crate::dynamic_behaviors::dynamic_wander::DynamicWander;
pub use crate::dynamic_behaviors::face::{Face, LookWhereYouAreGoing};
pub use crate::dynamic_behaviors::pursue::{Evade, Pursue};
pub use crate::dynamic_behaviors::velocity_matching::VelocityMatching;
pub use crate::error::{SteeringError, SteeringResult};
pub use crate::group_behaviors::collision_avoidance::CollisionAvoidance;
pub use crate::group_behaviors::obstacle_avoidance::ObstacleAvoidance;
pub use crate::group_behaviors::separation::Separation;
pub use crate::kinematic_behaviors::kinematic_arrive::KinematicArrive;
pub use crate::kinematic_behaviors::kinematic_seek::{KinematicFlee, KinematicSeek};
pub use crate::kinematic_behaviors::kinematic_wander::KinematicWander;
pub use crate::map_representation::obstacle::Obstacle;
pub use crate::path_following::path::Path;
pub use crate::path_following::path_following::PathFollowing;
pub use crate::steering::steering_output::{KinematicSteeringOutput, SteeringOutput};
pub use crate::util::angle::normalize_angle;

use crate::util::angle::orientation_to_vector;
use crate::util::vector::limit_magnitude;

/// Agent  ID
pub type AgentId = usize;

/// Point
pub type Point = Vector2<f64>;

/// 2-vector
pub type Vec2f = Vector2<f64>;

/// Per-agent motion limits
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentLimits {
    pub max_speed: f64,
    /// Maximum turn rate in rad/s
    pub max_rotation: f64,
    pub max_acceleration: f64,
    pub max_angular_acceleration: f64,
    /// Velocity decay factor applied every dynamic update. 1.0 means no decay.
    pub drag: f64,
}

impl Default for AgentLimits {
    fn default() -> Self {
        Self {
            max_speed: 200f64,
            max_rotation: PI,
            max_acceleration: 100f64,
            max_angular_acceleration: PI,
            drag: 0.98f64,
        }
    }
}

/// Goal snapshot: a position and an orientation, nothing else.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Static {
    pub position: Point,
    /// Orientation in radians
    pub orientation: f64,
}

impl Static {
    pub fn new(position: Point, orientation: f64) -> Self {
        Self {
            position,
            orientation: normalize_angle(orientation),
        }
    }

    pub fn at(position: Point) -> Self {
        Self::new(position, 0f64)
    }
}

impl From<&Kinematic> for Static {
    fn from(agent: &Kinematic) -> Self {
        Self::new(agent.position, agent.orientation)
    }
}

/// Data representing an individual agent
///
/// The orientation is kept in `(-PI, PI]` by both integrators.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Kinematic {
    /// Unique Agent ID
    pub agent_id: AgentId,
    /// Position of agent
    pub position: Point,
    /// Orientation of agent
    pub orientation: f64,
    /// Velocity of agent
    pub velocity: Vec2f,
    /// Angular velocity of agent
    pub rotation: f64,
    pub max_speed: f64,
    pub max_rotation: f64,
    pub max_acceleration: f64,
    pub max_angular_acceleration: f64,
    pub drag: f64,
}

impl Kinematic {
    /// Create a stationary agent with the default limits
    pub fn new(agent_id: AgentId, position: Point, orientation: f64) -> Self {
        Self {
            agent_id,
            position,
            orientation: normalize_angle(orientation),
            velocity: Vec2f::zeros(),
            rotation: 0f64,
            max_speed: 0f64,
            max_rotation: 0f64,
            max_acceleration: 0f64,
            max_angular_acceleration: 0f64,
            drag: 1f64,
        }
        .with_limits(AgentLimits::default())
    }

    pub fn with_velocity(mut self, velocity: Vec2f) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_limits(mut self, limits: AgentLimits) -> Self {
        self.max_speed = limits.max_speed;
        self.max_rotation = limits.max_rotation;
        self.max_acceleration = limits.max_acceleration;
        self.max_angular_acceleration = limits.max_angular_acceleration;
        self.drag = limits.drag;
        self
    }

    pub fn limits(&self) -> AgentLimits {
        AgentLimits {
            max_speed: self.max_speed,
            max_rotation: self.max_rotation,
            max_acceleration: self.max_acceleration,
            max_angular_acceleration: self.max_angular_acceleration,
            drag: self.drag,
        }
    }

    pub fn speed(&self) -> f64 {
        self.velocity.norm()
    }

    /// Unit vector the agent is facing
    pub fn heading(&self) -> Vec2f {
        orientation_to_vector(self.orientation)
    }

    /// Dynamic integration step.
    ///
    /// Drag is applied and the current velocity and rotation are integrated
    /// before the command is added, then speed and rotation are clamped to the
    /// agent's limits. The agent is left untouched if `time` or the command is
    /// unusable.
    pub fn update(&mut self, steering: &SteeringOutput, time: f64) -> SteeringResult<()> {
        check_time_step(time)?;
        if !steering.is_finite() {
            warn!(
                "Agent {} rejected non-finite steering {:?}",
                self.agent_id, steering
            );
            return Err(SteeringError::NonFiniteCommand);
        }

        self.velocity *= self.drag;

        self.position += self.velocity * time;
        self.orientation = normalize_angle(self.orientation + self.rotation * time);

        self.velocity += steering.linear * time;
        self.rotation += steering.angular * time;
        self.orientation = normalize_angle(self.orientation);

        self.velocity = limit_magnitude(&self.velocity, self.max_speed);
        self.rotation = self.rotation.max(-self.max_rotation).min(self.max_rotation);
        Ok(())
    }

    /// Kinematic integration step. The command's velocity and rotation are
    /// taken as-is and become the agent's own.
    pub fn update_kinematic(
        &mut self,
        steering: &KinematicSteeringOutput,
        time: f64,
    ) -> SteeringResult<()> {
        check_time_step(time)?;
        if !steering.is_finite() {
            warn!(
                "Agent {} rejected non-finite kinematic steering {:?}",
                self.agent_id, steering
            );
            return Err(SteeringError::NonFiniteCommand);
        }

        self.position += steering.velocity * time;
        self.orientation = normalize_angle(self.orientation + steering.rotation * time);

        self.velocity = steering.velocity;
        self.rotation = steering.rotation;
        Ok(())
    }
}

fn check_time_step(time: f64) -> SteeringResult<()> {
    if time.is_finite() && time >= 0f64 {
        Ok(())
    } else {
        warn!("Rejected time step {}", time);
        Err(SteeringError::InvalidTimeStep(time))
    }
}
