use log::debug;

use super::path::Path;
use crate::dynamic_behaviors::dynamic_seek::seek_acceleration;
use crate::error::{require_non_negative, SteeringResult};
use crate::{Kinematic, Point, SteeringOutput};

/// Seeks the waypoints of a closed [`Path`] in order, forever.
///
/// The behaviour keeps its own progress index. Once the agent comes within
/// `path_offset` of the current waypoint the index moves on to the next one,
/// wrapping back to the first after the last.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathFollowing {
    path_offset: f64,
    max_acceleration: f64,
    current_waypoint: usize,
}

impl Default for PathFollowing {
    fn default() -> Self {
        Self {
            path_offset: 10f64,
            max_acceleration: 100f64,
            current_waypoint: 0,
        }
    }
}

impl PathFollowing {
    pub fn new(path_offset: f64, max_acceleration: f64) -> SteeringResult<Self> {
        Ok(Self {
            path_offset: require_non_negative("path_offset", path_offset)?,
            max_acceleration: require_non_negative("max_acceleration", max_acceleration)?,
            current_waypoint: 0,
        })
    }

    pub fn current_index(&self) -> usize {
        self.current_waypoint
    }

    /// Restart from the first waypoint.
    pub fn reset(&mut self) {
        self.current_waypoint = 0;
    }

    /// Waypoint currently being sought. The index is wrapped in case the
    /// behaviour is reused with a shorter path.
    pub fn current_target(&self, path: &Path) -> Point {
        path.waypoint(self.current_waypoint)
    }

    pub fn get_steering(&mut self, character: &Kinematic, path: &Path) -> SteeringOutput {
        if self.current_waypoint >= path.len() {
            self.current_waypoint = 0;
        }

        let mut target = path.waypoint(self.current_waypoint);
        if (target - character.position).norm() < self.path_offset {
            self.current_waypoint = (self.current_waypoint + 1) % path.len();
            target = path.waypoint(self.current_waypoint);
            debug!(
                "Agent {} advancing to waypoint {}",
                character.agent_id, self.current_waypoint
            );
        }

        seek_acceleration(&character.position, &target, self.max_acceleration)
    }
}
