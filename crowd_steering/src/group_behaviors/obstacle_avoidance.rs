use log::trace;

use crate::error::{require_non_negative, require_positive, SteeringResult};
use crate::map_representation::obstacle::Obstacle;
use crate::util::vector::normalize_or_zero;
use crate::{Kinematic, SteeringOutput, Vec2f};

/// Casts a ray of length `lookahead` along the agent's velocity and steers
/// away from the nearest circular obstacle it passes through.
///
/// Returns zero when nothing is hit or the agent is not moving; callers are
/// expected to fall back to some other thrust in that case.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObstacleAvoidance {
    lookahead: f64,
    max_acceleration: f64,
}

impl Default for ObstacleAvoidance {
    fn default() -> Self {
        Self {
            lookahead: 50f64,
            max_acceleration: 100f64,
        }
    }
}

impl ObstacleAvoidance {
    pub fn new(lookahead: f64, max_acceleration: f64) -> SteeringResult<Self> {
        Ok(Self {
            lookahead: require_positive("lookahead", lookahead)?,
            max_acceleration: require_non_negative("max_acceleration", max_acceleration)?,
        })
    }

    pub fn get_steering(&self, character: &Kinematic, obstacles: &[Obstacle]) -> SteeringOutput {
        let ray = normalize_or_zero(&character.velocity);
        if ray == Vec2f::zeros() {
            return SteeringOutput::zero();
        }

        // Projection along the ray, closest point on the ray, obstacle hit
        let mut nearest: Option<(f64, Vec2f, &Obstacle)> = None;
        for obstacle in obstacles {
            let projection = (obstacle.position - character.position).dot(&ray);
            if projection <= 0f64 || projection >= self.lookahead {
                continue;
            }
            let closest = character.position + ray * projection;
            if (obstacle.position - closest).norm() >= obstacle.radius {
                continue;
            }
            if nearest.map_or(true, |(best, _, _)| projection < best) {
                nearest = Some((projection, closest, obstacle));
            }
        }

        let Some((projection, closest, obstacle)) = nearest else {
            return SteeringOutput::zero();
        };
        trace!(
            "Agent {} ray hits obstacle at {:?}, {} ahead",
            character.agent_id,
            obstacle.position,
            projection
        );

        let mut away = closest - obstacle.position;
        if away.norm_squared() == 0f64 {
            // Dead centre: any perpendicular will do.
            away = Vec2f::new(-ray.y, ray.x);
        }
        SteeringOutput::linear(normalize_or_zero(&away) * self.max_acceleration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Point;
    use approx::assert_relative_eq;

    fn moving_right() -> Kinematic {
        Kinematic::new(0, Point::new(0f64, 0f64), 0f64).with_velocity(Vec2f::new(20f64, 0f64))
    }

    #[test]
    fn test_steers_around_nearest_obstacle() {
        let obstacles = vec![
            Obstacle::new(Point::new(40f64, -5f64), 10f64),
            Obstacle::new(Point::new(20f64, 5f64), 10f64),
        ];
        let steering = ObstacleAvoidance::default().get_steering(&moving_right(), &obstacles);

        // Nearest hit is the one centred below the ray at x = 20.
        assert_relative_eq!(steering.linear, Vec2f::new(0f64, -100f64), epsilon = 1e-9);
    }

    #[test]
    fn test_misses_give_zero() {
        let obstacles = vec![
            // Behind the agent.
            Obstacle::new(Point::new(-20f64, 0f64), 10f64),
            // Beyond the lookahead.
            Obstacle::new(Point::new(80f64, 0f64), 10f64),
            // Off to the side.
            Obstacle::new(Point::new(25f64, 30f64), 10f64),
        ];
        assert!(ObstacleAvoidance::default()
            .get_steering(&moving_right(), &obstacles)
            .is_zero());
    }

    #[test]
    fn test_stationary_agent_gives_zero() {
        let still = Kinematic::new(0, Point::new(0f64, 0f64), 0f64);
        let obstacles = vec![Obstacle::new(Point::new(10f64, 0f64), 10f64)];
        assert!(ObstacleAvoidance::default().get_steering(&still, &obstacles).is_zero());
    }

    #[test]
    fn test_dead_centre_picks_perpendicular() {
        let obstacles = vec![Obstacle::new(Point::new(30f64, 0f64), 10f64)];
        let steering = ObstacleAvoidance::default().get_steering(&moving_right(), &obstacles);
        assert_relative_eq!(steering.linear.norm(), 100f64, epsilon = 1e-9);
        assert_relative_eq!(steering.linear.dot(&Vec2f::new(1f64, 0f64)), 0f64, epsilon = 1e-9);
    }

    #[test]
    fn test_rejects_zero_lookahead() {
        assert!(ObstacleAvoidance::new(0f64, 100f64).is_err());
    }
}
