use anyhow::Result;
use crowd_steering::{Kinematic, Point};
use rand::Rng;

/// The rectangle agents live in. Keeping agents on screen is the driver's
/// job, not the steering library's.
pub struct World {
    pub width: f64,
    pub height: f64,
}

impl World {
    pub fn new(width: f64, height: f64) -> Result<Self> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            anyhow::bail!("world size must be positive, got {}x{}", width, height);
        }
        Ok(Self { width, height })
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn random_point<R: Rng>(&self, rng: &mut R) -> Point {
        Point::new(rng.gen_range(0.0..self.width), rng.gen_range(0.0..self.height))
    }

    /// Stop at the edges
    pub fn clamp(&self, agent: &mut Kinematic) {
        agent.position.x = agent.position.x.clamp(0.0, self.width);
        agent.position.y = agent.position.y.clamp(0.0, self.height);
    }

    /// Reflect off the edges
    pub fn bounce(&self, agent: &mut Kinematic) {
        if agent.position.x < 0.0 || agent.position.x > self.width {
            agent.velocity.x = -agent.velocity.x;
        }
        if agent.position.y < 0.0 || agent.position.y > self.height {
            agent.velocity.y = -agent.velocity.y;
        }
        self.clamp(agent);
    }

    /// Reappear on the opposite edge
    pub fn wrap(&self, agent: &mut Kinematic) {
        agent.position.x = agent.position.x.rem_euclid(self.width);
        agent.position.y = agent.position.y.rem_euclid(self.height);
    }
}
