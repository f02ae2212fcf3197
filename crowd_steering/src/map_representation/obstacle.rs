use crate::Point;

/// A static circular obstacle. Passive, read-only data.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Obstacle {
    pub position: Point,
    pub radius: f64,
}

impl Obstacle {
    pub fn new(position: Point, radius: f64) -> Self {
        Self { position, radius }
    }

    pub fn contains(&self, point: &Point) -> bool {
        (point - self.position).norm() < self.radius
    }
}
