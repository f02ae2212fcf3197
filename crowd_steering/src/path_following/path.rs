use std::f64::consts::TAU;

use crate::error::{require_non_negative, SteeringError, SteeringResult};
use crate::Point;

/// Closed sequence of waypoints. The last waypoint connects back to the
/// first.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<Point>", into = "Vec<Point>"))]
pub struct Path {
    waypoints: Vec<Point>,
}

impl Path {
    pub fn new(waypoints: Vec<Point>) -> SteeringResult<Self> {
        if waypoints.is_empty() {
            return Err(SteeringError::EmptyPath);
        }
        Ok(Self { waypoints })
    }

    /// Evenly spaced waypoints on a circle, starting at angle 0 and advancing
    /// with increasing `y`.
    pub fn circle(center: Point, radius: f64, num_points: usize) -> SteeringResult<Self> {
        require_non_negative("radius", radius)?;
        let waypoints = (0..num_points)
            .map(|i| {
                let angle = TAU * i as f64 / num_points as f64;
                Point::new(
                    center.x + radius * angle.cos(),
                    center.y + radius * angle.sin(),
                )
            })
            .collect();
        Self::new(waypoints)
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Always false; kept for symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn waypoints(&self) -> &[Point] {
        &self.waypoints
    }

    /// Waypoint at `index`, wrapping past the end.
    pub fn waypoint(&self, index: usize) -> Point {
        self.waypoints[index % self.waypoints.len()]
    }

    /// Consecutive waypoint pairs including the closing segment.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        (0..self.waypoints.len()).map(move |i| (self.waypoint(i), self.waypoint(i + 1)))
    }
}

impl TryFrom<Vec<Point>> for Path {
    type Error = SteeringError;

    fn try_from(waypoints: Vec<Point>) -> SteeringResult<Self> {
        Self::new(waypoints)
    }
}

impl From<Path> for Vec<Point> {
    fn from(path: Path) -> Self {
        path.waypoints
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn test_path_serializes_as_waypoint_list() {
        let path = Path::new(vec![Point::new(1f64, 2f64), Point::new(3f64, 4f64)]).unwrap();
        let json = serde_json::to_value(&path).unwrap();
        assert_eq!(json.as_array().map(Vec::len), Some(2));
        let json = json.to_string();
        assert_eq!(serde_json::from_str::<Path>(&json).unwrap(), path);
    }

    #[test]
    fn test_empty_path_fails_to_deserialize() {
        let err = serde_json::from_str::<Path>("[]").unwrap_err();
        assert!(err.to_string().contains("at least one waypoint"), "{err}");
    }
}
