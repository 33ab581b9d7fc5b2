use serde::{Deserialize, Serialize};

/// People and vendors are keyed by the roster's BIGSERIAL ids.
pub type DbId = i64;

/// Placed elements get a UUID when they are created from the catalog.
pub type ElementId = uuid::Uuid;

/// A point on the floor plan. Units depend on context: boundary vertices are
/// stored in meters, pointer positions arrive in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Midpoint of the segment `self`..`other`.
    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}
