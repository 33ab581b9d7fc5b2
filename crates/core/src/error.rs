use crate::types::{DbId, ElementId};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoreError {
    #[error("Element {element_id} is full ({capacity} seats)")]
    CapacityExceeded { element_id: ElementId, capacity: u32 },

    #[error("Polygon must keep at least 3 vertices, has {count}")]
    BelowMinimumVertices { count: usize },

    #[error("Vertex index {index} is out of range for {len} vertices")]
    OutOfRange { index: usize, len: usize },

    #[error("Route has no stops")]
    EmptyRoute,

    #[error("Route playback has not been started")]
    PlaybackNotStarted,

    #[error("Boundary is not a polygon")]
    NotPolygon,

    #[error("Element {element_id} is not an assigned seat-bearing element")]
    NotEligible { element_id: ElementId },

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),
}

impl CoreError {
    /// Shorthand for a missing element.
    pub fn element_not_found(id: ElementId) -> Self {
        Self::NotFound {
            entity: "element",
            id: id.to_string(),
        }
    }

    /// Shorthand for a missing person.
    pub fn person_not_found(id: DbId) -> Self {
        Self::NotFound {
            entity: "person",
            id: id.to_string(),
        }
    }
}
