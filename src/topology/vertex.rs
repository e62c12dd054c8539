use crate::math::Point2;

use super::id::define_id;

define_id! {
    /// Unique identifier for a vertex in the graph store.
    VertexId
}

/// A 2D point acting as a graph node.
///
/// Vertices are immutable once created; moving one means removing it and
/// adding a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    /// Identifier of this vertex.
    pub id: VertexId,
    /// Position of the vertex.
    pub point: Point2,
}

impl Vertex {
    /// Creates a new vertex at `(x, y)`.
    #[must_use]
    pub fn new(id: VertexId, x: f64, y: f64) -> Self {
        Self {
            id,
            point: Point2::new(x, y),
        }
    }

    /// Creates a new vertex at the given point.
    #[must_use]
    pub fn at(id: VertexId, point: Point2) -> Self {
        Self { id, point }
    }

    #[must_use]
    pub fn x(&self) -> f64 {
        self.point.x
    }

    #[must_use]
    pub fn y(&self) -> f64 {
        self.point.y
    }
}
