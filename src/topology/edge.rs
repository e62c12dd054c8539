use super::id::define_id;
use super::vertex::VertexId;

define_id! {
    /// Unique identifier for an edge in the graph store.
    EdgeId
}

/// Default wall thickness for newly drawn edges.
pub const DEFAULT_EDGE_THICKNESS: f64 = 10.0;

/// Line style used when rendering an edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EdgeStyle {
    /// A continuous wall.
    #[default]
    Solid,
    /// A dashed line, e.g. an open partition.
    Dashed,
}

/// An undirected connection ("wall") between two vertices.
///
/// `start` and `end` only record how the edge was drawn; detection treats
/// the edge as undirected.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    /// Identifier of this edge.
    pub id: EdgeId,
    /// First endpoint.
    pub start: VertexId,
    /// Second endpoint.
    pub end: VertexId,
    /// Wall thickness.
    pub thickness: f64,
    /// Rendering style.
    pub style: EdgeStyle,
}

impl Edge {
    /// Creates a solid edge with the default thickness.
    #[must_use]
    pub fn new(id: EdgeId, start: VertexId, end: VertexId) -> Self {
        Self {
            id,
            start,
            end,
            thickness: DEFAULT_EDGE_THICKNESS,
            style: EdgeStyle::Solid,
        }
    }

    #[must_use]
    pub fn with_thickness(mut self, thickness: f64) -> Self {
        self.thickness = thickness;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: EdgeStyle) -> Self {
        self.style = style;
        self
    }

    /// Returns `true` if `vertex` is one of the endpoints.
    #[must_use]
    pub fn touches(&self, vertex: VertexId) -> bool {
        self.start == vertex || self.end == vertex
    }

    /// Returns the endpoint opposite to `vertex`, if `vertex` is an endpoint.
    #[must_use]
    pub fn other(&self, vertex: VertexId) -> Option<VertexId> {
        if self.start == vertex {
            Some(self.end)
        } else if self.end == vertex {
            Some(self.start)
        } else {
            None
        }
    }

    /// Order-independent endpoint pair, used to de-duplicate parallel edges.
    #[must_use]
    pub fn key(&self) -> (VertexId, VertexId) {
        if self.start <= self.end {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        }
    }

    /// Returns `true` if both edges join the same pair of vertices.
    #[must_use]
    pub fn connects(&self, a: VertexId, b: VertexId) -> bool {
        (self.start == a && self.end == b) || (self.start == b && self.end == a)
    }
}
