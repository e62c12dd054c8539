//! Planar face detection over the wall network.
//!
//! Detection runs in three phases:
//!
//! 1. `adjacency`: build an undirected adjacency view (parallel and
//!    degenerate edges removed) and strip dead-end filaments.
//! 2. `trace`: walk every directed edge with the right-hand rule so each
//!    face of the planar embedding is traced exactly once.
//! 3. `filter`: discard outer boundaries, tiny faces, duplicates and
//!    composites, leaving the minimal bounded faces.
//!
//! The detector does not assign ids or names; see [`crate::identity`].

mod adjacency;
mod filter;
mod trace;

use std::collections::BTreeMap;

use tracing::debug;

use crate::math::Point2;
use crate::topology::{Edge, EdgeId, Vertex, VertexId};

/// Faces smaller than this (square units) are never reported.
pub const MIN_SURFACE_AREA: f64 = 100.0;

/// A bounded face found by detection, before identity resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedFace {
    /// Boundary edges in cyclic order.
    pub edge_ids: Vec<EdgeId>,
    /// Unsigned area of the boundary polygon.
    pub area: f64,
    /// Area-weighted centroid of the boundary polygon.
    pub centroid: Point2,
}

/// Computes the enclosed regions ("rooms") of a wall network.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceDetector {
    min_area: f64,
}

impl Default for SurfaceDetector {
    fn default() -> Self {
        Self {
            min_area: MIN_SURFACE_AREA,
        }
    }
}

impl SurfaceDetector {
    /// Creates a detector with the default minimum area.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum area a face needs to be reported.
    #[must_use]
    pub fn with_min_area(mut self, min_area: f64) -> Self {
        self.min_area = min_area.max(0.0);
        self
    }

    #[must_use]
    pub fn min_area(&self) -> f64 {
        self.min_area
    }

    /// Detects every minimal bounded face of the given network.
    ///
    /// Cost grows with the number of edges times the average vertex degree;
    /// callers should treat it as proportional to graph size.
    #[must_use]
    pub fn detect(
        &self,
        vertices: &BTreeMap<VertexId, Vertex>,
        edges: &BTreeMap<EdgeId, Edge>,
    ) -> Vec<DetectedFace> {
        let mut network = adjacency::Network::build(vertices, edges);
        let pruned = network.prune_filaments();
        let cycles = trace::trace_faces(&network);
        let traced = cycles.len();
        let faces = filter::minimal_faces(cycles, &network, self.min_area);

        debug!(
            vertices = vertices.len(),
            edges = edges.len(),
            pruned,
            traced,
            faces = faces.len(),
            "surface detection pass"
        );
        faces
    }
}
