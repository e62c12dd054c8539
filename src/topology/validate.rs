use std::collections::BTreeMap;

use thiserror::Error;

use super::{Edge, EdgeId, GraphStore, SurfaceId, Vertex, VertexId};
use crate::math::Point2;

/// A consistency problem reported by [`GraphStore::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationIssue {
    #[error("edge {edge} references missing vertex {vertex}")]
    DanglingEdgeEndpoint { edge: EdgeId, vertex: VertexId },

    #[error("surface {surface} references missing edge {edge}")]
    DanglingSurfaceEdge { surface: SurfaceId, edge: EdgeId },

    #[error("surface {surface} boundary is not a closed chain of edges")]
    OpenBoundary { surface: SurfaceId },

    #[error("surface {surface} has area {area}, below the minimum of {min}")]
    SurfaceTooSmall {
        surface: SurfaceId,
        area: f64,
        min: f64,
    },
}

/// Returns `true` if `edge_ids`, read cyclically, form a closed chain:
/// at least three edges, each sharing a vertex with the next.
pub(crate) fn is_closed_chain(edge_ids: &[EdgeId], edges: &BTreeMap<EdgeId, Edge>) -> bool {
    let n = edge_ids.len();
    if n < 3 {
        return false;
    }
    (0..n).all(|i| {
        match (edges.get(&edge_ids[i]), edges.get(&edge_ids[(i + 1) % n])) {
            (Some(a), Some(b)) => a.touches(b.start) || a.touches(b.end),
            _ => false,
        }
    })
}

/// Corner positions of a closed chain, in chain order.
///
/// Corner `i` is the vertex edge `i` shares with edge `i + 1`. Returns
/// `None` if an edge or a vertex is missing.
pub(crate) fn boundary_points(
    edge_ids: &[EdgeId],
    edges: &BTreeMap<EdgeId, Edge>,
    vertices: &BTreeMap<VertexId, Vertex>,
) -> Option<Vec<Point2>> {
    let n = edge_ids.len();
    (0..n)
        .map(|i| {
            let a = edges.get(&edge_ids[i])?;
            let b = edges.get(&edge_ids[(i + 1) % n])?;
            let corner = if a.touches(b.start) { b.start } else { b.end };
            vertices.get(&corner).map(|v| v.point)
        })
        .collect()
}

impl GraphStore {
    /// Reports dangling references and malformed surfaces.
    ///
    /// Diagnostic only: the store is never modified.
    #[must_use]
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        for edge in self.edges.values() {
            for vertex in [edge.start, edge.end] {
                if !self.vertices.contains_key(&vertex) {
                    issues.push(ValidationIssue::DanglingEdgeEndpoint {
                        edge: edge.id,
                        vertex,
                    });
                }
            }
        }

        let min = self.detector.min_area();
        for surface in self.surfaces.values() {
            let mut dangling = false;
            for &edge in &surface.edge_ids {
                if !self.edges.contains_key(&edge) {
                    dangling = true;
                    issues.push(ValidationIssue::DanglingSurfaceEdge {
                        surface: surface.id,
                        edge,
                    });
                }
            }
            if !dangling && !is_closed_chain(&surface.edge_ids, &self.edges) {
                issues.push(ValidationIssue::OpenBoundary {
                    surface: surface.id,
                });
            }
            if surface.area < min {
                issues.push(ValidationIssue::SurfaceTooSmall {
                    surface: surface.id,
                    area: surface.area,
                    min,
                });
            }
        }

        issues
    }
}
