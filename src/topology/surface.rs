use std::collections::BTreeSet;

use crate::math::Point2;

use super::edge::EdgeId;
use super::id::define_id;

define_id! {
    /// Unique identifier for a surface (room) in the graph store.
    SurfaceId
}

/// An enclosed region ("room") bounded by a closed chain of edges.
///
/// Surfaces are derived by detection. Only `name` and `fill` are user
/// overrides; they survive re-detection as long as the boundary keeps the
/// same set of edges.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    /// Identifier of this surface.
    pub id: SurfaceId,
    /// Display name, `"Room {id}"` unless renamed.
    pub name: String,
    /// Boundary edges in cyclic order.
    pub edge_ids: Vec<EdgeId>,
    /// Area-weighted centroid of the boundary polygon.
    pub centroid: Point2,
    /// Unsigned area of the boundary polygon.
    pub area: f64,
    /// Optional fill color (any CSS-style color string).
    pub fill: Option<String>,
}

impl Surface {
    /// Default display name for a surface.
    #[must_use]
    pub fn default_name(id: SurfaceId) -> String {
        format!("Room {id}")
    }

    /// Order-independent fingerprint of the boundary edge set.
    ///
    /// Rotating or reversing `edge_ids` does not change the signature.
    #[must_use]
    pub fn signature(&self) -> Vec<EdgeId> {
        edge_signature(&self.edge_ids)
    }

    /// Returns `true` if `edge` is part of the boundary.
    #[must_use]
    pub fn contains_edge(&self, edge: EdgeId) -> bool {
        self.edge_ids.contains(&edge)
    }
}

/// Canonical sorted, de-duplicated edge list used to match surfaces.
#[must_use]
pub fn edge_signature(edge_ids: &[EdgeId]) -> Vec<EdgeId> {
    edge_ids
        .iter()
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Partial update of a surface's user overrides.
///
/// `None` leaves the field untouched; `fill: Some(None)` clears the fill.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceUpdate {
    pub name: Option<String>,
    pub fill: Option<Option<String>>,
}

impl SurfaceUpdate {
    #[must_use]
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            fill: None,
        }
    }

    #[must_use]
    pub fn fill(fill: Option<String>) -> Self {
        Self {
            name: None,
            fill: Some(fill),
        }
    }

    /// Returns `true` if the update changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.fill.is_none()
    }
}
