pub mod edge;
mod id;
pub mod surface;
pub mod validate;
pub mod vertex;

pub use edge::{Edge, EdgeId, EdgeStyle, DEFAULT_EDGE_THICKNESS};
pub use surface::{Surface, SurfaceId, SurfaceUpdate};
pub use validate::ValidationIssue;
pub use vertex::{Vertex, VertexId};

use std::collections::BTreeMap;

use crate::detection::SurfaceDetector;
use crate::error::{GeometryError, Result, TopologyError};
use crate::identity;
use crate::math::distance_2d::{point_to_segment_dist, project_onto_segment};
use crate::math::polygon_2d::{polygon_area, polygon_centroid};
use crate::math::Point2;

/// Split points closer than this (as a fraction of the edge) to an endpoint
/// are rejected.
const SPLIT_MARGIN: f64 = 1e-9;

/// Relative tolerance when checking a hand-inserted surface's area and
/// centroid against its boundary.
const GEOMETRY_MATCH: f64 = 1e-6;

/// Central store that owns all vertices, edges and surfaces.
///
/// Entities reference each other by id. Collections are ordered maps, so
/// iteration (and with it detection and id assignment) is deterministic.
/// Cloning copies the three maps; there is no shared state between clones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphStore {
    vertices: BTreeMap<VertexId, Vertex>,
    edges: BTreeMap<EdgeId, Edge>,
    surfaces: BTreeMap<SurfaceId, Surface>,
    detector: SurfaceDetector,
}

/// Everything `remove_vertex` took out of the store.
#[derive(Debug, Clone, PartialEq)]
pub struct RemovedVertex {
    /// The removed vertex.
    pub vertex: Vertex,
    /// Incident edges removed with it.
    pub edges: Vec<Edge>,
    /// The surface collection as it was before the removal.
    pub surfaces_before: Vec<Surface>,
}

/// Result of splitting an edge in two.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitOutcome {
    /// The edge that was replaced.
    pub original: Edge,
    /// The vertex inserted on it.
    pub vertex: Vertex,
    /// Surfaces created by the re-detection pass.
    pub created: Vec<Surface>,
}

impl GraphStore {
    /// Creates a new, empty graph store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store that detects surfaces with `detector`.
    #[must_use]
    pub fn with_detector(detector: SurfaceDetector) -> Self {
        Self {
            detector,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn detector(&self) -> &SurfaceDetector {
        &self.detector
    }

    // --- Queries ---

    /// Returns the vertex with the given id.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::VertexNotFound` if there is no such vertex.
    pub fn vertex(&self, id: VertexId) -> std::result::Result<&Vertex, TopologyError> {
        self.vertices
            .get(&id)
            .ok_or(TopologyError::VertexNotFound(id))
    }

    /// Returns the edge with the given id.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::EdgeNotFound` if there is no such edge.
    pub fn edge(&self, id: EdgeId) -> std::result::Result<&Edge, TopologyError> {
        self.edges.get(&id).ok_or(TopologyError::EdgeNotFound(id))
    }

    /// Returns the surface with the given id.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::SurfaceNotFound` if there is no such surface.
    pub fn surface(&self, id: SurfaceId) -> std::result::Result<&Surface, TopologyError> {
        self.surfaces
            .get(&id)
            .ok_or(TopologyError::SurfaceNotFound(id))
    }

    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.values()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    pub fn surfaces(&self) -> impl Iterator<Item = &Surface> {
        self.surfaces.values()
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn surface_count(&self) -> usize {
        self.surfaces.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.edges.is_empty() && self.surfaces.is_empty()
    }

    #[must_use]
    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.vertices.contains_key(&id)
    }

    #[must_use]
    pub fn contains_edge(&self, id: EdgeId) -> bool {
        self.edges.contains_key(&id)
    }

    #[must_use]
    pub fn contains_surface(&self, id: SurfaceId) -> bool {
        self.surfaces.contains_key(&id)
    }

    /// The id after the largest vertex id in use.
    #[must_use]
    pub fn next_vertex_id(&self) -> VertexId {
        id::next_after(&self.vertices)
    }

    /// The id after the largest edge id in use.
    #[must_use]
    pub fn next_edge_id(&self) -> EdgeId {
        id::next_after(&self.edges)
    }

    /// The id after the largest surface id in use.
    #[must_use]
    pub fn next_surface_id(&self) -> SurfaceId {
        id::next_after(&self.surfaces)
    }

    /// Edges with `vertex` as one of their endpoints.
    #[must_use]
    pub fn edges_of_vertex(&self, vertex: VertexId) -> Vec<&Edge> {
        self.edges.values().filter(|e| e.touches(vertex)).collect()
    }

    /// Distinct vertices joined to `vertex` by an edge, in id order.
    #[must_use]
    pub fn neighbors(&self, vertex: VertexId) -> Vec<VertexId> {
        let mut out: Vec<VertexId> = self
            .edges
            .values()
            .filter_map(|e| e.other(vertex))
            .filter(|&n| n != vertex)
            .collect();
        out.sort_unstable();
        out.dedup();
        out
    }

    /// The lowest-id edge joining `a` and `b`, in either direction.
    #[must_use]
    pub fn find_edge_between(&self, a: VertexId, b: VertexId) -> Option<&Edge> {
        self.edges.values().find(|e| e.connects(a, b))
    }

    /// Surfaces whose boundary includes `edge`.
    #[must_use]
    pub fn surfaces_with_edge(&self, edge: EdgeId) -> Vec<&Surface> {
        self.surfaces
            .values()
            .filter(|s| s.contains_edge(edge))
            .collect()
    }

    /// The vertex closest to `point` within `max_distance`, if any.
    #[must_use]
    pub fn find_vertex_near(&self, point: &Point2, max_distance: f64) -> Option<VertexId> {
        self.vertices
            .values()
            .map(|v| (v.id, (v.point - *point).norm()))
            .filter(|&(_, d)| d <= max_distance)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    /// The edge closest to `point` within `max_distance`, if any.
    #[must_use]
    pub fn find_edge_near(&self, point: &Point2, max_distance: f64) -> Option<EdgeId> {
        self.edges
            .keys()
            .filter_map(|&id| {
                let (a, b) = self.edge_segment(id).ok()?;
                Some((id, point_to_segment_dist(point, &a, &b)))
            })
            .filter(|&(_, d)| d <= max_distance)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    /// Endpoint positions of an edge, in drawing order.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge or one of its endpoints is missing.
    pub fn edge_segment(&self, id: EdgeId) -> std::result::Result<(Point2, Point2), TopologyError> {
        let edge = self.edge(id)?;
        let a = self.vertex(edge.start)?;
        let b = self.vertex(edge.end)?;
        Ok((a.point, b.point))
    }

    /// Length of an edge.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge or one of its endpoints is missing.
    pub fn edge_length(&self, id: EdgeId) -> std::result::Result<f64, TopologyError> {
        let (a, b) = self.edge_segment(id)?;
        Ok((b - a).norm())
    }

    // --- Vertex mutations ---

    /// Inserts a vertex.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::DuplicateVertex` if the id is taken, or
    /// `TopologyError::ReservedId` for [`VertexId::RESERVED`].
    pub fn add_vertex(&mut self, vertex: Vertex) -> std::result::Result<VertexId, TopologyError> {
        if vertex.id.is_reserved() {
            return Err(TopologyError::ReservedId(vertex.id.get()));
        }
        if self.vertices.contains_key(&vertex.id) {
            return Err(TopologyError::DuplicateVertex(vertex.id));
        }
        let id = vertex.id;
        self.vertices.insert(id, vertex);
        Ok(id)
    }

    /// Removes a vertex together with every incident edge.
    ///
    /// Surfaces are re-detected if any edge went away. Returns `None` (and
    /// changes nothing) if the vertex does not exist.
    pub fn remove_vertex(&mut self, id: VertexId) -> Option<RemovedVertex> {
        let vertex = self.vertices.remove(&id)?;
        let surfaces_before = self.surfaces_snapshot();

        let incident: Vec<EdgeId> = self
            .edges
            .values()
            .filter(|e| e.touches(id))
            .map(|e| e.id)
            .collect();
        let edges: Vec<Edge> = incident
            .iter()
            .filter_map(|e| self.edges.remove(e))
            .collect();

        if !edges.is_empty() {
            self.redetect();
        }

        Some(RemovedVertex {
            vertex,
            edges,
            surfaces_before,
        })
    }

    // --- Edge mutations ---

    /// Inserts an edge and re-detects surfaces.
    ///
    /// Returns the surfaces that did not exist before the insertion.
    ///
    /// # Errors
    ///
    /// Returns an error, leaving the store untouched, if the id is taken,
    /// the edge is a self-loop, or an endpoint is missing.
    pub fn add_edge(&mut self, edge: Edge) -> std::result::Result<Vec<Surface>, TopologyError> {
        self.check_new_edge(&edge)?;
        self.edges.insert(edge.id, edge);
        Ok(self.redetect())
    }

    /// Removes an edge and re-detects surfaces.
    ///
    /// Returns the surfaces that referenced the edge before removal, or an
    /// empty list if the edge does not exist.
    pub fn remove_edge(&mut self, id: EdgeId) -> Vec<Surface> {
        if !self.edges.contains_key(&id) {
            return Vec::new();
        }
        let affected: Vec<Surface> = self.surfaces_with_edge(id).into_iter().cloned().collect();
        self.edges.remove(&id);
        self.redetect();
        affected
    }

    /// Splits an edge at the projection of `at`, inserting a new vertex.
    ///
    /// The edge is replaced by `first` (original start to the new vertex)
    /// and `second` (new vertex to original end), both keeping the original
    /// thickness and style. Surfaces are re-detected once.
    ///
    /// # Errors
    ///
    /// Returns an error, leaving the store untouched, if the edge is missing
    /// or degenerate, an id is taken, or the split point falls on an endpoint.
    pub fn split_edge(
        &mut self,
        edge_id: EdgeId,
        vertex_id: VertexId,
        at: &Point2,
        first: EdgeId,
        second: EdgeId,
    ) -> Result<SplitOutcome> {
        let original = self.edge(edge_id)?.clone();
        if vertex_id.is_reserved() {
            return Err(TopologyError::ReservedId(vertex_id.get()).into());
        }
        if let Some(reserved) = [first, second].into_iter().find(|id| id.is_reserved()) {
            return Err(TopologyError::ReservedId(reserved.get()).into());
        }
        if self.vertices.contains_key(&vertex_id) {
            return Err(TopologyError::DuplicateVertex(vertex_id).into());
        }
        for id in [first, second] {
            if self.edges.contains_key(&id) {
                return Err(TopologyError::DuplicateEdge(id).into());
            }
        }
        if first == second {
            return Err(TopologyError::DuplicateEdge(second).into());
        }

        let (a, b) = self.edge_segment(edge_id)?;
        let (t, foot) = project_onto_segment(at, &a, &b)?;
        if t < SPLIT_MARGIN || t > 1.0 - SPLIT_MARGIN {
            return Err(GeometryError::Degenerate(format!(
                "split point of edge {edge_id} coincides with an endpoint"
            ))
            .into());
        }

        let vertex = Vertex::at(vertex_id, foot);
        self.edges.remove(&edge_id);
        self.vertices.insert(vertex_id, vertex.clone());
        for (id, start, end) in [
            (first, original.start, vertex_id),
            (second, vertex_id, original.end),
        ] {
            let mut half = original.clone();
            half.id = id;
            half.start = start;
            half.end = end;
            self.edges.insert(id, half);
        }

        let created = self.redetect();
        Ok(SplitOutcome {
            original,
            vertex,
            created,
        })
    }

    // --- Surface mutations ---

    /// Re-runs detection and identity resolution on the current network.
    ///
    /// Returns the surfaces that did not exist before.
    pub fn detect_surfaces(&mut self) -> Vec<Surface> {
        self.redetect()
    }

    /// Inserts a surface by hand.
    ///
    /// Area and centroid are checked against the polygon traced by the
    /// boundary edges; the supplied values are kept when they agree.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is taken or reserved, an edge is missing,
    /// the edges do not form a closed chain, or another surface already has
    /// the same boundary (`DuplicateSurface` names that surface). Also fails
    /// if the boundary area is below the detector minimum, or the supplied
    /// area or centroid do not match the boundary.
    pub fn insert_surface(&mut self, surface: Surface) -> std::result::Result<(), TopologyError> {
        if surface.id.is_reserved() {
            return Err(TopologyError::ReservedId(surface.id.get()));
        }
        if self.surfaces.contains_key(&surface.id) {
            return Err(TopologyError::DuplicateSurface(surface.id));
        }
        if let Some(&missing) = surface
            .edge_ids
            .iter()
            .find(|e| !self.edges.contains_key(e))
        {
            return Err(TopologyError::EdgeNotFound(missing));
        }
        if !validate::is_closed_chain(&surface.edge_ids, &self.edges) {
            return Err(TopologyError::InvalidSurface(format!(
                "surface {} boundary is not a closed chain",
                surface.id
            )));
        }
        let signature = surface.signature();
        if let Some(existing) = self.surfaces.values().find(|s| s.signature() == signature) {
            return Err(TopologyError::DuplicateSurface(existing.id));
        }

        let points = validate::boundary_points(&surface.edge_ids, &self.edges, &self.vertices)
            .ok_or_else(|| {
                TopologyError::InvalidSurface(format!(
                    "surface {} boundary references a missing vertex",
                    surface.id
                ))
            })?;
        let area = polygon_area(&points);
        let min = self.detector.min_area();
        if area < min {
            return Err(TopologyError::SurfaceTooSmall {
                id: surface.id,
                area,
                min,
            });
        }
        if !within(surface.area, area, GEOMETRY_MATCH * area) {
            return Err(TopologyError::InvalidSurface(format!(
                "surface {} claims area {}, boundary encloses {area}",
                surface.id, surface.area
            )));
        }
        let centroid = polygon_centroid(&points);
        let offset = (surface.centroid - centroid).norm();
        if !within(offset, 0.0, GEOMETRY_MATCH * area.sqrt()) {
            return Err(TopologyError::InvalidSurface(format!(
                "surface {} centroid is {offset} away from its boundary's centroid",
                surface.id
            )));
        }
        self.surfaces.insert(surface.id, surface);
        Ok(())
    }

    /// Applies a name/fill override to a surface.
    ///
    /// Returns the update that restores the previous values.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::SurfaceNotFound` if there is no such surface.
    pub fn update_surface(
        &mut self,
        id: SurfaceId,
        update: &SurfaceUpdate,
    ) -> std::result::Result<SurfaceUpdate, TopologyError> {
        let surface = self
            .surfaces
            .get_mut(&id)
            .ok_or(TopologyError::SurfaceNotFound(id))?;
        let mut previous = SurfaceUpdate::default();
        if let Some(name) = &update.name {
            previous.name = Some(std::mem::replace(&mut surface.name, name.clone()));
        }
        if let Some(fill) = &update.fill {
            previous.fill = Some(std::mem::replace(&mut surface.fill, fill.clone()));
        }
        Ok(previous)
    }

    /// Removes a surface. Returns `None` if it does not exist.
    pub fn remove_surface(&mut self, id: SurfaceId) -> Option<Surface> {
        self.surfaces.remove(&id)
    }

    /// Removes every vertex, edge and surface. The detector is kept.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.edges.clear();
        self.surfaces.clear();
    }

    // --- Verbatim restore, used by undo. Never triggers detection. ---

    pub(crate) fn surfaces_snapshot(&self) -> Vec<Surface> {
        self.surfaces.values().cloned().collect()
    }

    pub(crate) fn restore_vertex(&mut self, vertex: Vertex) {
        self.vertices.insert(vertex.id, vertex);
    }

    pub(crate) fn restore_edge(&mut self, edge: Edge) {
        self.edges.insert(edge.id, edge);
    }

    pub(crate) fn restore_surface(&mut self, surface: Surface) {
        self.surfaces.insert(surface.id, surface);
    }

    /// Replaces the whole surface collection.
    pub(crate) fn restore_surfaces(&mut self, surfaces: Vec<Surface>) {
        self.surfaces = surfaces.into_iter().map(|s| (s.id, s)).collect();
    }

    pub(crate) fn take_vertex(&mut self, id: VertexId) -> Option<Vertex> {
        self.vertices.remove(&id)
    }

    pub(crate) fn take_edge(&mut self, id: EdgeId) -> Option<Edge> {
        self.edges.remove(&id)
    }

    // --- Internals ---

    fn check_new_edge(&self, edge: &Edge) -> std::result::Result<(), TopologyError> {
        if edge.id.is_reserved() {
            return Err(TopologyError::ReservedId(edge.id.get()));
        }
        if self.edges.contains_key(&edge.id) {
            return Err(TopologyError::DuplicateEdge(edge.id));
        }
        if edge.start == edge.end {
            return Err(TopologyError::SelfLoop(edge.id));
        }
        for vertex in [edge.start, edge.end] {
            if !self.vertices.contains_key(&vertex) {
                return Err(TopologyError::VertexNotFound(vertex));
            }
        }
        Ok(())
    }

    /// Detects faces, resolves identities and replaces the surface
    /// collection. Returns surfaces whose id is new.
    fn redetect(&mut self) -> Vec<Surface> {
        let faces = self.detector.detect(&self.vertices, &self.edges);
        let resolved = identity::resolve(&self.surfaces, faces);
        let created = resolved
            .iter()
            .filter(|s| !self.surfaces.contains_key(&s.id))
            .cloned()
            .collect();
        self.surfaces = resolved.into_iter().map(|s| (s.id, s)).collect();
        created
    }
}

/// `true` if `value` is within `tolerance` of `expected`; `false` for NaN.
fn within(value: f64, expected: f64, tolerance: f64) -> bool {
    (value - expected).abs() <= tolerance
}
