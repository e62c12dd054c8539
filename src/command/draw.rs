use tracing::debug;

use super::{Command, CommandState};
use crate::error::TopologyError;
use crate::math::Point2;
use crate::topology::{
    Edge, EdgeId, EdgeStyle, GraphStore, Surface, Vertex, VertexId, DEFAULT_EDGE_THICKNESS,
};

/// Endpoints closer than this to an existing vertex reuse it.
pub const DEFAULT_SNAP_DISTANCE: f64 = 1e-6;

/// One end of a drawn edge.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Endpoint {
    id: VertexId,
    point: Point2,
    /// `true` if the vertex does not exist yet and is created by the command.
    create: bool,
}

/// Draws a wall between two points as a single undo step.
///
/// Each endpoint either snaps to an existing vertex or creates a new one.
/// Which of the two happens is decided once, at construction; undo removes
/// the edge and exactly the vertices the command created.
#[derive(Debug, Clone)]
pub struct DrawEdgeCommand {
    start: Endpoint,
    end: Endpoint,
    edge_id: EdgeId,
    thickness: f64,
    style: EdgeStyle,
    surfaces_before: Option<Vec<Surface>>,
}

impl DrawEdgeCommand {
    /// Plans an edge from `start` to `end`, snapping with
    /// [`DEFAULT_SNAP_DISTANCE`].
    #[must_use]
    pub fn new(graph: &GraphStore, start: Point2, end: Point2) -> Self {
        Self::with_snap_distance(graph, start, end, DEFAULT_SNAP_DISTANCE)
    }

    /// Plans an edge from `start` to `end`, snapping endpoints to existing
    /// vertices within `snap_distance`.
    #[must_use]
    pub fn with_snap_distance(
        graph: &GraphStore,
        start: Point2,
        end: Point2,
        snap_distance: f64,
    ) -> Self {
        let mut next_vertex = graph.next_vertex_id();
        let mut resolve = |point: Point2| match graph.find_vertex_near(&point, snap_distance) {
            Some(id) => Endpoint {
                id,
                point,
                create: false,
            },
            None => {
                let id = next_vertex;
                next_vertex = next_vertex.next();
                Endpoint {
                    id,
                    point,
                    create: true,
                }
            }
        };
        let start = resolve(start);
        let mut end = resolve(end);
        // Both ends new but within snapping range of each other.
        if start.create && end.create && (end.point - start.point).norm() <= snap_distance {
            end = Endpoint {
                id: start.id,
                ..end
            };
        }

        Self {
            start,
            end,
            edge_id: graph.next_edge_id(),
            thickness: DEFAULT_EDGE_THICKNESS,
            style: EdgeStyle::default(),
            surfaces_before: None,
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

    #[must_use]
    pub fn edge_id(&self) -> EdgeId {
        self.edge_id
    }

    /// Start and end vertex ids, existing or to be created.
    #[must_use]
    pub fn vertex_ids(&self) -> (VertexId, VertexId) {
        (self.start.id, self.end.id)
    }

    /// Whether the start and end vertices are created by this command.
    #[must_use]
    pub fn creates_vertices(&self) -> (bool, bool) {
        (self.start.create, self.end.create)
    }

    /// Both ends resolve to the same vertex; executing does nothing.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.start.id == self.end.id && !self.start.id.is_reserved()
    }

    fn apply(&self, graph: &mut GraphStore) -> Result<Vec<Surface>, TopologyError> {
        for endpoint in [self.start, self.end] {
            if endpoint.create {
                graph.add_vertex(Vertex::at(endpoint.id, endpoint.point))?;
            }
        }
        let edge = Edge::new(self.edge_id, self.start.id, self.end.id)
            .with_thickness(self.thickness)
            .with_style(self.style);
        graph.add_edge(edge)
    }
}

impl Command for DrawEdgeCommand {
    fn execute(&mut self, state: &CommandState) -> CommandState {
        self.surfaces_before = None;
        if self.is_degenerate() {
            debug!(vertex = %self.start.id, "draw edge skipped: both ends on one vertex");
            return state.clone();
        }

        let mut graph = state.graph.clone();
        let before = graph.surfaces_snapshot();
        match self.apply(&mut graph) {
            Ok(created) => {
                debug!(
                    edge = %self.edge_id,
                    created_vertices = u8::from(self.start.create) + u8::from(self.end.create),
                    created_surfaces = created.len(),
                    "edge drawn"
                );
                self.surfaces_before = Some(before);
                state.with_graph(graph)
            }
            Err(err) => {
                debug!(%err, "draw edge skipped");
                state.clone()
            }
        }
    }

    fn undo(&mut self, state: &CommandState) -> CommandState {
        let Some(before) = &self.surfaces_before else {
            return state.clone();
        };
        let mut graph = state.graph.clone();
        graph.take_edge(self.edge_id);
        for endpoint in [self.end, self.start] {
            if endpoint.create {
                graph.take_vertex(endpoint.id);
            }
        }
        graph.restore_surfaces(before.clone());
        let mut next = state.with_graph(graph);
        next.prune_selection();
        next
    }

    fn description(&self) -> String {
        "Draw edge".to_owned()
    }
}
