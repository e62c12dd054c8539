//! Shared fixtures for unit tests.

use std::collections::BTreeMap;

use crate::topology::{Edge, EdgeId, GraphStore, Vertex, VertexId};

/// Builds vertex/edge collections with sequential ids starting at 1.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    vertices: BTreeMap<VertexId, Vertex>,
    edges: BTreeMap<EdgeId, Edge>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex(&mut self, x: f64, y: f64) -> VertexId {
        let id = VertexId(self.vertices.len() as u64 + 1);
        self.vertices.insert(id, Vertex::new(id, x, y));
        id
    }

    pub fn edge(&mut self, a: VertexId, b: VertexId) -> EdgeId {
        let id = EdgeId(self.edges.len() as u64 + 1);
        self.edges.insert(id, Edge::new(id, a, b));
        id
    }

    pub fn edge_id_between(&self, a: VertexId, b: VertexId) -> EdgeId {
        self.edges
            .values()
            .find(|e| e.connects(a, b))
            .map(|e| e.id)
            .unwrap_or_else(|| panic!("no edge between {a} and {b}"))
    }

    pub fn into_parts(self) -> (BTreeMap<VertexId, Vertex>, BTreeMap<EdgeId, Edge>) {
        (self.vertices, self.edges)
    }

    /// Inserts everything into a store, detecting surfaces once per edge.
    pub fn into_store(self) -> GraphStore {
        let mut store = GraphStore::new();
        for vertex in self.vertices.into_values() {
            store.add_vertex(vertex).unwrap_or_else(|e| panic!("{e}"));
        }
        for edge in self.edges.into_values() {
            store.add_edge(edge).unwrap_or_else(|e| panic!("{e}"));
        }
        store
    }
}

/// Two 100×100 rooms sharing the wall between vertices 2 and 5.
///
/// ```text
/// 4 ---- 5 ---- 6
/// |      |      |
/// 1 ---- 2 ---- 3
/// ```
pub fn two_rooms() -> GraphBuilder {
    let mut b = GraphBuilder::new();
    let a = b.vertex(0.0, 0.0);
    let bb = b.vertex(100.0, 0.0);
    let c = b.vertex(200.0, 0.0);
    let d = b.vertex(0.0, 100.0);
    let e = b.vertex(100.0, 100.0);
    let f = b.vertex(200.0, 100.0);
    b.edge(a, bb);
    b.edge(bb, c);
    b.edge(d, e);
    b.edge(e, f);
    b.edge(a, d);
    b.edge(bb, e);
    b.edge(c, f);
    b
}

/// A 200×100 rectangle with a two-segment dead-end chain off one corner.
pub fn rectangle_with_filament() -> GraphBuilder {
    let mut b = GraphBuilder::new();
    let v1 = b.vertex(0.0, 0.0);
    let v2 = b.vertex(200.0, 0.0);
    let v3 = b.vertex(200.0, 100.0);
    let v4 = b.vertex(0.0, 100.0);
    b.edge(v1, v2);
    b.edge(v2, v3);
    b.edge(v3, v4);
    b.edge(v4, v1);
    let t1 = b.vertex(300.0, 150.0);
    let t2 = b.vertex(350.0, 250.0);
    b.edge(v3, t1);
    b.edge(t1, t2);
    b
}

/// A `cols` × `rows` grid of square rooms with side `size`.
pub fn grid(cols: usize, rows: usize, size: f64) -> GraphBuilder {
    let mut b = GraphBuilder::new();
    let mut ids = vec![vec![VertexId::default(); cols + 1]; rows + 1];
    for (r, row) in ids.iter_mut().enumerate() {
        for (c, slot) in row.iter_mut().enumerate() {
            *slot = b.vertex(c as f64 * size, r as f64 * size);
        }
    }
    for r in 0..=rows {
        for c in 0..cols {
            b.edge(ids[r][c], ids[r][c + 1]);
        }
    }
    for r in 0..rows {
        for c in 0..=cols {
            b.edge(ids[r][c], ids[r + 1][c]);
        }
    }
    b
}
