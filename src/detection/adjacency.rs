use std::collections::{BTreeMap, BTreeSet};

use tracing::trace;

use crate::math::{Point2, TOLERANCE};
use crate::topology::{Edge, EdgeId, Vertex, VertexId};

/// Undirected adjacency view of the wall network used for face tracing.
///
/// Parallel edges joining the same vertex pair collapse into one link keyed
/// by the unordered pair; the lowest edge id represents the link.
#[derive(Debug, Clone, Default)]
pub struct Network {
    points: BTreeMap<VertexId, Point2>,
    neighbors: BTreeMap<VertexId, BTreeSet<VertexId>>,
    edge_by_pair: BTreeMap<(VertexId, VertexId), EdgeId>,
}

impl Network {
    /// Builds the network from the store's vertex and edge collections.
    ///
    /// Self-loops, edges with a missing endpoint and zero-length edges are
    /// skipped: none of them can bound a face.
    pub fn build(vertices: &BTreeMap<VertexId, Vertex>, edges: &BTreeMap<EdgeId, Edge>) -> Self {
        let mut network = Self::default();

        for edge in edges.values() {
            if edge.start == edge.end {
                trace!(edge = %edge.id, "skipping self-loop");
                continue;
            }
            let (Some(a), Some(b)) = (vertices.get(&edge.start), vertices.get(&edge.end)) else {
                trace!(edge = %edge.id, "skipping edge with missing endpoint");
                continue;
            };
            if (b.point - a.point).norm() < TOLERANCE {
                trace!(edge = %edge.id, "skipping zero-length edge");
                continue;
            }

            let key = edge.key();
            if network.edge_by_pair.contains_key(&key) {
                trace!(edge = %edge.id, "skipping parallel duplicate edge");
                continue;
            }
            network.edge_by_pair.insert(key, edge.id);
            network.points.insert(a.id, a.point);
            network.points.insert(b.id, b.point);
            network.neighbors.entry(a.id).or_default().insert(b.id);
            network.neighbors.entry(b.id).or_default().insert(a.id);
        }

        network
    }

    /// Strips dead-end chains until every remaining vertex has degree >= 2.
    ///
    /// Returns the number of links removed.
    pub fn prune_filaments(&mut self) -> usize {
        let mut removed = 0;
        let mut worklist: Vec<VertexId> = self
            .neighbors
            .iter()
            .filter(|(_, ns)| ns.len() <= 1)
            .map(|(&v, _)| v)
            .collect();

        while let Some(v) = worklist.pop() {
            let Some(ns) = self.neighbors.get(&v) else {
                continue;
            };
            if ns.len() > 1 {
                continue;
            }
            let tip = ns.iter().next().copied();
            self.neighbors.remove(&v);
            self.points.remove(&v);

            if let Some(n) = tip {
                self.edge_by_pair.remove(&ordered(v, n));
                removed += 1;
                trace!(vertex = %v, neighbor = %n, "pruned filament link");
                if let Some(rest) = self.neighbors.get_mut(&n) {
                    rest.remove(&v);
                    if rest.len() <= 1 {
                        worklist.push(n);
                    }
                }
            }
        }

        removed
    }

    /// Number of vertices still taking part in the network.
    pub fn vertex_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Number of directed edges (two per undirected link).
    pub fn directed_edge_count(&self) -> usize {
        self.edge_by_pair.len() * 2
    }

    /// All directed edges in deterministic order.
    pub fn directed_edges(&self) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
        self.neighbors
            .iter()
            .flat_map(|(&from, ns)| ns.iter().map(move |&to| (from, to)))
    }

    pub fn point(&self, vertex: VertexId) -> Option<Point2> {
        self.points.get(&vertex).copied()
    }

    pub fn neighbors(&self, vertex: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.neighbors
            .get(&vertex)
            .into_iter()
            .flat_map(|ns| ns.iter().copied())
    }

    pub fn has_link(&self, a: VertexId, b: VertexId) -> bool {
        self.edge_by_pair.contains_key(&ordered(a, b))
    }

    /// The edge representing the link between `a` and `b`.
    pub fn edge_between(&self, a: VertexId, b: VertexId) -> Option<EdgeId> {
        self.edge_by_pair.get(&ordered(a, b)).copied()
    }

    /// A network with exactly the given neighbor lists, which need not be
    /// symmetric. `links` are numbered from edge 1 in order.
    #[cfg(test)]
    pub(crate) fn from_raw(
        points: &[(VertexId, Point2)],
        neighbors: &[(VertexId, &[VertexId])],
        links: &[(VertexId, VertexId)],
    ) -> Self {
        Self {
            points: points.iter().copied().collect(),
            neighbors: neighbors
                .iter()
                .map(|&(v, ns)| (v, ns.iter().copied().collect()))
                .collect(),
            edge_by_pair: links
                .iter()
                .zip(1..)
                .map(|(&(a, b), id)| (ordered(a, b), EdgeId(id)))
                .collect(),
        }
    }
}

fn ordered(a: VertexId, b: VertexId) -> (VertexId, VertexId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
