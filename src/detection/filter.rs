use std::collections::BTreeMap;

use tracing::trace;

use crate::math::polygon_2d::{polygon_centroid, signed_area_2d};
use crate::math::Point2;
use crate::topology::{EdgeId, VertexId};

use super::adjacency::Network;
use super::DetectedFace;

/// An edge borders at most two faces.
const MAX_EDGE_SIDES: u8 = 2;

struct Candidate {
    vertices: Vec<VertexId>,
    edge_ids: Vec<EdgeId>,
    area: f64,
    centroid: Point2,
}

/// Reduces traced cycles to the set of minimal bounded faces.
///
/// Counter-clockwise traces are outer boundaries and are dropped. The rest
/// are sorted by area and accepted greedily: a face is discarded if it is
/// below `min_area`, repeats an accepted cycle (rotated or reversed), or
/// only uses edge sides already claimed by smaller accepted faces.
pub fn minimal_faces(
    cycles: Vec<Vec<VertexId>>,
    network: &Network,
    min_area: f64,
) -> Vec<DetectedFace> {
    let mut candidates: Vec<Candidate> = Vec::new();

    for cycle in cycles {
        if cycle.len() < 3 {
            trace!(len = cycle.len(), "dropping degenerate cycle");
            continue;
        }
        let Some(points) = cycle
            .iter()
            .map(|&v| network.point(v))
            .collect::<Option<Vec<_>>>()
        else {
            continue;
        };

        let signed = signed_area_2d(&points);
        if signed >= 0.0 {
            trace!(area = signed, "dropping outer boundary");
            continue;
        }
        let area = -signed;
        if area < min_area {
            trace!(area, min_area, "dropping face below minimum area");
            continue;
        }
        let Some(edge_ids) = boundary_edges(&cycle, network) else {
            continue;
        };

        candidates.push(Candidate {
            centroid: polygon_centroid(&points),
            vertices: cycle,
            edge_ids,
            area,
        });
    }

    candidates.sort_by(|a, b| a.area.total_cmp(&b.area));

    let mut covered: BTreeMap<EdgeId, u8> = BTreeMap::new();
    let mut kept: Vec<Candidate> = Vec::new();

    for candidate in candidates {
        if kept.iter().any(|k| same_cycle(&k.vertices, &candidate.vertices)) {
            trace!(area = candidate.area, "dropping duplicate cycle");
            continue;
        }
        let contributes = candidate
            .edge_ids
            .iter()
            .any(|e| covered.get(e).copied().unwrap_or(0) < MAX_EDGE_SIDES);
        if !contributes {
            trace!(area = candidate.area, "dropping composite face");
            continue;
        }
        for &e in &candidate.edge_ids {
            let sides = covered.entry(e).or_insert(0);
            *sides = sides.saturating_add(1);
        }
        kept.push(candidate);
    }

    kept.into_iter()
        .map(|c| DetectedFace {
            edge_ids: c.edge_ids,
            area: c.area,
            centroid: c.centroid,
        })
        .collect()
}

/// Maps each consecutive vertex pair of a closed cycle to its edge.
fn boundary_edges(cycle: &[VertexId], network: &Network) -> Option<Vec<EdgeId>> {
    let n = cycle.len();
    (0..n)
        .map(|i| network.edge_between(cycle[i], cycle[(i + 1) % n]))
        .collect()
}

/// Returns `true` if `b` is a rotation of `a`, forwards or reversed.
fn same_cycle(a: &[VertexId], b: &[VertexId]) -> bool {
    let n = a.len();
    if n != b.len() {
        return false;
    }
    if n == 0 {
        return true;
    }
    b.iter()
        .enumerate()
        .filter(|&(_, &v)| v == a[0])
        .any(|(offset, _)| {
            let forward = (0..n).all(|k| a[k] == b[(offset + k) % n]);
            let backward = (0..n).all(|k| a[k] == b[(offset + n - k) % n]);
            forward || backward
        })
}
