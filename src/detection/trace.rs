use std::cmp::Ordering;
use std::collections::BTreeSet;

use tracing::warn;

use crate::math::polygon_2d::cross_2d;
use crate::math::{Vector2, TOLERANCE};
use crate::topology::VertexId;

use super::adjacency::Network;

/// Traces every face of the planar network with the right-hand rule.
///
/// Each directed edge is consumed by exactly one face, so an interior wall
/// shows up once in each of the two faces it separates. Bounded faces come
/// out clockwise; the outer boundary of each connected component comes out
/// counter-clockwise.
pub fn trace_faces(network: &Network) -> Vec<Vec<VertexId>> {
    let max_steps = (2 * network.vertex_count()).max(2 * network.directed_edge_count());
    let mut visited: BTreeSet<(VertexId, VertexId)> = BTreeSet::new();
    let mut faces = Vec::new();

    for start in network.directed_edges() {
        if visited.contains(&start) {
            continue;
        }
        if let Some(face) = trace_face(network, start, &mut visited, max_steps) {
            faces.push(face);
        }
    }

    faces
}

/// Walks one face starting at the directed edge `start`.
///
/// Returns the face's vertex sequence, or `None` if the walk cannot close.
fn trace_face(
    network: &Network,
    start: (VertexId, VertexId),
    visited: &mut BTreeSet<(VertexId, VertexId)>,
    max_steps: usize,
) -> Option<Vec<VertexId>> {
    visited.insert(start);
    let mut face = vec![start.0];
    let (mut prev, mut curr) = start;

    for _ in 0..max_steps {
        let next = most_clockwise_turn(network, prev, curr)?;
        if (curr, next) == start {
            return Some(face);
        }
        if !visited.insert((curr, next)) {
            warn!(from = %start.0, to = %start.1, "face trace re-entered a used edge, abandoned");
            return None;
        }
        face.push(curr);
        prev = curr;
        curr = next;
    }

    warn!(
        from = %start.0,
        to = %start.1,
        max_steps,
        "face trace exceeded step bound, abandoned"
    );
    None
}

/// Picks the neighbor of `curr` giving the sharpest right turn when
/// arriving from `prev`.
///
/// Candidates are ranked by counter-clockwise angle measured from the
/// reversed incoming direction; the smallest angle is the most clockwise
/// turn. Falls back to turning back along `prev` only at a dead end.
fn most_clockwise_turn(network: &Network, prev: VertexId, curr: VertexId) -> Option<VertexId> {
    let origin = network.point(curr)?;
    let back = network.point(prev)? - origin;

    let mut best: Option<(VertexId, Vector2)> = None;
    for candidate in network.neighbors(curr) {
        if candidate == prev {
            continue;
        }
        let Some(p) = network.point(candidate) else {
            continue;
        };
        let dir = p - origin;
        let better = match best {
            None => true,
            Some((_, best_dir)) => ccw_angle_cmp(&back, &dir, &best_dir) == Ordering::Less,
        };
        if better {
            best = Some((candidate, dir));
        }
    }

    match best {
        Some((next, _)) => Some(next),
        None if network.has_link(curr, prev) => Some(prev),
        None => None,
    }
}

/// Orders `a` and `b` by counter-clockwise angle from `reference`, in
/// `[0, 2π)`, using only cross and dot products.
fn ccw_angle_cmp(reference: &Vector2, a: &Vector2, b: &Vector2) -> Ordering {
    let half_a = half_plane(reference, a);
    let half_b = half_plane(reference, b);
    if half_a != half_b {
        return half_a.cmp(&half_b);
    }
    if collinear(a, b) {
        return Ordering::Equal;
    }
    if cross_2d(a, b) > 0.0 {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

/// `0` for angles in `[0, π)` from `reference`, `1` for `[π, 2π)`.
fn half_plane(reference: &Vector2, v: &Vector2) -> u8 {
    if collinear(reference, v) {
        if reference.dot(v) > 0.0 {
            0
        } else {
            1
        }
    } else if cross_2d(reference, v) > 0.0 {
        0
    } else {
        1
    }
}

fn collinear(a: &Vector2, b: &Vector2) -> bool {
    cross_2d(a, b).abs() <= TOLERANCE * a.norm() * b.norm()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::polygon_2d::signed_area_2d;
    use crate::math::Point2;
    use crate::test_support::{grid, two_rooms};

    fn v(x: f64, y: f64) -> Vector2 {
        Vector2::new(x, y)
    }

    #[test]
    fn ccw_order_from_reference() {
        let west = v(-1.0, 0.0);
        let south = v(0.0, -1.0);
        let east = v(1.0, 0.0);
        let north = v(0.0, 1.0);
        // From west, counter-clockwise: south, east, north.
        assert_eq!(ccw_angle_cmp(&west, &south, &east), Ordering::Less);
        assert_eq!(ccw_angle_cmp(&west, &east, &north), Ordering::Less);
        assert_eq!(ccw_angle_cmp(&west, &north, &south), Ordering::Greater);
        assert_eq!(ccw_angle_cmp(&west, &west, &south), Ordering::Less);
    }

    #[test]
    fn ccw_order_handles_near_reference_angles() {
        let reference = v(1.0, 0.0);
        let just_above = v(1.0, 1e-6);
        let just_below = v(1.0, -1e-6);
        // Just below the reference is almost a full turn away.
        assert_eq!(ccw_angle_cmp(&reference, &just_above, &just_below), Ordering::Less);
    }

    #[test]
    fn two_rooms_trace_three_faces() {
        let (vertices, edges) = two_rooms().into_parts();
        let network = Network::build(&vertices, &edges);
        let faces = trace_faces(&network);

        // Two rooms plus the outer boundary; every directed edge used once.
        assert_eq!(faces.len(), 3);
        let used: usize = faces.iter().map(Vec::len).sum();
        assert_eq!(used, network.directed_edge_count());

        let areas: Vec<f64> = faces
            .iter()
            .map(|f| {
                let pts: Vec<_> = f.iter().map(|&id| network.point(id).unwrap()).collect();
                signed_area_2d(&pts)
            })
            .collect();
        assert_eq!(areas.iter().filter(|&&a| a < 0.0).count(), 2);
        assert_eq!(areas.iter().filter(|&&a| a > 0.0).count(), 1);
    }

    #[test]
    fn grid_traces_every_cell() {
        let (vertices, edges) = grid(3, 3, 100.0).into_parts();
        let network = Network::build(&vertices, &edges);
        let faces = trace_faces(&network);
        assert_eq!(faces.len(), 10, "nine cells plus the outer boundary");
    }

    #[test]
    fn trace_stops_when_it_re_enters_an_edge() {
        // 2 only leads to 3 and 3 only back to 2: the walk from 1 -> 2
        // bounces between 2 and 3 and never gets back to 1.
        let (a, b, c) = (VertexId(1), VertexId(2), VertexId(3));
        let network = Network::from_raw(
            &[
                (a, Point2::new(-10.0, 0.0)),
                (b, Point2::new(0.0, 0.0)),
                (c, Point2::new(10.0, 0.0)),
            ],
            &[(a, &[b][..]), (b, &[c][..]), (c, &[b][..])],
            &[(a, b), (b, c)],
        );

        let mut visited = BTreeSet::new();
        assert_eq!(trace_face(&network, (a, b), &mut visited, 100), None);
        assert!(visited.contains(&(b, c)));
        assert!(visited.contains(&(c, b)));
        assert!(trace_faces(&network).is_empty());
    }

    #[test]
    fn trace_stops_at_step_bound() {
        let (vertices, edges) = two_rooms().into_parts();
        let network = Network::build(&vertices, &edges);
        let start = network.directed_edges().next().unwrap();

        let mut visited = BTreeSet::new();
        assert_eq!(trace_face(&network, start, &mut visited, 2), None);

        let bound = 2 * network.directed_edge_count();
        let face = trace_face(&network, start, &mut BTreeSet::new(), bound).unwrap();
        assert!(face.len() > 2);
    }
}
