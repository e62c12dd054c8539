//! Stable identity for detected surfaces.
//!
//! Detection output carries no ids. The resolver matches each detected face
//! against the previously known surfaces by edge-set signature, so a room
//! keeps its id, name and fill for as long as its set of walls is unchanged.

use std::collections::{BTreeMap, HashMap};

use tracing::{trace, warn};

use crate::detection::DetectedFace;
use crate::topology::surface::edge_signature;
use crate::topology::{EdgeId, Surface, SurfaceId};

/// Assigns ids to freshly detected faces.
///
/// * A face whose signature matches a previous surface reuses that
///   surface's id, name and fill, with geometry taken from the new face.
/// * Any other face gets a new id (largest previous id plus one, counting
///   up within the pass) and the default name.
/// * Previous surfaces without a matching face are dropped.
/// * Once the next id would be [`SurfaceId::RESERVED`], unmatched faces are
///   dropped with a warning.
///
/// Splitting a room therefore yields two fresh ids, and merging two rooms
/// yields one fresh id.
#[must_use]
pub fn resolve(previous: &BTreeMap<SurfaceId, Surface>, faces: Vec<DetectedFace>) -> Vec<Surface> {
    let mut by_signature: HashMap<Vec<EdgeId>, &Surface> = previous
        .values()
        .map(|s| (s.signature(), s))
        .collect();
    let mut next_id = previous
        .keys()
        .next_back()
        .map_or(SurfaceId(1), |last| last.next());

    faces
        .into_iter()
        .filter_map(|face| {
            let signature = edge_signature(&face.edge_ids);
            if let Some(known) = by_signature.remove(&signature) {
                trace!(surface = %known.id, "surface kept its identity");
                Some(Surface {
                    id: known.id,
                    name: known.name.clone(),
                    edge_ids: face.edge_ids,
                    centroid: face.centroid,
                    area: face.area,
                    fill: known.fill.clone(),
                })
            } else if next_id.is_reserved() {
                warn!(edges = face.edge_ids.len(), "surface ids exhausted, face dropped");
                None
            } else {
                let id = next_id;
                next_id = next_id.next();
                trace!(surface = %id, "new surface");
                Some(Surface {
                    id,
                    name: Surface::default_name(id),
                    edge_ids: face.edge_ids,
                    centroid: face.centroid,
                    area: face.area,
                    fill: None,
                })
            }
        })
        .collect()
}
