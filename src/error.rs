use thiserror::Error;

use crate::topology::{EdgeId, SurfaceId, VertexId};

/// Top-level error type for the floorgraph crate.
#[derive(Debug, Error)]
pub enum FloorgraphError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),
}

/// Errors related to geometric computations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("zero-length segment")]
    ZeroLengthSegment,

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors related to graph store lookups and mutations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TopologyError {
    #[error("vertex {0} not found")]
    VertexNotFound(VertexId),

    #[error("edge {0} not found")]
    EdgeNotFound(EdgeId),

    #[error("surface {0} not found")]
    SurfaceNotFound(SurfaceId),

    #[error("vertex {0} already exists")]
    DuplicateVertex(VertexId),

    #[error("edge {0} already exists")]
    DuplicateEdge(EdgeId),

    #[error("surface {0} already exists")]
    DuplicateSurface(SurfaceId),

    #[error("id {0} is reserved")]
    ReservedId(u64),

    #[error("edge {0} starts and ends at the same vertex")]
    SelfLoop(EdgeId),

    #[error("surface {id} has area {area}, below the minimum of {min}")]
    SurfaceTooSmall { id: SurfaceId, area: f64, min: f64 },

    #[error("invalid surface: {0}")]
    InvalidSurface(String),
}

/// Convenience type alias for results using [`FloorgraphError`].
pub type Result<T> = std::result::Result<T, FloorgraphError>;
