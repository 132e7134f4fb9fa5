use thiserror::Error;

use crate::support::constraint::ConstraintError;

use super::{Direction, Edge, GridPosition, NodeRange, Unknown};

/// Invalid or conflicting mesh configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    /// The mesh needs at least two nodes along each axis.
    #[error("mesh must be at least 2x2, got {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },

    /// A grid position outside the mesh was requested.
    #[error("node {position} is outside the {rows}x{cols} mesh")]
    NodeOutOfRange {
        position: GridPosition,
        rows: usize,
        cols: usize,
    },

    /// A node range is empty or runs past the end of its edge.
    #[error("range {range} is invalid for the {edge} edge of length {len}")]
    InvalidRange {
        edge: Edge,
        range: NodeRange,
        len: usize,
    },

    /// A boundary condition was assigned to a node with all four neighbors.
    #[error("node {position} is interior and cannot carry a boundary condition")]
    InteriorNode { position: GridPosition },

    /// A boundary condition's face is not an exposed face of its node.
    #[error("node {position} does not lie on the {face} edge")]
    OrientationMismatch { position: GridPosition, face: Edge },

    /// A boundary condition's face differs from the edge it was applied to.
    #[error("a {face}-facing boundary condition cannot be applied to the {edge} edge")]
    EdgeMismatch { edge: Edge, face: Edge },

    /// A numeric input violated its constraint.
    #[error("invalid parameter: {0}")]
    Constraint(#[from] ConstraintError),
}

/// A node cannot form a valid equation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// An interior node is missing a neighbor, which means the grid was wired wrong.
    #[error("interior node {position} has no {direction:?} neighbor")]
    MissingNeighbor {
        position: GridPosition,
        direction: Direction,
    },

    /// A balance boundary condition has no neighbor to conduct to.
    #[error("boundary node {position} has no neighbors to conduct to")]
    Isolated { position: GridPosition },
}

/// The assembled system cannot be solved.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnsolvableSystemError {
    #[error("system is not square: {equations} equations for {unknowns} unknowns")]
    NotSquare { equations: usize, unknowns: usize },

    #[error("{unknown} appears in an equation but is not a system unknown")]
    ForeignUnknown { unknown: Unknown },

    #[error("{unknown} does not appear in any equation")]
    OrphanUnknown { unknown: Unknown },

    #[error("system is singular (pivot ratio {pivot_ratio:e})")]
    Singular { pivot_ratio: f64 },

    #[error("solve produced a non-finite value for {unknown}")]
    NonFinite { unknown: Unknown },
}

/// A result was requested before a successful solve.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("node {position} has not been solved")]
    NodeNotSolved { position: GridPosition },

    #[error("mesh has not been solved since its last configuration change")]
    MeshNotSolved,
}

/// Errors that can occur while solving a mesh.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    #[error("equation generation failed")]
    Model(#[from] ModelError),

    #[error("linear solve failed")]
    Unsolvable(#[from] UnsolvableSystemError),
}

/// Any failure of the conduction model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConductionError {
    #[error("invalid configuration")]
    Configuration(#[from] ConfigurationError),

    #[error("solve failed")]
    Solve(#[from] SolveError),

    #[error("result unavailable")]
    State(#[from] StateError),
}
