//! Steady-state 2D conduction on a rectangular finite-difference grid.
//!
//! A [`Mesh`] owns a row-major grid of [`Node`]s. Every node contributes one
//! [`LinearEquation`] over the node temperatures: interior nodes use the
//! five-point conduction stencil with generation, and edge nodes delegate to
//! their [`BoundaryCondition`]. The equations are assembled into a dense
//! [`LinearSystem`] and solved simultaneously, and the results are written
//! back into the nodes.

mod boundary;
mod config;
mod equation;
mod error;
mod grid;
mod material;
mod mesh;
mod node;
mod solution;
mod system;

#[cfg(test)]
pub(crate) mod test_support;

pub use boundary::{BoundaryCondition, ConstantTemperature, Convection, HeatFlux};
pub use config::{EdgeCondition, MeshConfig};
pub use equation::{LinearEquation, Term, Unknown};
pub use error::{
    ConductionError, ConfigurationError, ModelError, SolveError, StateError,
    UnsolvableSystemError,
};
pub use grid::{Direction, Edge, GridPosition, Neighbors, NodeRange, Spacing};
pub use material::Material;
pub use mesh::{Mesh, MeshState};
pub use node::Node;
pub use solution::{NodeResult, Solution};
pub use system::LinearSystem;
