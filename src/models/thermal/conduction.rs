//! Steady two-dimensional conduction on a rectangular finite-difference mesh.
//!
//! A [`Mesh`] holds a grid of nodes, each with a material and an optional
//! [`BoundaryCondition`]. Every node contributes one linear energy-balance
//! equation and the resulting system is solved simultaneously for the
//! steady temperature field.
//!
//! [`SteadyConduction`] wraps the whole pipeline as a [`twine_core::Model`]
//! that maps a [`MeshConfig`] to a [`Solution`]. The [`study`] module builds
//! parameter sweeps and target-temperature searches on top of it.
//!
//! The computational core is in the internal `core` module.

mod core;
pub mod study;

pub use self::core::{
    BoundaryCondition, ConductionError, ConfigurationError, ConstantTemperature, Convection,
    Direction, Edge, EdgeCondition, GridPosition, HeatFlux, LinearEquation, LinearSystem,
    Material, Mesh, MeshConfig, MeshState, ModelError, Neighbors, Node, NodeRange, NodeResult,
    Solution, SolveError, Spacing, StateError, Term, Unknown, UnsolvableSystemError,
};

use tracing::debug;
use twine_core::Model;

/// Builds a mesh from its configuration and solves it.
///
/// The model is stateless; every call assembles a fresh mesh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SteadyConduction;

impl Model for SteadyConduction {
    type Input = MeshConfig;
    type Output = Solution;
    type Error = ConductionError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let mut mesh = Mesh::from_config(input)?;
        mesh.solve()?;
        debug!(rows = input.rows, cols = input.cols, "steady conduction solved");
        Ok(mesh.solution()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::thermodynamic_temperature::degree_celsius;

    use crate::models::thermal::conduction::core::test_support::{
        at, celsius, h, material, slab, spacing,
    };

    #[test]
    fn solves_a_configured_slab() {
        let config = slab(
            3,
            3,
            1.0,
            1.0,
            0.0,
            100.0,
            BoundaryCondition::constant_temperature(celsius(0.0)),
        );

        let solution = SteadyConduction.call(&config).unwrap();

        assert_eq!(solution.rows(), 3);
        assert_eq!(solution.cols(), 3);
        for col in 0..3 {
            assert_relative_eq!(
                solution
                    .temperature_at(at(1, col))
                    .unwrap()
                    .get::<degree_celsius>(),
                50.0,
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn matches_a_hand_driven_mesh() {
        let top = BoundaryCondition::convection(h(15.0), celsius(25.0)).unwrap();
        let config = slab(6, 4, 0.05, 0.8, 2.0e4, 60.0, top);

        let mut mesh = Mesh::from_config(&config).unwrap();
        mesh.solve().unwrap();

        assert_eq!(
            SteadyConduction.call(&config).unwrap(),
            mesh.solution().unwrap()
        );
    }

    #[test]
    fn reports_configuration_errors() {
        let config = MeshConfig::new(1, 5, spacing(1.0, 1.0), material(1.0, 0.0));

        assert_eq!(
            SteadyConduction.call(&config),
            Err(ConductionError::Configuration(
                ConfigurationError::InvalidDimensions { rows: 1, cols: 5 }
            ))
        );
    }

    #[test]
    fn reports_unconfigured_edges() {
        let config = MeshConfig::new(3, 3, spacing(1.0, 1.0), material(1.0, 0.0)).with_boundary(
            Edge::Bottom,
            BoundaryCondition::constant_temperature(celsius(10.0)),
        );

        assert!(matches!(
            SteadyConduction.call(&config),
            Err(ConductionError::Solve(SolveError::Model(
                ModelError::MissingNeighbor { .. }
            )))
        ));
    }
}
