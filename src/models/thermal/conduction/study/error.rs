use thiserror::Error;
use twine_solvers::equation::bisection;
use uom::si::f64::TemperatureInterval;

use crate::models::thermal::conduction::{ConductionError, GridPosition};

/// Errors that can occur during a parameter study.
#[derive(Debug, Error)]
pub enum StudyError {
    /// Building, reconfiguring or solving the mesh failed.
    #[error("conduction solve failed")]
    Conduction(#[from] ConductionError),

    /// The bisection solver encountered an error.
    #[error("bisection solver error")]
    Bisection(#[from] bisection::Error),

    /// The solver reached the iteration limit without converging.
    #[error("solver hit iteration limit: residual={residual:?}")]
    MaxIters {
        /// Smallest probe temperature residual encountered.
        residual: TemperatureInterval,

        /// Iteration count performed by the solver.
        iters: usize,
    },

    /// A probe lies outside the mesh.
    #[error("probe {position} is outside the mesh")]
    ProbeOutOfRange { position: GridPosition },
}
