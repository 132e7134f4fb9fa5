//! Problem formulation for matching a probe temperature.

use std::convert::Infallible;

use twine_core::{EquationProblem, Model};
use uom::si::{f64::ThermodynamicTemperature, thermodynamic_temperature::kelvin};

use crate::models::thermal::conduction::{
    ConductionError, GridPosition, Mesh, MeshConfig, Solution, StateError,
};

use super::{Parameter, ParameterValue};

/// The outcome of a target-temperature search.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeMatch {
    /// Parameter value at which the probe matched.
    pub value: ParameterValue,
    /// Probe temperature at `value`.
    pub temperature: ThermodynamicTemperature,
    /// Full solution at `value`.
    pub solution: Solution,
}

/// Solves the configured mesh for one parameter value and reads the probe.
pub(super) struct ParameterModel<'a> {
    config: &'a MeshConfig,
    probe: GridPosition,
}

impl<'a> ParameterModel<'a> {
    pub(super) fn new(config: &'a MeshConfig, probe: GridPosition) -> Self {
        Self { config, probe }
    }
}

impl Model for ParameterModel<'_> {
    type Input = ParameterValue;
    type Output = ProbeMatch;
    type Error = ConductionError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let mut mesh = Mesh::from_config(self.config)?;
        input.apply(&mut mesh)?;
        mesh.solve()?;

        let solution = mesh.solution()?;
        let temperature = solution
            .temperature_at(self.probe)
            .ok_or(StateError::NodeNotSolved {
                position: self.probe,
            })?;

        Ok(ProbeMatch {
            value: *input,
            temperature,
            solution,
        })
    }
}

/// Residual is `probe - target` in kelvin.
pub(super) struct GivenTemperatureProblem {
    parameter: Parameter,
    target: ThermodynamicTemperature,
}

impl GivenTemperatureProblem {
    pub(super) fn new(parameter: Parameter, target: ThermodynamicTemperature) -> Self {
        Self { parameter, target }
    }
}

impl EquationProblem<1> for GivenTemperatureProblem {
    type Input = ParameterValue;
    type Output = ProbeMatch;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(self.parameter.value(x[0]))
    }

    fn residuals(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        Ok([output.temperature.get::<kelvin>() - self.target.get::<kelvin>()])
    }
}
