//! Parameter studies on a configured mesh.
//!
//! [`sweep`] re-solves one mesh for a list of parameter values and records
//! the temperature at a set of probe nodes. [`given_probe_temperature`]
//! inverts that relationship, searching a bracket of parameter values with
//! bisection until a probe node reaches a target temperature.

mod config;
mod error;
mod problem;

pub use config::GivenTemperatureConfig;
pub use error::StudyError;
pub use problem::ProbeMatch;

use tracing::{debug, warn};
use twine_solvers::equation::bisection;
use uom::si::{
    f64::{HeatTransfer, TemperatureInterval, ThermalConductivity, ThermodynamicTemperature},
    heat_transfer::watt_per_square_meter_kelvin,
    temperature_interval::kelvin as delta_kelvin,
    thermal_conductivity::watt_per_meter_kelvin,
};

use crate::support::units::{VolumetricHeatRate, in_watts_per_cubic_meter, watts_per_cubic_meter};

use super::{ConductionError, ConfigurationError, GridPosition, Mesh, MeshConfig};

use problem::{GivenTemperatureProblem, ParameterModel};

/// A mesh-wide quantity a study can vary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    /// Thermal conductivity of every node, in W/(m·K).
    Conductivity,
    /// Coefficient of every convection condition, in W/(m²·K).
    ConvectionCoefficient,
    /// Volumetric heat generation of every node, in W/m³.
    HeatGeneration,
}

impl Parameter {
    /// Wraps a value given in SI units as a typed [`ParameterValue`].
    #[must_use]
    pub fn value(self, si: f64) -> ParameterValue {
        match self {
            Self::Conductivity => ParameterValue::Conductivity(
                ThermalConductivity::new::<watt_per_meter_kelvin>(si),
            ),
            Self::ConvectionCoefficient => ParameterValue::ConvectionCoefficient(
                HeatTransfer::new::<watt_per_square_meter_kelvin>(si),
            ),
            Self::HeatGeneration => ParameterValue::HeatGeneration(watts_per_cubic_meter(si)),
        }
    }
}

/// One value of a [`Parameter`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParameterValue {
    Conductivity(ThermalConductivity),
    ConvectionCoefficient(HeatTransfer),
    HeatGeneration(VolumetricHeatRate),
}

impl ParameterValue {
    #[must_use]
    pub fn parameter(&self) -> Parameter {
        match self {
            Self::Conductivity(_) => Parameter::Conductivity,
            Self::ConvectionCoefficient(_) => Parameter::ConvectionCoefficient,
            Self::HeatGeneration(_) => Parameter::HeatGeneration,
        }
    }

    /// The value in SI units, the inverse of [`Parameter::value`].
    #[must_use]
    pub fn si_value(&self) -> f64 {
        match self {
            Self::Conductivity(k) => k.get::<watt_per_meter_kelvin>(),
            Self::ConvectionCoefficient(h) => h.get::<watt_per_square_meter_kelvin>(),
            Self::HeatGeneration(q_dot) => in_watts_per_cubic_meter(*q_dot),
        }
    }

    /// Reconfigures `mesh` with this value.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if the value violates the
    /// parameter's constraint.
    pub fn apply(&self, mesh: &mut Mesh) -> Result<(), ConfigurationError> {
        match *self {
            Self::Conductivity(k) => mesh.set_conductivity(k),
            Self::HeatGeneration(q_dot) => mesh.set_heat_generation(q_dot),
            Self::ConvectionCoefficient(h) => {
                if mesh.set_convection_coefficient(h)? == 0 {
                    warn!("mesh has no convection conditions to update");
                }
                Ok(())
            }
        }
    }
}

/// Probe temperatures for one parameter value.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepPoint {
    pub value: ParameterValue,
    /// One temperature per probe, in probe order.
    pub temperatures: Vec<ThermodynamicTemperature>,
}

/// Solves `config` once per value and samples the probe nodes.
///
/// A single mesh is built and reconfigured in place between solves, so the
/// values may mix parameters. Points are returned in input order.
///
/// # Errors
///
/// Returns [`StudyError::ProbeOutOfRange`] for a probe outside the grid, or
/// [`StudyError::Conduction`] if building, reconfiguring or solving fails.
pub fn sweep(
    config: &MeshConfig,
    values: &[ParameterValue],
    probes: &[GridPosition],
) -> Result<Vec<SweepPoint>, StudyError> {
    check_probes(config, probes)?;

    let mut mesh = Mesh::from_config(config).map_err(ConductionError::from)?;
    let points = values
        .iter()
        .map(|value| solve_point(&mut mesh, *value, probes))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(points = points.len(), probes = probes.len(), "sweep complete");
    Ok(points)
}

fn solve_point(
    mesh: &mut Mesh,
    value: ParameterValue,
    probes: &[GridPosition],
) -> Result<SweepPoint, ConductionError> {
    value.apply(mesh)?;
    mesh.solve()?;

    let temperatures = probes
        .iter()
        .map(|&probe| {
            let node = mesh.node(probe)?;
            Ok(node.temperature()?)
        })
        .collect::<Result<Vec<_>, ConductionError>>()?;

    Ok(SweepPoint {
        value,
        temperatures,
    })
}

/// Finds the value of `parameter` at which `probe` reaches `target`.
///
/// Bisection runs over the SI value of the parameter within `bracket`, which
/// must straddle the target. Both bracket ends are applied to the
/// configuration up front, so an invalid bracket is reported as a
/// configuration error rather than a solver failure.
///
/// # Errors
///
/// Returns [`StudyError`] for an invalid probe or bracket, a conduction
/// failure, a bisection failure, or if the iteration limit is reached.
pub fn given_probe_temperature(
    config: &MeshConfig,
    parameter: Parameter,
    bracket: [f64; 2],
    probe: GridPosition,
    target: ThermodynamicTemperature,
    solver: GivenTemperatureConfig,
) -> Result<ProbeMatch, StudyError> {
    check_probes(config, &[probe])?;

    let mut mesh = Mesh::from_config(config).map_err(ConductionError::from)?;
    for end in bracket {
        parameter
            .value(end)
            .apply(&mut mesh)
            .map_err(ConductionError::from)?;
    }

    let model = ParameterModel::new(config, probe);
    let problem = GivenTemperatureProblem::new(parameter, target);

    let solution = bisection::solve(
        &model,
        &problem,
        bracket,
        &solver.bisection(),
        |_: &bisection::Event<'_, _, _>| None,
    )?;

    if solution.status != bisection::Status::Converged {
        return Err(StudyError::MaxIters {
            residual: TemperatureInterval::new::<delta_kelvin>(solution.residual),
            iters: solution.iters,
        });
    }

    debug!(
        ?parameter,
        value = solution.snapshot.output.value.si_value(),
        iters = solution.iters,
        "probe temperature matched"
    );
    Ok(solution.snapshot.output)
}

fn check_probes(config: &MeshConfig, probes: &[GridPosition]) -> Result<(), StudyError> {
    match probes
        .iter()
        .find(|p| p.row >= config.rows || p.col >= config.cols)
    {
        Some(&position) => Err(StudyError::ProbeOutOfRange { position }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::thermodynamic_temperature::degree_celsius;

    use crate::models::thermal::conduction::{
        BoundaryCondition,
        core::test_support::{at, celsius, h, slab},
    };

    fn convecting_slab() -> MeshConfig {
        let top = BoundaryCondition::convection(h(10.0), celsius(20.0)).unwrap();
        slab(5, 4, 0.1, 2.0, 0.0, 150.0, top)
    }

    /// Both ends held at 20 °C with uniform generation over a 1 m slab.
    fn generating_slab(q_dot: f64) -> MeshConfig {
        slab(
            5,
            3,
            0.25,
            2.0,
            q_dot,
            20.0,
            BoundaryCondition::constant_temperature(celsius(20.0)),
        )
    }

    #[test]
    fn probe_temperature_falls_as_h_rises() {
        let values: Vec<_> = [1.0, 5.0, 10.0, 25.0, 50.0, 100.0, 500.0]
            .into_iter()
            .map(|v| Parameter::ConvectionCoefficient.value(v))
            .collect();

        let points = sweep(&convecting_slab(), &values, &[at(4, 1), at(2, 2)]).unwrap();

        assert_eq!(points.len(), values.len());
        for (point, value) in points.iter().zip(&values) {
            assert_eq!(point.value, *value);
            assert_eq!(point.temperatures.len(), 2);
        }
        for pair in points.windows(2) {
            for probe in 0..2 {
                assert!(pair[1].temperatures[probe] < pair[0].temperatures[probe]);
            }
        }
    }

    #[test]
    fn sweep_matches_independent_solves() {
        let config = generating_slab(0.0);
        let values = [100.0, 400.0, 50.0].map(|v| Parameter::HeatGeneration.value(v));

        let points = sweep(&config, &values, &[at(2, 1)]).unwrap();

        // Center of the slab: T = T0 + q/(2k)·y·(L − y) with y = 0.5 m.
        for point in points {
            let q_dot = point.value.si_value();
            assert_relative_eq!(
                point.temperatures[0].get::<degree_celsius>(),
                20.0 + q_dot / 16.0,
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn sweep_rejects_probes_outside_the_grid() {
        let values = [Parameter::Conductivity.value(1.0)];
        assert!(matches!(
            sweep(&convecting_slab(), &values, &[at(0, 0), at(5, 0)]),
            Err(StudyError::ProbeOutOfRange { position }) if position == at(5, 0)
        ));
    }

    #[test]
    fn sweep_reports_invalid_values() {
        let values = [Parameter::Conductivity.value(-1.0)];
        assert!(matches!(
            sweep(&convecting_slab(), &values, &[at(1, 1)]),
            Err(StudyError::Conduction(ConductionError::Configuration(_)))
        ));
    }

    #[test]
    fn si_values_round_trip_through_parameters() {
        for parameter in [
            Parameter::Conductivity,
            Parameter::ConvectionCoefficient,
            Parameter::HeatGeneration,
        ] {
            let value = parameter.value(42.5);
            assert_eq!(value.parameter(), parameter);
            assert_relative_eq!(value.si_value(), 42.5);
        }
    }

    #[test]
    fn recovers_generation_from_center_temperature() {
        let found = given_probe_temperature(
            &generating_slab(0.0),
            Parameter::HeatGeneration,
            [0.0, 1000.0],
            at(2, 1),
            celsius(45.0),
            GivenTemperatureConfig::default(),
        )
        .unwrap();

        assert_eq!(found.value.parameter(), Parameter::HeatGeneration);
        assert_relative_eq!(found.value.si_value(), 400.0, max_relative = 1e-6);
        assert_relative_eq!(
            found.temperature.get::<degree_celsius>(),
            45.0,
            epsilon = 1e-6
        );
        assert_eq!(found.solution.temperature_at(at(2, 1)), Some(found.temperature));
    }

    #[test]
    fn recovers_h_from_a_swept_temperature() {
        let config = convecting_slab();
        let probe = at(4, 1);
        let point = sweep(
            &config,
            &[Parameter::ConvectionCoefficient.value(37.0)],
            &[probe],
        )
        .unwrap()
        .remove(0);

        let found = given_probe_temperature(
            &config,
            Parameter::ConvectionCoefficient,
            [1.0, 200.0],
            probe,
            point.temperatures[0],
            GivenTemperatureConfig::default(),
        )
        .unwrap();

        assert_relative_eq!(found.value.si_value(), 37.0, max_relative = 1e-6);
    }

    #[test]
    fn rejects_an_invalid_bracket() {
        assert!(matches!(
            given_probe_temperature(
                &convecting_slab(),
                Parameter::Conductivity,
                [0.0, 10.0],
                at(2, 2),
                celsius(80.0),
                GivenTemperatureConfig::default(),
            ),
            Err(StudyError::Conduction(ConductionError::Configuration(_)))
        ));
    }

    #[test]
    fn target_outside_the_bracket_fails() {
        // The center can never fall below the 20 °C ends with positive generation.
        let result = given_probe_temperature(
            &generating_slab(0.0),
            Parameter::HeatGeneration,
            [0.0, 1000.0],
            at(2, 1),
            celsius(10.0),
            GivenTemperatureConfig::default(),
        );
        assert!(result.is_err());
    }
}
