use twine_solvers::equation::bisection;
use uom::si::{f64::TemperatureInterval, temperature_interval::kelvin as delta_kelvin};

/// Solver configuration for matching a probe temperature.
#[derive(Debug, Clone, Copy)]
pub struct GivenTemperatureConfig {
    /// Maximum iteration count for the bisection solve.
    pub max_iters: usize,

    /// Absolute tolerance on the parameter, in its SI unit.
    pub value_abs_tol: f64,

    /// Relative tolerance on the parameter.
    pub value_rel_tol: f64,

    /// Absolute tolerance for the probe temperature residual (probe - target).
    pub temp_tol: TemperatureInterval,
}

impl Default for GivenTemperatureConfig {
    fn default() -> Self {
        Self {
            max_iters: 200,
            value_abs_tol: 1e-12,
            value_rel_tol: 1e-12,
            temp_tol: TemperatureInterval::new::<delta_kelvin>(1e-9),
        }
    }
}

impl GivenTemperatureConfig {
    /// Converts this configuration into a bisection solver configuration.
    pub(super) fn bisection(&self) -> bisection::Config {
        bisection::Config {
            max_iters: self.max_iters,
            x_abs_tol: self.value_abs_tol,
            x_rel_tol: self.value_rel_tol,
            residual_tol: self.temp_tol.get::<delta_kelvin>(),
        }
    }
}
