use std::fmt;

use uom::si::{f64::ThermodynamicTemperature, thermodynamic_temperature::kelvin};

use crate::models::thermal::conduction::core::{LinearEquation, Node};

/// Pins a node to a fixed temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantTemperature {
    temperature: ThermodynamicTemperature,
}

impl ConstantTemperature {
    #[must_use]
    pub fn new(temperature: ThermodynamicTemperature) -> Self {
        Self { temperature }
    }

    #[must_use]
    pub fn temperature(&self) -> ThermodynamicTemperature {
        self.temperature
    }

    /// `T = value`, independent of neighbors.
    pub(super) fn generate_equation(&self, node: &Node) -> LinearEquation {
        let mut equation = LinearEquation::new(node.unknown());
        equation.add(node.unknown(), 1.0);
        equation.add_constant(-self.temperature.get::<kelvin>());
        equation
    }
}

impl fmt::Display for ConstantTemperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T={} K", self.temperature.get::<kelvin>())
    }
}
