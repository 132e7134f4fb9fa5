use std::fmt;

use uom::si::{
    f64::{HeatTransfer, ThermodynamicTemperature},
    heat_transfer::watt_per_square_meter_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::{
    models::thermal::conduction::core::{LinearEquation, ModelError, Node},
    support::constraint::{Constrained, ConstraintResult, NonNegative},
};

use super::Balance;

/// Convective exchange `h·(T∞ − T)` across every exposed face of the node.
///
/// A corner node convects across both of its exposed faces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Convection {
    h: HeatTransfer,
    ambient: ThermodynamicTemperature,
}

impl Convection {
    /// Constructs a validated convection condition.
    ///
    /// # Errors
    ///
    /// Returns an error if `h` is negative or `NaN`.
    pub fn new(h: HeatTransfer, ambient: ThermodynamicTemperature) -> ConstraintResult<Self> {
        let h = Constrained::<HeatTransfer, NonNegative>::new(h)?;
        Ok(Self::from_constrained(h, ambient))
    }

    #[must_use]
    pub fn from_constrained(
        h: Constrained<HeatTransfer, NonNegative>,
        ambient: ThermodynamicTemperature,
    ) -> Self {
        Self {
            h: h.into_inner(),
            ambient,
        }
    }

    #[must_use]
    pub fn h(&self) -> HeatTransfer {
        self.h
    }

    #[must_use]
    pub fn ambient(&self) -> ThermodynamicTemperature {
        self.ambient
    }

    /// Returns a copy with a different coefficient.
    #[must_use]
    pub fn with_h(self, h: Constrained<HeatTransfer, NonNegative>) -> Self {
        Self::from_constrained(h, self.ambient)
    }

    pub(super) fn generate_equation(&self, node: &Node) -> Result<LinearEquation, ModelError> {
        let balance = Balance::conduction(node)?;
        let h_a = self.h.get::<watt_per_square_meter_kelvin>() * balance.exposed_length(node);

        let mut equation = balance.equation;
        equation.add(node.unknown(), -h_a);
        equation.add_constant(h_a * self.ambient.get::<kelvin>());
        Ok(equation)
    }
}

impl fmt::Display for Convection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "h={} W/m²·K, T∞={} K",
            self.h.get::<watt_per_square_meter_kelvin>(),
            self.ambient.get::<kelvin>()
        )
    }
}
