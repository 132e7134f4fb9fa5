use std::fmt;

use uom::si::{f64::HeatFluxDensity, heat_flux_density::watt_per_square_meter};

use crate::models::thermal::conduction::core::{Edge, LinearEquation, ModelError, Node};

use super::Balance;

/// A constant heat flux across one face of the node.
///
/// Positive flux enters the domain. Only the named face carries flux; any
/// other exposed face of the node is adiabatic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatFlux {
    flux: HeatFluxDensity,
    face: Edge,
}

impl HeatFlux {
    #[must_use]
    pub fn new(flux: HeatFluxDensity, face: Edge) -> Self {
        Self { flux, face }
    }

    /// Zero flux across `face`.
    #[must_use]
    pub fn insulated(face: Edge) -> Self {
        Self::new(HeatFluxDensity::new::<watt_per_square_meter>(0.0), face)
    }

    #[must_use]
    pub fn flux(&self) -> HeatFluxDensity {
        self.flux
    }

    /// The mesh edge the flux crosses.
    #[must_use]
    pub fn face(&self) -> Edge {
        self.face
    }

    pub(super) fn generate_equation(&self, node: &Node) -> Result<LinearEquation, ModelError> {
        let balance = Balance::conduction(node)?;
        let q_in = self.flux.get::<watt_per_square_meter>() * balance.face_length(self.face);

        let mut equation = balance.equation;
        equation.add_constant(q_in);
        Ok(equation)
    }
}

impl fmt::Display for HeatFlux {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "q''={} W/m² ({})",
            self.flux.get::<watt_per_square_meter>(),
            self.face
        )
    }
}
