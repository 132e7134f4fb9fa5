//! Boundary conditions for edge nodes.
//!
//! Each condition replaces the interior stencil of the node it is assigned to.
//! [`ConstantTemperature`] pins the node's temperature.
//! [`Convection`] and [`HeatFlux`] close an energy balance over the partial
//! control volume that surrounds an edge or corner node.
//!
//! # Control volumes
//!
//! An edge node owns half a cell toward each present neighbor, so its control
//! volume is `w × h` with `w = Σ dx/2` over present left/right neighbors and
//! `h = Σ dy/2` over present up/down neighbors. Balances are written per unit
//! depth in W/m.

mod constant_temperature;
mod convection;
mod heat_flux;

use std::fmt;

use uom::si::f64::{HeatFluxDensity, HeatTransfer, ThermodynamicTemperature};

use crate::support::constraint::ConstraintResult;

pub use constant_temperature::ConstantTemperature;
pub use convection::Convection;
pub use heat_flux::HeatFlux;

use super::{Direction, Edge, LinearEquation, ModelError, Node, Unknown};

/// A boundary condition owned by one edge node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundaryCondition {
    ConstantTemperature(ConstantTemperature),
    Convection(Convection),
    HeatFlux(HeatFlux),
}

impl BoundaryCondition {
    /// A fixed node temperature.
    #[must_use]
    pub fn constant_temperature(temperature: ThermodynamicTemperature) -> Self {
        Self::ConstantTemperature(ConstantTemperature::new(temperature))
    }

    /// Convective exchange with an ambient fluid.
    ///
    /// # Errors
    ///
    /// Returns an error if `h` is negative or `NaN`.
    pub fn convection(h: HeatTransfer, ambient: ThermodynamicTemperature) -> ConstraintResult<Self> {
        Ok(Self::Convection(Convection::new(h, ambient)?))
    }

    /// A constant heat flux across `face`, positive into the domain.
    #[must_use]
    pub fn heat_flux(flux: HeatFluxDensity, face: Edge) -> Self {
        Self::HeatFlux(HeatFlux::new(flux, face))
    }

    /// An adiabatic `face`.
    #[must_use]
    pub fn insulated(face: Edge) -> Self {
        Self::HeatFlux(HeatFlux::insulated(face))
    }

    /// The mesh edge this condition is oriented toward, if it has one.
    #[must_use]
    pub fn face(&self) -> Option<Edge> {
        match self {
            Self::HeatFlux(flux) => Some(flux.face()),
            Self::ConstantTemperature(_) | Self::Convection(_) => None,
        }
    }

    /// Produces the owning node's equation.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Isolated`] if a balance condition has no neighbor
    /// to conduct to.
    pub fn generate_equation(&self, node: &Node) -> Result<LinearEquation, ModelError> {
        match self {
            Self::ConstantTemperature(bc) => Ok(bc.generate_equation(node)),
            Self::Convection(bc) => bc.generate_equation(node),
            Self::HeatFlux(bc) => bc.generate_equation(node),
        }
    }
}

impl From<ConstantTemperature> for BoundaryCondition {
    fn from(bc: ConstantTemperature) -> Self {
        Self::ConstantTemperature(bc)
    }
}

impl From<Convection> for BoundaryCondition {
    fn from(bc: Convection) -> Self {
        Self::Convection(bc)
    }
}

impl From<HeatFlux> for BoundaryCondition {
    fn from(bc: HeatFlux) -> Self {
        Self::HeatFlux(bc)
    }
}

impl fmt::Display for BoundaryCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConstantTemperature(bc) => fmt::Display::fmt(bc, f),
            Self::Convection(bc) => fmt::Display::fmt(bc, f),
            Self::HeatFlux(bc) => fmt::Display::fmt(bc, f),
        }
    }
}

/// Conduction and generation over an edge node's partial control volume.
struct Balance {
    equation: LinearEquation,
    width: f64,
    height: f64,
}

impl Balance {
    fn conduction(node: &Node) -> Result<Self, ModelError> {
        let neighbors = node.neighbors();
        if neighbors.count() == 0 {
            return Err(ModelError::Isolated {
                position: node.position(),
            });
        }

        let dx = node.spacing().along(Direction::Left);
        let dy = node.spacing().along(Direction::Up);
        let half = |direction: Direction, delta: f64| {
            if neighbors.get(direction).is_some() {
                delta / 2.0
            } else {
                0.0
            }
        };
        let width = half(Direction::Left, dx) + half(Direction::Right, dx);
        let height = half(Direction::Up, dy) + half(Direction::Down, dy);

        let k = node.material().k();
        let mut equation = LinearEquation::new(node.unknown());
        for direction in Direction::ALL {
            let Some(neighbor) = neighbors.get(direction) else {
                continue;
            };
            let conductance = if direction.is_horizontal() {
                k * height / dx
            } else {
                k * width / dy
            };
            equation.add_link(Unknown::new(neighbor), conductance);
        }
        equation.add_constant(node.material().q_dot() * width * height);

        Ok(Self {
            equation,
            width,
            height,
        })
    }

    /// Length of the node's face on `edge`.
    fn face_length(&self, edge: Edge) -> f64 {
        match edge {
            Edge::Top | Edge::Bottom => self.width,
            Edge::Left | Edge::Right => self.height,
        }
    }

    /// Total length of the faces with no neighbor behind them.
    fn exposed_length(&self, node: &Node) -> f64 {
        [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right]
            .into_iter()
            .filter(|edge| node.neighbors().get(edge.outward()).is_none())
            .map(|edge| self.face_length(edge))
            .sum()
    }
}
