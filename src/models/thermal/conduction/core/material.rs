use uom::si::{f64::ThermalConductivity, thermal_conductivity::watt_per_meter_kelvin};

use crate::support::{
    constraint::{Constrained, ConstraintError, ConstraintResult, StrictlyPositive},
    units::{VolumetricHeatRate, in_watts_per_cubic_meter},
};

/// Material properties carried by each node.
///
/// Conductivity is guaranteed to be strictly positive.
/// Heat generation may be zero or negative (a heat sink) but never `NaN`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    conductivity: ThermalConductivity,
    heat_generation: VolumetricHeatRate,
}

impl Material {
    /// Constructs validated material properties.
    ///
    /// # Errors
    ///
    /// Returns an error if `conductivity` is not strictly positive or
    /// `heat_generation` is `NaN`.
    pub fn new(
        conductivity: ThermalConductivity,
        heat_generation: VolumetricHeatRate,
    ) -> ConstraintResult<Self> {
        let conductivity = Constrained::<ThermalConductivity, StrictlyPositive>::new(conductivity)?;
        Self::from_constrained(conductivity, heat_generation)
    }

    /// Constructs material properties from a pre-validated conductivity.
    ///
    /// # Errors
    ///
    /// Returns an error if `heat_generation` is `NaN`.
    pub fn from_constrained(
        conductivity: Constrained<ThermalConductivity, StrictlyPositive>,
        heat_generation: VolumetricHeatRate,
    ) -> ConstraintResult<Self> {
        if heat_generation.value.is_nan() {
            return Err(ConstraintError::NotANumber);
        }
        Ok(Self {
            conductivity: conductivity.into_inner(),
            heat_generation,
        })
    }

    #[must_use]
    pub fn conductivity(&self) -> ThermalConductivity {
        self.conductivity
    }

    #[must_use]
    pub fn heat_generation(&self) -> VolumetricHeatRate {
        self.heat_generation
    }

    /// Conductivity in W/(m·K).
    pub(super) fn k(&self) -> f64 {
        self.conductivity.get::<watt_per_meter_kelvin>()
    }

    /// Heat generation in W/m³.
    pub(super) fn q_dot(&self) -> f64 {
        in_watts_per_cubic_meter(self.heat_generation)
    }
}
