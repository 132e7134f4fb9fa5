//! Extensions to [`uom`].
//!
//! This crate uses [`uom`] for all physical units. This module adds the
//! quantities conduction models need that [`uom`] does not name directly.
//!
//! ## Volumetric heat generation
//!
//! [`VolumetricHeatRate`] is power per unit volume (W/m³). Build one with
//! [`watts_per_cubic_meter`] or by dividing a power by a volume:
//!
//! ```
//! use twine_conduction::support::units::{VolumetricHeatRate, watts_per_cubic_meter};
//! use uom::si::{f64::{Power, Volume}, power::kilowatt, volume::cubic_meter};
//!
//! let q: VolumetricHeatRate = Power::new::<kilowatt>(10.0) / Volume::new::<cubic_meter>(1.0);
//! assert_eq!(q, watts_per_cubic_meter(1.0e4));
//! ```

use uom::{
    si::{
        ISQ, Quantity, SI,
        f64::{Power, Volume},
        power::watt,
        volume::cubic_meter,
    },
    typenum::{N1, N3, P1, Z0},
};

/// Volumetric heat generation rate, W/m³ in SI.
pub type VolumetricHeatRate = Quantity<ISQ<N1, P1, N3, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Creates a [`VolumetricHeatRate`] from a value in W/m³.
#[must_use]
pub fn watts_per_cubic_meter(value: f64) -> VolumetricHeatRate {
    Power::new::<watt>(value) / Volume::new::<cubic_meter>(1.0)
}

/// Returns the value of a [`VolumetricHeatRate`] in W/m³.
#[must_use]
pub fn in_watts_per_cubic_meter(rate: VolumetricHeatRate) -> f64 {
    rate.value
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{power::kilowatt, volume::liter};

    #[test]
    fn converts_through_power_and_volume() {
        let q: VolumetricHeatRate = Power::new::<kilowatt>(2.0) / Volume::new::<liter>(4.0);
        assert_relative_eq!(in_watts_per_cubic_meter(q), 5.0e5);
    }

    #[test]
    fn heat_sinks_are_negative() {
        let sink = watts_per_cubic_meter(-250.0);
        assert_relative_eq!(in_watts_per_cubic_meter(sink), -250.0);
    }
}
