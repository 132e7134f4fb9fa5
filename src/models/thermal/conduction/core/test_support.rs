use uom::si::{
    f64::{HeatFluxDensity, HeatTransfer, Length, ThermalConductivity, ThermodynamicTemperature},
    heat_flux_density::watt_per_square_meter,
    heat_transfer::watt_per_square_meter_kelvin,
    length::meter,
    thermal_conductivity::watt_per_meter_kelvin,
    thermodynamic_temperature::degree_celsius,
};

use crate::support::units::watts_per_cubic_meter;

use super::{BoundaryCondition, Edge, GridPosition, Material, Mesh, MeshConfig, Spacing};

pub(crate) fn celsius(value: f64) -> ThermodynamicTemperature {
    ThermodynamicTemperature::new::<degree_celsius>(value)
}

pub(crate) fn conductivity(k: f64) -> ThermalConductivity {
    ThermalConductivity::new::<watt_per_meter_kelvin>(k)
}

pub(crate) fn h(value: f64) -> HeatTransfer {
    HeatTransfer::new::<watt_per_square_meter_kelvin>(value)
}

pub(crate) fn flux(value: f64) -> HeatFluxDensity {
    HeatFluxDensity::new::<watt_per_square_meter>(value)
}

/// Material with `k` in W/(m·K) and `q_dot` in W/m³.
pub(crate) fn material(k: f64, q_dot: f64) -> Material {
    Material::new(conductivity(k), watts_per_cubic_meter(q_dot)).unwrap()
}

/// Spacing in meters.
pub(crate) fn spacing(dx: f64, dy: f64) -> Spacing {
    Spacing::new(Length::new::<meter>(dx), Length::new::<meter>(dy)).unwrap()
}

pub(crate) fn at(row: usize, col: usize) -> GridPosition {
    GridPosition::new(row, col)
}

/// Solved temperature in °C.
pub(crate) fn temp_c(mesh: &Mesh, row: usize, col: usize) -> f64 {
    mesh.get_node(row, col)
        .unwrap()
        .temperature()
        .unwrap()
        .get::<degree_celsius>()
}

/// A slab with insulated sides, fixed at `bottom_c` on the bottom edge and
/// closed by `top` along the top edge.
///
/// Sides are configured first, so the top and bottom conditions own the corners.
pub(crate) fn slab(
    rows: usize,
    cols: usize,
    delta: f64,
    k: f64,
    q_dot: f64,
    bottom_c: f64,
    top: BoundaryCondition,
) -> MeshConfig {
    MeshConfig::new(rows, cols, spacing(delta, delta), material(k, q_dot))
        .with_boundary(Edge::Left, BoundaryCondition::insulated(Edge::Left))
        .with_boundary(Edge::Right, BoundaryCondition::insulated(Edge::Right))
        .with_boundary(
            Edge::Bottom,
            BoundaryCondition::constant_temperature(celsius(bottom_c)),
        )
        .with_boundary(Edge::Top, top)
}
