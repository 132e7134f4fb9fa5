//! Flat view of a solved mesh.

use uom::si::f64::{Length, ThermalConductivity, ThermodynamicTemperature};

use crate::support::units::VolumetricHeatRate;

use super::{BoundaryCondition, GridPosition};

/// Solved state of one node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeResult {
    pub position: GridPosition,
    pub x: Length,
    pub y: Length,
    pub temperature: ThermodynamicTemperature,
    pub conductivity: ThermalConductivity,
    pub heat_generation: VolumetricHeatRate,
    pub boundary_condition: Option<BoundaryCondition>,
}

/// Solved temperatures and properties for every node, in row-major order.
///
/// This is enough to drive a contour plot or a table without touching the mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    rows: usize,
    cols: usize,
    nodes: Vec<NodeResult>,
}

impl Solution {
    pub(super) fn new(rows: usize, cols: usize, nodes: Vec<NodeResult>) -> Self {
        debug_assert_eq!(nodes.len(), rows * cols);
        Self { rows, cols, nodes }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn nodes(&self) -> &[NodeResult] {
        &self.nodes
    }

    #[must_use]
    pub fn node(&self, position: GridPosition) -> Option<&NodeResult> {
        if position.row >= self.rows || position.col >= self.cols {
            return None;
        }
        self.nodes.get(position.row * self.cols + position.col)
    }

    #[must_use]
    pub fn temperature_at(&self, position: GridPosition) -> Option<ThermodynamicTemperature> {
        self.node(position).map(|n| n.temperature)
    }

    /// Temperatures of one row, left to right.
    ///
    /// A row outside the mesh yields nothing.
    pub fn row_temperatures(&self, row: usize) -> impl Iterator<Item = ThermodynamicTemperature> {
        let row_nodes: &[NodeResult] = if row < self.rows {
            &self.nodes[row * self.cols..(row + 1) * self.cols]
        } else {
            &[]
        };
        row_nodes.iter().map(|n| n.temperature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::length::meter;

    use crate::models::thermal::conduction::core::test_support::{
        at, celsius, conductivity, material,
    };

    fn solution(rows: usize, cols: usize) -> Solution {
        let props = material(1.0, 0.0);
        let nodes = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| (row, col)))
            .map(|(row, col)| {
                #[allow(clippy::cast_precision_loss)]
                let t = (10 * row + col) as f64;
                NodeResult {
                    position: at(row, col),
                    x: Length::new::<meter>(0.0),
                    y: Length::new::<meter>(0.0),
                    temperature: celsius(t),
                    conductivity: props.conductivity(),
                    heat_generation: props.heat_generation(),
                    boundary_condition: None,
                }
            })
            .collect();
        Solution::new(rows, cols, nodes)
    }

    #[test]
    fn rows_are_read_left_to_right() {
        let solution = solution(3, 2);
        let middle: Vec<_> = solution.row_temperatures(1).collect();
        assert_eq!(middle, vec![celsius(10.0), celsius(11.0)]);
        assert_eq!(solution.node(at(2, 1)).unwrap().conductivity, conductivity(1.0));
    }

    #[test]
    fn rows_outside_the_mesh_are_empty() {
        let solution = solution(3, 2);
        assert_eq!(solution.row_temperatures(3).count(), 0);
        assert_eq!(solution.row_temperatures(usize::MAX).count(), 0);
        assert!(solution.temperature_at(at(usize::MAX, 0)).is_none());
    }
}
