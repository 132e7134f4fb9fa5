use uom::si::f64::{Length, ThermodynamicTemperature};

use super::{
    BoundaryCondition, ConfigurationError, Direction, GridPosition, LinearEquation, Material,
    ModelError, Neighbors, Spacing, StateError, Unknown,
};

/// A grid point with material properties and an unknown temperature.
///
/// Nodes are owned by a [`Mesh`](super::Mesh); neighbor references are
/// positions in the same mesh, not owned nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    position: GridPosition,
    spacing: Spacing,
    material: Material,
    neighbors: Neighbors,
    boundary_condition: Option<BoundaryCondition>,
    temperature: Option<ThermodynamicTemperature>,
}

impl Node {
    /// Creates an unconnected, unsolved node.
    #[must_use]
    pub fn new(position: GridPosition, spacing: Spacing, material: Material) -> Self {
        Self {
            position,
            spacing,
            material,
            neighbors: Neighbors::default(),
            boundary_condition: None,
            temperature: None,
        }
    }

    #[must_use]
    pub fn position(&self) -> GridPosition {
        self.position
    }

    /// Physical x coordinate, `col · dx`.
    #[must_use]
    pub fn x(&self) -> Length {
        self.spacing.dx() * grid_index(self.position.col)
    }

    /// Physical y coordinate, `row · dy`.
    #[must_use]
    pub fn y(&self) -> Length {
        self.spacing.dy() * grid_index(self.position.row)
    }

    /// The symbolic temperature of this node.
    #[must_use]
    pub fn unknown(&self) -> Unknown {
        Unknown::new(self.position)
    }

    #[must_use]
    pub fn spacing(&self) -> &Spacing {
        &self.spacing
    }

    #[must_use]
    pub fn material(&self) -> &Material {
        &self.material
    }

    #[must_use]
    pub fn neighbors(&self) -> &Neighbors {
        &self.neighbors
    }

    #[must_use]
    pub fn boundary_condition(&self) -> Option<&BoundaryCondition> {
        self.boundary_condition.as_ref()
    }

    /// True if at least one neighbor is absent.
    #[must_use]
    pub fn is_on_perimeter(&self) -> bool {
        self.neighbors.count() < Direction::ALL.len()
    }

    /// Records a directional neighbor.
    ///
    /// Reciprocity is not checked; the caller sets both directions.
    pub fn set_neighbor(&mut self, direction: Direction, neighbor: Option<GridPosition>) {
        self.neighbors.set(direction, neighbor);
    }

    /// Checks whether `bc` may be assigned to this node.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InteriorNode`] if the node has all four
    /// neighbors, or [`ConfigurationError::OrientationMismatch`] if the
    /// condition's face is not an exposed face of this node.
    pub fn check_boundary_condition(&self, bc: &BoundaryCondition) -> Result<(), ConfigurationError> {
        if !self.is_on_perimeter() {
            return Err(ConfigurationError::InteriorNode {
                position: self.position,
            });
        }
        if let Some(face) = bc.face() {
            if self.neighbors.get(face.outward()).is_some() {
                return Err(ConfigurationError::OrientationMismatch {
                    position: self.position,
                    face,
                });
            }
        }
        Ok(())
    }

    /// Assigns a boundary condition, returning the one it replaced.
    ///
    /// The last assignment wins.
    ///
    /// # Errors
    ///
    /// Fails as [`Node::check_boundary_condition`] does; the node is unchanged on error.
    pub fn set_boundary_condition(
        &mut self,
        bc: BoundaryCondition,
    ) -> Result<Option<BoundaryCondition>, ConfigurationError> {
        self.check_boundary_condition(&bc)?;
        Ok(self.boundary_condition.replace(bc))
    }

    /// Produces this node's balance equation.
    ///
    /// Interior nodes use the five-point stencil written as a balance over the
    /// full `dx × dy` cell, per unit depth:
    /// `k·dy(T_L + T_R − 2T)/dx + k·dx(T_U + T_D − 2T)/dy + q̇·dx·dy = 0`.
    /// This matches the partial-cell balances of boundary nodes, so every row
    /// of the assembled system is in W/m. Boundary nodes delegate to their
    /// boundary condition.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::MissingNeighbor`] if a node without a boundary
    /// condition lacks a neighbor, or any error from the boundary condition.
    pub fn generate_equation(&self) -> Result<LinearEquation, ModelError> {
        if let Some(bc) = &self.boundary_condition {
            return bc.generate_equation(self);
        }

        let k = self.material.k();
        let dx = self.spacing.along(Direction::Left);
        let dy = self.spacing.along(Direction::Up);
        let mut equation = LinearEquation::new(self.unknown());
        for direction in Direction::ALL {
            let neighbor = self
                .neighbors
                .get(direction)
                .ok_or(ModelError::MissingNeighbor {
                    position: self.position,
                    direction,
                })?;
            let conductance = if direction.is_horizontal() {
                k * dy / dx
            } else {
                k * dx / dy
            };
            equation.add_link(Unknown::new(neighbor), conductance);
        }
        equation.add_constant(self.material.q_dot() * dx * dy);
        Ok(equation)
    }

    /// The solved temperature.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::NodeNotSolved`] before a successful solve.
    pub fn temperature(&self) -> Result<ThermodynamicTemperature, StateError> {
        self.temperature.ok_or(StateError::NodeNotSolved {
            position: self.position,
        })
    }

    pub(super) fn set_temperature(&mut self, temperature: ThermodynamicTemperature) {
        self.temperature = Some(temperature);
    }

    pub(super) fn set_material(&mut self, material: Material) {
        self.material = material;
    }

    pub(super) fn boundary_condition_mut(&mut self) -> Option<&mut BoundaryCondition> {
        self.boundary_condition.as_mut()
    }
}

#[allow(clippy::cast_precision_loss)]
fn grid_index(index: usize) -> f64 {
    index as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{length::meter, thermodynamic_temperature::degree_celsius};

    use crate::models::thermal::conduction::core::{
        Edge,
        test_support::{celsius, material, spacing},
    };

    /// A node at (1, 1) of a 3×3 grid with all four neighbors wired.
    fn interior_node() -> Node {
        let position = GridPosition::new(1, 1);
        let mut node = Node::new(position, spacing(0.5, 0.25), material(2.0, 10.0));
        for direction in Direction::ALL {
            node.set_neighbor(direction, position.step(direction, 3, 3));
        }
        node
    }

    #[test]
    fn physical_position_follows_spacing() {
        let node = interior_node();
        assert_relative_eq!(node.x().get::<meter>(), 0.5);
        assert_relative_eq!(node.y().get::<meter>(), 0.25);
    }

    #[test]
    fn interior_equation_is_five_point_stencil() {
        let node = interior_node();
        let eq = node.generate_equation().unwrap();

        // k·dy/dx = 1, k·dx/dy = 4, q̇·dx·dy = 1.25
        assert_eq!(eq.terms().len(), 5);
        assert_relative_eq!(eq.coefficient(node.unknown()), -10.0);
        assert_relative_eq!(
            eq.coefficient(Unknown::new(GridPosition::new(1, 0))),
            1.0
        );
        assert_relative_eq!(
            eq.coefficient(Unknown::new(GridPosition::new(2, 1))),
            4.0
        );
        assert_relative_eq!(eq.rhs(), -1.25);
    }

    #[test]
    fn interior_node_missing_neighbor_is_a_model_error() {
        let mut node = interior_node();
        node.set_neighbor(Direction::Right, None);

        // Perimeter membership changed, but no condition was assigned.
        assert_eq!(
            node.generate_equation(),
            Err(ModelError::MissingNeighbor {
                position: GridPosition::new(1, 1),
                direction: Direction::Right,
            })
        );
    }

    #[test]
    fn interior_node_rejects_boundary_conditions() {
        let mut node = interior_node();
        let bc = BoundaryCondition::constant_temperature(celsius(20.0));
        assert_eq!(
            node.set_boundary_condition(bc),
            Err(ConfigurationError::InteriorNode {
                position: GridPosition::new(1, 1)
            })
        );
        assert!(node.boundary_condition().is_none());
    }

    #[test]
    fn face_must_be_exposed() {
        let mut node = interior_node();
        node.set_neighbor(Direction::Left, None);

        let right = BoundaryCondition::insulated(Edge::Right);
        assert!(matches!(
            node.set_boundary_condition(right),
            Err(ConfigurationError::OrientationMismatch {
                face: Edge::Right,
                ..
            })
        ));

        let left = BoundaryCondition::insulated(Edge::Left);
        assert_eq!(node.set_boundary_condition(left), Ok(None));

        let fixed = BoundaryCondition::constant_temperature(celsius(5.0));
        assert_eq!(node.set_boundary_condition(fixed), Ok(Some(left)));
    }

    #[test]
    fn temperature_requires_solve() {
        let mut node = interior_node();
        assert_eq!(
            node.temperature(),
            Err(StateError::NodeNotSolved {
                position: GridPosition::new(1, 1)
            })
        );

        node.set_temperature(celsius(42.0));
        assert_relative_eq!(
            node.temperature().unwrap().get::<degree_celsius>(),
            42.0,
            epsilon = 1e-12
        );
    }
}
