//! The node grid, its configuration, and the simultaneous solve.

use nalgebra::DVector;
use tracing::{debug, warn};
use uom::si::{
    f64::{HeatTransfer, ThermalConductivity, ThermodynamicTemperature},
    thermodynamic_temperature::kelvin,
};

use crate::support::{
    constraint::{Constrained, NonNegative},
    units::VolumetricHeatRate,
};

use super::{
    BoundaryCondition, ConfigurationError, Direction, Edge, GridPosition, LinearEquation,
    LinearSystem, Material, MeshConfig, ModelError, Node, NodeRange, NodeResult, Solution,
    SolveError, Spacing, StateError, Unknown,
};

/// Lifecycle of a [`Mesh`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshState {
    /// Freshly built; no boundary conditions yet.
    Unsolved,
    /// Configured since the last successful solve (or never solved).
    Configured,
    /// Every node holds the temperature from the latest solve.
    Solved,
}

/// A rectangular grid of nodes solved simultaneously for steady temperatures.
///
/// Nodes are stored row-major, row 0 at the bottom. The mesh is the sole owner
/// of its nodes; neighbor links are positions into this grid.
///
/// # Example
///
/// ```
/// use twine_conduction::models::thermal::conduction::{
///     BoundaryCondition, Edge, GridPosition, Material, Mesh, Spacing,
/// };
/// use twine_conduction::support::units::watts_per_cubic_meter;
/// use uom::si::{
///     f64::{Length, ThermalConductivity, ThermodynamicTemperature},
///     length::meter,
///     thermal_conductivity::watt_per_meter_kelvin,
///     thermodynamic_temperature::degree_celsius,
/// };
///
/// let spacing = Spacing::uniform(Length::new::<meter>(1.0)).unwrap();
/// let material = Material::new(
///     ThermalConductivity::new::<watt_per_meter_kelvin>(1.0),
///     watts_per_cubic_meter(0.0),
/// )
/// .unwrap();
///
/// let mut mesh = Mesh::new(3, 3, spacing, material).unwrap();
/// mesh.apply_boundary_condition(Edge::Left, |_| BoundaryCondition::insulated(Edge::Left), None)
///     .unwrap();
/// mesh.apply_boundary_condition(Edge::Right, |_| BoundaryCondition::insulated(Edge::Right), None)
///     .unwrap();
/// let hot = ThermodynamicTemperature::new::<degree_celsius>(100.0);
/// let cold = ThermodynamicTemperature::new::<degree_celsius>(0.0);
/// mesh.apply_boundary_condition(Edge::Bottom, |_| BoundaryCondition::constant_temperature(hot), None)
///     .unwrap();
/// mesh.apply_boundary_condition(Edge::Top, |_| BoundaryCondition::constant_temperature(cold), None)
///     .unwrap();
///
/// mesh.solve().unwrap();
///
/// let middle = mesh.get_node(1, 1).unwrap().temperature().unwrap();
/// assert!((middle.get::<degree_celsius>() - 50.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    rows: usize,
    cols: usize,
    spacing: Spacing,
    material: Material,
    nodes: Vec<Node>,
    state: MeshState,
}

impl Mesh {
    /// Builds a `rows` × `cols` grid of nodes with `material` and wires their neighbors.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidDimensions`] if either dimension is below 2.
    pub fn new(
        rows: usize,
        cols: usize,
        spacing: Spacing,
        material: Material,
    ) -> Result<Self, ConfigurationError> {
        if rows < 2 || cols < 2 {
            return Err(ConfigurationError::InvalidDimensions { rows, cols });
        }

        let mut nodes = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                let position = GridPosition::new(row, col);
                let mut node = Node::new(position, spacing, material);
                for direction in Direction::ALL {
                    node.set_neighbor(direction, position.step(direction, rows, cols));
                }
                nodes.push(node);
            }
        }

        Ok(Self {
            rows,
            cols,
            spacing,
            material,
            nodes,
            state: MeshState::Unsolved,
        })
    }

    /// Builds a mesh and applies its edge conditions in order.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] for invalid dimensions or any rejected
    /// edge condition.
    pub fn from_config(config: &MeshConfig) -> Result<Self, ConfigurationError> {
        let mut mesh = Self::new(config.rows, config.cols, config.spacing, config.material)?;
        for bc in &config.boundaries {
            let condition = bc.condition;
            mesh.apply_boundary_condition(bc.edge, |_| condition, bc.range)?;
        }
        Ok(mesh)
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
    pub fn spacing(&self) -> &Spacing {
        &self.spacing
    }

    /// The default material applied to nodes.
    #[must_use]
    pub fn material(&self) -> &Material {
        &self.material
    }

    #[must_use]
    pub fn state(&self) -> MeshState {
        self.state
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.state == MeshState::Solved
    }

    /// All nodes in row-major order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns the node at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::NodeOutOfRange`] outside the grid.
    pub fn get_node(&self, row: usize, col: usize) -> Result<&Node, ConfigurationError> {
        self.node(GridPosition::new(row, col))
    }

    /// Returns the node at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::NodeOutOfRange`] outside the grid.
    pub fn node(&self, position: GridPosition) -> Result<&Node, ConfigurationError> {
        let index = self.index(position)?;
        Ok(&self.nodes[index])
    }

    fn index(&self, position: GridPosition) -> Result<usize, ConfigurationError> {
        if position.row < self.rows && position.col < self.cols {
            Ok(position.row * self.cols + position.col)
        } else {
            Err(ConfigurationError::NodeOutOfRange {
                position,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Assigns a condition built by `factory` to each node along `edge` within `range`.
    ///
    /// A `None` range covers the whole edge. Nodes that already carry a
    /// condition are overwritten, so at a corner shared by two configured
    /// edges the edge applied last wins.
    ///
    /// Every target node is validated before any is modified.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if the range is invalid, a built
    /// condition faces a different edge, or a node rejects its condition.
    pub fn apply_boundary_condition<F>(
        &mut self,
        edge: Edge,
        mut factory: F,
        range: Option<NodeRange>,
    ) -> Result<(), ConfigurationError>
    where
        F: FnMut(GridPosition) -> BoundaryCondition,
    {
        let positions = edge.positions(self.rows, self.cols, range)?;

        let mut assignments = Vec::with_capacity(positions.len());
        for position in positions {
            let bc = factory(position);
            if let Some(face) = bc.face() {
                if face != edge {
                    return Err(ConfigurationError::EdgeMismatch { edge, face });
                }
            }
            let index = self.index(position)?;
            self.nodes[index].check_boundary_condition(&bc)?;
            assignments.push((index, bc));
        }

        for (index, bc) in assignments {
            let node = &mut self.nodes[index];
            if let Some(previous) = node.set_boundary_condition(bc)? {
                debug!(
                    position = %node.position(),
                    %previous,
                    replacement = %bc,
                    "overwrote boundary condition"
                );
            }
        }

        debug!(%edge, ?range, "applied boundary condition");
        self.state = MeshState::Configured;
        Ok(())
    }

    /// Applies `material` to every node and makes it the default.
    pub fn set_material(&mut self, material: Material) {
        self.material = material;
        for node in &mut self.nodes {
            node.set_material(material);
        }
        self.state = MeshState::Configured;
    }

    /// Overrides the material of a single node.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::NodeOutOfRange`] outside the grid.
    pub fn set_node_material(
        &mut self,
        position: GridPosition,
        material: Material,
    ) -> Result<(), ConfigurationError> {
        let index = self.index(position)?;
        self.nodes[index].set_material(material);
        self.state = MeshState::Configured;
        Ok(())
    }

    /// Sets the conductivity of every node, keeping each node's heat generation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::Constraint`] if `k` is not strictly positive.
    pub fn set_conductivity(&mut self, k: ThermalConductivity) -> Result<(), ConfigurationError> {
        self.material = Material::new(k, self.material.heat_generation())?;
        for node in &mut self.nodes {
            let material = Material::new(k, node.material().heat_generation())?;
            node.set_material(material);
        }
        self.state = MeshState::Configured;
        Ok(())
    }

    /// Sets the heat generation of every node, keeping each node's conductivity.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::Constraint`] if `q_dot` is `NaN`.
    pub fn set_heat_generation(
        &mut self,
        q_dot: VolumetricHeatRate,
    ) -> Result<(), ConfigurationError> {
        self.material = Material::new(self.material.conductivity(), q_dot)?;
        for node in &mut self.nodes {
            let material = Material::new(node.material().conductivity(), q_dot)?;
            node.set_material(material);
        }
        self.state = MeshState::Configured;
        Ok(())
    }

    /// Sets the coefficient of every convection condition, returning how many changed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::Constraint`] if `h` is negative or `NaN`.
    pub fn set_convection_coefficient(
        &mut self,
        h: HeatTransfer,
    ) -> Result<usize, ConfigurationError> {
        let h = Constrained::<HeatTransfer, NonNegative>::new(h)?;
        let mut updated = 0;
        for node in &mut self.nodes {
            if let Some(BoundaryCondition::Convection(convection)) = node.boundary_condition_mut() {
                *convection = convection.with_h(h);
                updated += 1;
            }
        }
        self.state = MeshState::Configured;
        Ok(updated)
    }

    /// The unknown of every node, in row-major order.
    #[must_use]
    pub fn unknowns(&self) -> Vec<Unknown> {
        self.nodes.iter().map(Node::unknown).collect()
    }

    /// One equation per node, in row-major order.
    ///
    /// # Errors
    ///
    /// Returns the first [`ModelError`] raised by a node.
    pub fn equations(&self) -> Result<Vec<LinearEquation>, ModelError> {
        self.nodes.iter().map(Node::generate_equation).collect()
    }

    /// The assembled matrix form of the current equations.
    ///
    /// # Errors
    ///
    /// Returns a [`SolveError`] if a node cannot form its equation or the
    /// equations do not form a square system over the mesh's unknowns.
    pub fn linear_system(&self) -> Result<LinearSystem, SolveError> {
        let equations = self.equations()?;
        Ok(LinearSystem::assemble(&equations, &self.unknowns())?)
    }

    /// Derives every node's equation from the current configuration and
    /// solves them simultaneously.
    ///
    /// Solving is all-or-nothing: on error no node temperature changes.
    /// Calling it again re-derives the system and overwrites prior temperatures.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::Model`] if a node cannot form its equation, or
    /// [`SolveError::Unsolvable`] if the system is singular or inconsistent.
    pub fn solve(&mut self) -> Result<(), SolveError> {
        let temperatures = match self.solve_temperatures() {
            Ok(t) => t,
            Err(err) => {
                warn!(error = %err, "conduction solve failed");
                return Err(err);
            }
        };

        for (node, &t) in self.nodes.iter_mut().zip(temperatures.iter()) {
            node.set_temperature(ThermodynamicTemperature::new::<kelvin>(t));
        }
        self.state = MeshState::Solved;
        Ok(())
    }

    /// Assembles and solves the current equations without touching the nodes.
    fn solve_temperatures(&self) -> Result<DVector<f64>, SolveError> {
        let equations = self.equations()?;
        let system = LinearSystem::assemble(&equations, &self.unknowns())?;
        debug!(
            rows = self.rows,
            cols = self.cols,
            unknowns = system.unknowns.len(),
            "solving conduction system"
        );

        let temperatures = system.solve()?;

        let max_residual = equations
            .iter()
            .map(|eq| {
                eq.residual(|unknown| {
                    let p = unknown.position();
                    temperatures[p.row * self.cols + p.col]
                })
                .abs()
            })
            .fold(0.0, f64::max);
        debug!(max_residual, "conduction system solved");

        Ok(temperatures)
    }

    /// The flat solved view of every node.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::MeshNotSolved`] unless the latest configuration has been solved.
    pub fn solution(&self) -> Result<Solution, StateError> {
        if !self.is_solved() {
            return Err(StateError::MeshNotSolved);
        }

        let nodes = self
            .nodes
            .iter()
            .map(|node| {
                Ok(NodeResult {
                    position: node.position(),
                    x: node.x(),
                    y: node.y(),
                    temperature: node.temperature()?,
                    conductivity: node.material().conductivity(),
                    heat_generation: node.material().heat_generation(),
                    boundary_condition: node.boundary_condition().copied(),
                })
            })
            .collect::<Result<Vec<_>, StateError>>()?;

        Ok(Solution::new(self.rows, self.cols, nodes))
    }
}
