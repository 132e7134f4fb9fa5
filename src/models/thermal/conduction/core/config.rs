use super::{BoundaryCondition, Edge, Material, NodeRange, Spacing};

/// Everything needed to build a [`Mesh`](super::Mesh).
///
/// Edge conditions are applied in order, so a later entry overwrites an
/// earlier one wherever their nodes overlap (typically at corners).
#[derive(Debug, Clone, PartialEq)]
pub struct MeshConfig {
    /// Number of node rows (y direction), at least 2.
    pub rows: usize,

    /// Number of node columns (x direction), at least 2.
    pub cols: usize,

    /// Node spacing.
    pub spacing: Spacing,

    /// Material applied to every node.
    pub material: Material,

    /// Boundary conditions in application order.
    pub boundaries: Vec<EdgeCondition>,
}

/// A boundary condition applied along (part of) one mesh edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeCondition {
    pub edge: Edge,
    pub condition: BoundaryCondition,

    /// Sub-range of the edge, or the whole edge if `None`.
    pub range: Option<NodeRange>,
}

impl MeshConfig {
    #[must_use]
    pub fn new(rows: usize, cols: usize, spacing: Spacing, material: Material) -> Self {
        Self {
            rows,
            cols,
            spacing,
            material,
            boundaries: Vec::new(),
        }
    }

    /// Appends a condition covering the whole `edge`.
    #[must_use]
    pub fn with_boundary(self, edge: Edge, condition: BoundaryCondition) -> Self {
        self.push_boundary(edge, condition, None)
    }

    /// Appends a condition covering `range` along `edge`.
    #[must_use]
    pub fn with_boundary_range(
        self,
        edge: Edge,
        condition: BoundaryCondition,
        range: NodeRange,
    ) -> Self {
        self.push_boundary(edge, condition, Some(range))
    }

    fn push_boundary(
        mut self,
        edge: Edge,
        condition: BoundaryCondition,
        range: Option<NodeRange>,
    ) -> Self {
        self.boundaries.push(EdgeCondition {
            edge,
            condition,
            range,
        });
        self
    }
}
