//! Grid topology: positions, directions, edges, and spacing.

use std::fmt;

use uom::si::{f64::Length, length::meter};

use crate::support::constraint::{Constrained, ConstraintResult, StrictlyPositive};

use super::ConfigurationError;

/// A node's location in the grid.
///
/// Row 0 is the bottom edge and rows increase upward.
/// Column 0 is the left edge and columns increase to the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPosition {
    pub row: usize,
    pub col: usize,
}

impl GridPosition {
    #[must_use]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns the adjacent position in `direction` within a `rows` × `cols` grid.
    ///
    /// Returns `None` when the step would leave the grid.
    #[must_use]
    pub fn step(self, direction: Direction, rows: usize, cols: usize) -> Option<Self> {
        let Self { row, col } = self;
        let next = match direction {
            Direction::Up => Self::new(row + 1, col),
            Direction::Down => Self::new(row.checked_sub(1)?, col),
            Direction::Left => Self::new(row, col.checked_sub(1)?),
            Direction::Right => Self::new(row, col + 1),
        };
        (next.row < rows && next.col < cols).then_some(next)
    }
}

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One of the four stencil directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// True for `Left` and `Right`.
    #[must_use]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// One side of the rectangular mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    /// The direction pointing out of the domain across this edge.
    ///
    /// Nodes on the edge have no neighbor in this direction.
    #[must_use]
    pub fn outward(self) -> Direction {
        match self {
            Self::Top => Direction::Up,
            Self::Bottom => Direction::Down,
            Self::Left => Direction::Left,
            Self::Right => Direction::Right,
        }
    }

    /// Number of nodes along this edge of a `rows` × `cols` grid.
    #[must_use]
    pub fn len(self, rows: usize, cols: usize) -> usize {
        match self {
            Self::Top | Self::Bottom => cols,
            Self::Left | Self::Right => rows,
        }
    }

    /// Positions along this edge selected by `range`, or the whole edge if `None`.
    ///
    /// Indices run along columns for `Top`/`Bottom` and along rows for `Left`/`Right`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidDimensions`] for an empty grid, or
    /// [`ConfigurationError::InvalidRange`] if the range is empty or extends
    /// past the end of the edge.
    pub fn positions(
        self,
        rows: usize,
        cols: usize,
        range: Option<NodeRange>,
    ) -> Result<Vec<GridPosition>, ConfigurationError> {
        if rows == 0 || cols == 0 {
            return Err(ConfigurationError::InvalidDimensions { rows, cols });
        }

        let len = self.len(rows, cols);
        let range = range.unwrap_or(NodeRange::new(0, len));
        if range.start >= range.end || range.end > len {
            return Err(ConfigurationError::InvalidRange {
                edge: self,
                range,
                len,
            });
        }

        Ok((range.start..range.end)
            .map(|i| match self {
                Self::Top => GridPosition::new(rows - 1, i),
                Self::Bottom => GridPosition::new(0, i),
                Self::Left => GridPosition::new(i, 0),
                Self::Right => GridPosition::new(i, cols - 1),
            })
            .collect())
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        };
        f.write_str(name)
    }
}

/// Half-open index range `start..end` along an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeRange {
    pub start: usize,
    pub end: usize,
}

impl NodeRange {
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

impl fmt::Display for NodeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Neighbor lookups into the mesh's node grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Neighbors {
    pub up: Option<GridPosition>,
    pub down: Option<GridPosition>,
    pub left: Option<GridPosition>,
    pub right: Option<GridPosition>,
}

impl Neighbors {
    #[must_use]
    pub fn get(&self, direction: Direction) -> Option<GridPosition> {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    pub fn set(&mut self, direction: Direction, neighbor: Option<GridPosition>) {
        let slot = match direction {
            Direction::Up => &mut self.up,
            Direction::Down => &mut self.down,
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
        };
        *slot = neighbor;
    }

    /// Number of present neighbors.
    #[must_use]
    pub fn count(&self) -> usize {
        Direction::ALL
            .iter()
            .filter(|&&d| self.get(d).is_some())
            .count()
    }
}

/// Node spacing in x (between columns) and y (between rows).
///
/// Both spacings are guaranteed to be strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spacing {
    dx: Length,
    dy: Length,
}

impl Spacing {
    /// Constructs validated spacing.
    ///
    /// # Errors
    ///
    /// Returns an error if either spacing is not strictly positive.
    pub fn new(dx: Length, dy: Length) -> ConstraintResult<Self> {
        let dx = Constrained::<Length, StrictlyPositive>::new(dx)?;
        let dy = Constrained::<Length, StrictlyPositive>::new(dy)?;
        Ok(Self {
            dx: dx.into_inner(),
            dy: dy.into_inner(),
        })
    }

    /// Constructs equal spacing in both directions.
    ///
    /// # Errors
    ///
    /// Returns an error if the spacing is not strictly positive.
    pub fn uniform(delta: Length) -> ConstraintResult<Self> {
        Self::new(delta, delta)
    }

    #[must_use]
    pub fn dx(&self) -> Length {
        self.dx
    }

    #[must_use]
    pub fn dy(&self) -> Length {
        self.dy
    }

    /// Spacing along `direction`, in meters.
    pub(super) fn along(&self, direction: Direction) -> f64 {
        if direction.is_horizontal() {
            self.dx.get::<meter>()
        } else {
            self.dy.get::<meter>()
        }
    }
}
