//! Linear balance equations over node temperatures.

use std::fmt;

use super::GridPosition;

/// The unresolved temperature of the node at a grid position.
///
/// Displays as `T_{row}_{col}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Unknown(GridPosition);

impl Unknown {
    #[must_use]
    pub fn new(position: GridPosition) -> Self {
        Self(position)
    }

    #[must_use]
    pub fn position(self) -> GridPosition {
        self.0
    }
}

impl fmt::Display for Unknown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T_{}_{}", self.0.row, self.0.col)
    }
}

/// A coefficient multiplying one unknown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Term {
    pub unknown: Unknown,
    pub coefficient: f64,
}

/// A linear equation `Σ cᵢ·Tᵢ = rhs` produced by one node.
///
/// Coefficients and the right-hand side are in SI base units with
/// temperatures in kelvin. Each unknown appears in at most one term.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearEquation {
    owner: Unknown,
    terms: Vec<Term>,
    rhs: f64,
}

impl LinearEquation {
    /// Starts an empty equation owned by `owner`.
    #[must_use]
    pub fn new(owner: Unknown) -> Self {
        Self {
            owner,
            terms: Vec::with_capacity(5),
            rhs: 0.0,
        }
    }

    /// Adds `coefficient · unknown` to the left-hand side.
    ///
    /// Coefficients on an unknown that already has a term are summed.
    pub fn add(&mut self, unknown: Unknown, coefficient: f64) {
        match self.terms.iter_mut().find(|t| t.unknown == unknown) {
            Some(term) => term.coefficient += coefficient,
            None => self.terms.push(Term {
                unknown,
                coefficient,
            }),
        }
    }

    /// Adds a constant to the left-hand side (moved to the right-hand side).
    pub fn add_constant(&mut self, constant: f64) {
        self.rhs -= constant;
    }

    /// Adds a conductance `g` linking the owner to `other`: `g·(T_other − T_owner)`.
    pub fn add_link(&mut self, other: Unknown, g: f64) {
        self.add(other, g);
        self.add(self.owner, -g);
    }

    /// The unknown of the node that produced this equation.
    #[must_use]
    pub fn owner(&self) -> Unknown {
        self.owner
    }

    #[must_use]
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    #[must_use]
    pub fn rhs(&self) -> f64 {
        self.rhs
    }

    /// Coefficient on `unknown`, or zero if it does not appear.
    #[must_use]
    pub fn coefficient(&self, unknown: Unknown) -> f64 {
        self.terms
            .iter()
            .find(|t| t.unknown == unknown)
            .map_or(0.0, |t| t.coefficient)
    }

    /// Left-hand side minus right-hand side for the given temperatures.
    pub fn residual(&self, temperature: impl Fn(Unknown) -> f64) -> f64 {
        self.terms
            .iter()
            .map(|t| t.coefficient * temperature(t.unknown))
            .sum::<f64>()
            - self.rhs
    }
}

impl fmt::Display for LinearEquation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            f.write_str("0")?;
        }
        for (i, term) in self.terms.iter().enumerate() {
            let c = term.coefficient;
            match (i, c.is_sign_negative()) {
                (0, false) => write!(f, "{c}·{}", term.unknown)?,
                (0, true) => write!(f, "-{}·{}", -c, term.unknown)?,
                (_, false) => write!(f, " + {c}·{}", term.unknown)?,
                (_, true) => write!(f, " - {}·{}", -c, term.unknown)?,
            }
        }
        write!(f, " = {}", self.rhs)
    }
}
