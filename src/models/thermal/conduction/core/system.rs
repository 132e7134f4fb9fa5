//! Dense linear system assembly and solve.

use std::collections::HashMap;

use nalgebra::{DMatrix, DVector};

use super::{LinearEquation, UnsolvableSystemError, Unknown};

/// The matrix form `A·T = b` of a set of node equations.
///
/// Row `i` of the matrix is the `i`th equation; column `j` is `unknowns[j]`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSystem {
    pub matrix: DMatrix<f64>,
    pub unknowns: Vec<Unknown>,
    pub rhs: DVector<f64>,
}

impl LinearSystem {
    /// Assembles equations into a square system over `unknowns`.
    ///
    /// # Errors
    ///
    /// Returns an [`UnsolvableSystemError`] if the equation and unknown counts
    /// differ, an equation references an unknown outside the system, or an
    /// unknown appears in no equation.
    pub fn assemble(
        equations: &[LinearEquation],
        unknowns: &[Unknown],
    ) -> Result<Self, UnsolvableSystemError> {
        let n = unknowns.len();
        if equations.len() != n {
            return Err(UnsolvableSystemError::NotSquare {
                equations: equations.len(),
                unknowns: n,
            });
        }

        let columns: HashMap<Unknown, usize> =
            unknowns.iter().enumerate().map(|(j, &u)| (u, j)).collect();
        let mut referenced = vec![false; n];

        let mut matrix = DMatrix::<f64>::zeros(n, n);
        let mut rhs = DVector::<f64>::zeros(n);

        for (i, equation) in equations.iter().enumerate() {
            for term in equation.terms() {
                let &j = columns
                    .get(&term.unknown)
                    .ok_or(UnsolvableSystemError::ForeignUnknown {
                        unknown: term.unknown,
                    })?;
                matrix[(i, j)] += term.coefficient;
                referenced[j] |= term.coefficient != 0.0;
            }
            rhs[i] = equation.rhs();
        }

        if let Some(j) = referenced.iter().position(|&r| !r) {
            return Err(UnsolvableSystemError::OrphanUnknown {
                unknown: unknowns[j],
            });
        }

        Ok(Self {
            matrix,
            unknowns: unknowns.to_vec(),
            rhs,
        })
    }

    /// Solves the system by LU decomposition with partial pivoting.
    ///
    /// Each row is scaled by its largest coefficient before factoring, so the
    /// singularity test compares pivots of comparable magnitude.
    ///
    /// # Errors
    ///
    /// Returns [`UnsolvableSystemError::Singular`] if the smallest pivot is
    /// negligible relative to the largest, or
    /// [`UnsolvableSystemError::NonFinite`] if any solved value is not finite.
    pub fn solve(&self) -> Result<DVector<f64>, UnsolvableSystemError> {
        let n = self.unknowns.len();
        if n == 0 {
            return Ok(DVector::zeros(0));
        }

        // Equilibrate rows so the pivot test does not depend on each row's units.
        let mut matrix = self.matrix.clone();
        let mut rhs = self.rhs.clone();
        for (i, mut row) in matrix.row_iter_mut().enumerate() {
            let scale = row.amax();
            if scale > 0.0 {
                row /= scale;
                rhs[i] /= scale;
            }
        }

        let lu = matrix.lu();

        let pivots = lu.u().diagonal().map(f64::abs);
        let max_pivot = pivots.max();
        let min_pivot = pivots.min();
        #[allow(clippy::cast_precision_loss)]
        let tolerance = max_pivot * f64::EPSILON * n as f64;
        if max_pivot.is_nan() || max_pivot <= 0.0 || min_pivot <= tolerance {
            return Err(UnsolvableSystemError::Singular {
                pivot_ratio: if max_pivot > 0.0 {
                    min_pivot / max_pivot
                } else {
                    0.0
                },
            });
        }

        let solution = lu
            .solve(&rhs)
            .ok_or(UnsolvableSystemError::Singular { pivot_ratio: 0.0 })?;

        if let Some(j) = solution.iter().position(|v| !v.is_finite()) {
            return Err(UnsolvableSystemError::NonFinite {
                unknown: self.unknowns[j],
            });
        }

        Ok(solution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::thermal::conduction::core::GridPosition;

    fn unknowns(n: usize) -> Vec<Unknown> {
        (0..n).map(|c| Unknown::new(GridPosition::new(0, c))).collect()
    }

    /// `T_j = value` for a single unknown.
    fn pinned(unknown: Unknown, value: f64) -> LinearEquation {
        let mut eq = LinearEquation::new(unknown);
        eq.add(unknown, 1.0);
        eq.add_constant(-value);
        eq
    }

    #[test]
    fn solves_a_small_chain() {
        let u = unknowns(3);
        let mut middle = LinearEquation::new(u[1]);
        middle.add_link(u[0], 1.0);
        middle.add_link(u[2], 1.0);

        let equations = [pinned(u[0], 300.0), middle, pinned(u[2], 400.0)];
        let system = LinearSystem::assemble(&equations, &u).unwrap();
        let t = system.solve().unwrap();

        assert_relative_eq!(t[0], 300.0, epsilon = 1e-12);
        assert_relative_eq!(t[1], 350.0, epsilon = 1e-12);
        assert_relative_eq!(t[2], 400.0, epsilon = 1e-12);
    }

    #[test]
    fn rejects_non_square_systems() {
        let u = unknowns(2);
        let equations = [pinned(u[0], 1.0)];
        assert_eq!(
            LinearSystem::assemble(&equations, &u),
            Err(UnsolvableSystemError::NotSquare {
                equations: 1,
                unknowns: 2
            })
        );
    }

    #[test]
    fn rejects_orphan_unknowns() {
        let u = unknowns(2);
        let equations = [pinned(u[0], 1.0), pinned(u[0], 2.0)];
        assert_eq!(
            LinearSystem::assemble(&equations, &u),
            Err(UnsolvableSystemError::OrphanUnknown { unknown: u[1] })
        );
    }

    #[test]
    fn rejects_foreign_unknowns() {
        let u = unknowns(1);
        let stranger = Unknown::new(GridPosition::new(5, 5));
        let equations = [pinned(stranger, 1.0)];
        assert_eq!(
            LinearSystem::assemble(&equations, &u),
            Err(UnsolvableSystemError::ForeignUnknown { unknown: stranger })
        );
    }

    #[test]
    fn tolerates_rows_on_different_scales() {
        let u = unknowns(3);
        let mut middle = LinearEquation::new(u[1]);
        middle.add_link(u[0], 4.0e12);
        middle.add_link(u[2], 4.0e12);

        let equations = [pinned(u[0], 300.0), middle, pinned(u[2], 400.0)];
        let t = LinearSystem::assemble(&equations, &u)
            .unwrap()
            .solve()
            .unwrap();

        assert_relative_eq!(t[1], 350.0, epsilon = 1e-9);
    }

    #[test]
    fn detects_rank_deficiency() {
        // Two copies of the same balance leave the level undetermined.
        let u = unknowns(2);
        let mut a = LinearEquation::new(u[0]);
        a.add_link(u[1], 1.0);
        let mut b = LinearEquation::new(u[1]);
        b.add_link(u[0], 1.0);

        let system = LinearSystem::assemble(&[a, b], &u).unwrap();
        assert!(matches!(
            system.solve(),
            Err(UnsolvableSystemError::Singular { .. })
        ));
    }
}
