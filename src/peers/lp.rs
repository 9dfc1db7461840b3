//! Linear program model consumed by production planning.
//!
//! The crate does not solve LPs; an [`LpSolver`] implementation is supplied
//! by the caller. This module fixes the request and response shapes:
//!
//! ```text
//! optimize   c·x
//! subject to A_ub·x ≤ b_ub
//!            A_eq·x = b_eq
//!            lower ≤ x ≤ upper
//! ```

use serde::{Deserialize, Serialize};

use super::PeerError;

/// Optimization direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sense {
    /// Smaller objective is better.
    #[default]
    Minimize,
    /// Larger objective is better.
    Maximize,
}

/// Bounds on one decision variable; `None` means unbounded on that side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VariableBound {
    /// Lower bound.
    pub lower: Option<f64>,
    /// Upper bound.
    pub upper: Option<f64>,
}

impl Default for VariableBound {
    /// Non-negative, unbounded above.
    fn default() -> Self {
        Self {
            lower: Some(0.0),
            upper: None,
        }
    }
}

/// A linear program in inequality/equality form.
///
/// # Examples
///
/// ```
/// use u_transport::peers::{LinearProgram, Sense};
///
/// // max 3x + 5y  s.t.  x ≤ 4,  2y ≤ 12,  3x + 2y ≤ 18
/// let lp = LinearProgram::new(vec![3.0, 5.0], Sense::Maximize)
///     .with_inequality(vec![1.0, 0.0], 4.0)
///     .with_inequality(vec![0.0, 2.0], 12.0)
///     .with_inequality(vec![3.0, 2.0], 18.0);
/// assert!(lp.validate().is_ok());
/// assert_eq!(lp.objective_value(&[2.0, 6.0]), 36.0);
/// assert_eq!(lp.slacks(&[2.0, 6.0]), vec![2.0, 0.0, 0.0]);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LinearProgram {
    /// Objective coefficients `c`.
    pub objective: Vec<f64>,
    /// Rows of `A_ub`.
    #[serde(default)]
    pub inequality_matrix: Vec<Vec<f64>>,
    /// `b_ub`.
    #[serde(default)]
    pub inequality_rhs: Vec<f64>,
    /// Rows of `A_eq`.
    #[serde(default)]
    pub equality_matrix: Vec<Vec<f64>>,
    /// `b_eq`.
    #[serde(default)]
    pub equality_rhs: Vec<f64>,
    /// Per-variable bounds; empty means all default (`x ≥ 0`).
    #[serde(default)]
    pub bounds: Vec<VariableBound>,
    /// Direction.
    #[serde(default)]
    pub sense: Sense,
}

impl LinearProgram {
    /// Creates a program with no constraints.
    pub fn new(objective: Vec<f64>, sense: Sense) -> Self {
        Self {
            objective,
            sense,
            ..Self::default()
        }
    }

    /// Adds `coefficients · x ≤ rhs`.
    pub fn with_inequality(mut self, coefficients: Vec<f64>, rhs: f64) -> Self {
        self.inequality_matrix.push(coefficients);
        self.inequality_rhs.push(rhs);
        self
    }

    /// Adds `coefficients · x = rhs`.
    pub fn with_equality(mut self, coefficients: Vec<f64>, rhs: f64) -> Self {
        self.equality_matrix.push(coefficients);
        self.equality_rhs.push(rhs);
        self
    }

    /// Sets per-variable bounds.
    pub fn with_bounds(mut self, bounds: Vec<VariableBound>) -> Self {
        self.bounds = bounds;
        self
    }

    /// Number of decision variables.
    pub fn num_variables(&self) -> usize {
        self.objective.len()
    }

    /// `c · x`.
    pub fn objective_value(&self, x: &[f64]) -> f64 {
        dot(&self.objective, x)
    }

    /// `b_ub − A_ub · x` per inequality row.
    pub fn slacks(&self, x: &[f64]) -> Vec<f64> {
        self.inequality_matrix
            .iter()
            .zip(&self.inequality_rhs)
            .map(|(row, &b)| b - dot(row, x))
            .collect()
    }

    /// Checks dimensions, finiteness, and bound ordering.
    pub fn validate(&self) -> Result<(), PeerError> {
        let n = self.num_variables();
        if n == 0 {
            return Err(PeerError::EmptyObjective);
        }
        check_finite("objective", &self.objective)?;

        for (matrix, rhs, what, rhs_what) in [
            (
                &self.inequality_matrix,
                &self.inequality_rhs,
                "inequality row",
                "inequality rhs",
            ),
            (
                &self.equality_matrix,
                &self.equality_rhs,
                "equality row",
                "equality rhs",
            ),
        ] {
            if rhs.len() != matrix.len() {
                return Err(PeerError::DimensionMismatch {
                    what: rhs_what,
                    expected: matrix.len(),
                    actual: rhs.len(),
                });
            }
            for row in matrix {
                if row.len() != n {
                    return Err(PeerError::DimensionMismatch {
                        what,
                        expected: n,
                        actual: row.len(),
                    });
                }
                check_finite(what, row)?;
            }
            check_finite(rhs_what, rhs)?;
        }

        if !self.bounds.is_empty() && self.bounds.len() != n {
            return Err(PeerError::DimensionMismatch {
                what: "bounds",
                expected: n,
                actual: self.bounds.len(),
            });
        }
        for (index, b) in self.bounds.iter().enumerate() {
            if let (Some(lower), Some(upper)) = (b.lower, b.upper) {
                if lower > upper {
                    return Err(PeerError::InvalidBound {
                        index,
                        lower,
                        upper,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Result reported by an [`LpSolver`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LpSolution {
    /// `true` if an optimum was found.
    pub success: bool,
    /// Solver status message.
    pub message: String,
    /// Objective value at the optimum, in the program's own sense.
    pub optimal_value: f64,
    /// Decision variable values.
    pub values: Vec<f64>,
    /// Dual values (inequality rows, then equality rows).
    pub duals: Vec<f64>,
    /// Reduced cost per variable.
    pub reduced_costs: Vec<f64>,
    /// Slack per inequality row.
    pub slacks: Vec<f64>,
    /// Iterations the solver reported.
    pub iterations: usize,
}

/// A black-box LP solver.
pub trait LpSolver {
    /// Solves `program`.
    ///
    /// Implementations should call [`LinearProgram::validate`] first and
    /// report infeasible or unbounded programs as `success: false`.
    fn solve_lp(&self, program: &LinearProgram) -> Result<LpSolution, PeerError>;
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn check_finite(what: &'static str, values: &[f64]) -> Result<(), PeerError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(PeerError::NonFinite { what, index }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Enumerates a fixed list of candidate vertices; enough for 2-variable tests.
    struct VertexSolver {
        vertices: Vec<Vec<f64>>,
    }

    impl LpSolver for VertexSolver {
        fn solve_lp(&self, program: &LinearProgram) -> Result<LpSolution, PeerError> {
            program.validate()?;
            let feasible = |x: &Vec<f64>| program.slacks(x).iter().all(|&s| s >= -1e-9);
            let better = |a: f64, b: f64| match program.sense {
                Sense::Minimize => a < b,
                Sense::Maximize => a > b,
            };
            let mut best: Option<&Vec<f64>> = None;
            for v in self.vertices.iter().filter(|v| feasible(v)) {
                if best.map_or(true, |b| {
                    better(program.objective_value(v), program.objective_value(b))
                }) {
                    best = Some(v);
                }
            }
            let x = best.ok_or_else(|| PeerError::Solver("infeasible".into()))?;
            Ok(LpSolution {
                success: true,
                message: "Optimal solution found".into(),
                optimal_value: program.objective_value(x),
                values: x.clone(),
                slacks: program.slacks(x),
                iterations: self.vertices.len(),
                ..LpSolution::default()
            })
        }
    }

    fn wyndor() -> LinearProgram {
        LinearProgram::new(vec![3.0, 5.0], Sense::Maximize)
            .with_inequality(vec![1.0, 0.0], 4.0)
            .with_inequality(vec![0.0, 2.0], 12.0)
            .with_inequality(vec![3.0, 2.0], 18.0)
    }

    #[test]
    fn test_mock_solver_through_trait() {
        let solver = VertexSolver {
            vertices: vec![
                vec![0.0, 0.0],
                vec![4.0, 0.0],
                vec![4.0, 3.0],
                vec![2.0, 6.0],
                vec![0.0, 6.0],
            ],
        };
        let sol = solver.solve_lp(&wyndor()).expect("solvable");
        assert!(sol.success);
        assert_eq!(sol.optimal_value, 36.0);
        assert_eq!(sol.values, vec![2.0, 6.0]);
    }

    #[test]
    fn test_validate_dimensions() {
        let lp = wyndor().with_inequality(vec![1.0], 1.0);
        assert!(matches!(
            lp.validate(),
            Err(PeerError::DimensionMismatch {
                what: "inequality row",
                expected: 2,
                actual: 1
            })
        ));

        let mut lp = wyndor();
        lp.equality_rhs.push(1.0);
        assert!(matches!(
            lp.validate(),
            Err(PeerError::DimensionMismatch {
                what: "equality rhs",
                ..
            })
        ));
    }

    #[test]
    fn test_validate_bounds_and_values() {
        let lp = wyndor().with_bounds(vec![
            VariableBound::default(),
            VariableBound {
                lower: Some(5.0),
                upper: Some(1.0),
            },
        ]);
        assert!(matches!(
            lp.validate(),
            Err(PeerError::InvalidBound { index: 1, .. })
        ));

        let lp = LinearProgram::new(vec![1.0, f64::NAN], Sense::Minimize);
        assert!(matches!(
            lp.validate(),
            Err(PeerError::NonFinite {
                what: "objective",
                index: 1
            })
        ));
        assert!(matches!(
            LinearProgram::default().validate(),
            Err(PeerError::EmptyObjective)
        ));
    }

    #[test]
    fn test_equality_constraints_accepted() {
        let lp = LinearProgram::new(vec![1.0, 1.0], Sense::Minimize)
            .with_equality(vec![1.0, 1.0], 1.0);
        assert!(lp.validate().is_ok());
        assert!(lp.slacks(&[0.5, 0.5]).is_empty());
    }
}
