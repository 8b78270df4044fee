//! # Scalar root finding
//!
//! Solves f(x) = 0 for a single unknown where f may fail (the Shomate evaluator returns
//! `ThermoError` outside its tabulated ranges). Two methods share one trait through
//! `enum_dispatch`:
//! - `Secant`: two starting points `x0` and `x0 + step`
//! - `Newton`: derivative from a central difference of half width `step`, one-sided when
//!   f fails on one side (a start next to the edge of a tabulated range)
//!
//! Failures of f are passed up inside `SolverError::Function` with their data intact.
use crate::Thermodynamics::Shomate::ThermoError;
use enum_dispatch::enum_dispatch;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SolverError {
    #[error(transparent)]
    Function(#[from] ThermoError),
    #[error("no convergence after {iterations} iterations: x = {x}, f(x) = {fx}")]
    NoConvergence { iterations: usize, x: f64, fx: f64 },
    #[error("zero slope at x = {x} (iteration {iterations})")]
    DegenerateStep { x: f64, iterations: usize },
    #[error("non-finite value: x = {x}, f(x) = {fx}")]
    NonFinite { x: f64, fx: f64 },
    #[error("invalid solver config: {reason}")]
    InvalidConfig { reason: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub max_iter: usize,
    /// step size tolerance, relative to 1 + |x|
    pub x_tol: f64,
    /// residual tolerance
    pub f_tol: f64,
    /// secant offset of the second starting point, Newton finite-difference half width.
    /// If f fails at x - step or x + step, Newton uses the one-sided difference instead.
    pub step: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iter: 50,
            x_tol: 1e-10,
            f_tol: 1e-9,
            step: 1.0,
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.max_iter == 0 {
            return Err("max_iter must be positive");
        }
        if !self.x_tol.is_finite() || self.x_tol < 0.0 {
            return Err("x_tol must be finite and non-negative");
        }
        if !self.f_tol.is_finite() || self.f_tol < 0.0 {
            return Err("f_tol must be finite and non-negative");
        }
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err("step must be finite and positive");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootSolution {
    pub x: f64,
    pub fx: f64,
    pub iterations: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SolverKind {
    #[default]
    Secant,
    Newton,
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SolverKind::Secant => write!(f, "secant"),
            SolverKind::Newton => write!(f, "newton"),
        }
    }
}

#[enum_dispatch]
pub trait ScalarRootFinder {
    fn solve(
        &self,
        f: &dyn Fn(f64) -> Result<f64, ThermoError>,
        x0: f64,
    ) -> Result<RootSolution, SolverError>;
}

/// evaluates f and rejects NaN or infinite residuals
fn checked(f: &dyn Fn(f64) -> Result<f64, ThermoError>, x: f64) -> Result<f64, SolverError> {
    let fx = f(x)?;
    if fx.is_finite() {
        Ok(fx)
    } else {
        Err(SolverError::NonFinite { x, fx })
    }
}

/// Central difference of f at x. If f fails on one side only, the other side gives a
/// one-sided difference; failures on both sides are returned.
fn slope(
    f: &dyn Fn(f64) -> Result<f64, ThermoError>,
    x: f64,
    fx: f64,
    h: f64,
) -> Result<f64, SolverError> {
    match (checked(f, x + h), checked(f, x - h)) {
        (Ok(f_plus), Ok(f_minus)) => Ok((f_plus - f_minus) / (2.0 * h)),
        (Ok(f_plus), Err(SolverError::Function(e))) => {
            debug!("f({}) failed ({}), forward difference", x - h, e);
            Ok((f_plus - fx) / h)
        }
        (Err(SolverError::Function(e)), Ok(f_minus)) => {
            debug!("f({}) failed ({}), backward difference", x + h, e);
            Ok((fx - f_minus) / h)
        }
        (Err(e), _) | (_, Err(e)) => Err(e),
    }
}

fn converged(dx: f64, x: f64, fx: f64, config: &SolverConfig) -> bool {
    fx.abs() <= config.f_tol || dx.abs() <= config.x_tol * (1.0 + x.abs())
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Secant {
    pub config: SolverConfig,
}

impl ScalarRootFinder for Secant {
    fn solve(
        &self,
        f: &dyn Fn(f64) -> Result<f64, ThermoError>,
        x0: f64,
    ) -> Result<RootSolution, SolverError> {
        let config = &self.config;
        config
            .validate()
            .map_err(|reason| SolverError::InvalidConfig { reason })?;

        let mut x_prev = x0;
        let mut f_prev = checked(f, x_prev)?;
        if f_prev.abs() <= config.f_tol {
            return Ok(RootSolution {
                x: x_prev,
                fx: f_prev,
                iterations: 0,
            });
        }
        let mut x = x0 + config.step;
        let mut fx = checked(f, x)?;
        if fx.abs() <= config.f_tol {
            return Ok(RootSolution {
                x,
                fx,
                iterations: 0,
            });
        }

        for iteration in 1..=config.max_iter {
            let df = fx - f_prev;
            if df == 0.0 {
                return Err(SolverError::DegenerateStep {
                    x,
                    iterations: iteration,
                });
            }
            let x_next = x - fx * (x - x_prev) / df;
            if !x_next.is_finite() {
                return Err(SolverError::NonFinite { x: x_next, fx });
            }
            let f_next = checked(f, x_next)?;
            debug!(
                "secant iteration {}: x = {}, f(x) = {:e}",
                iteration, x_next, f_next
            );
            let dx = x_next - x;
            x_prev = x;
            f_prev = fx;
            x = x_next;
            fx = f_next;
            if converged(dx, x, fx, config) {
                return Ok(RootSolution {
                    x,
                    fx,
                    iterations: iteration,
                });
            }
        }
        Err(SolverError::NoConvergence {
            iterations: config.max_iter,
            x,
            fx,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Newton {
    pub config: SolverConfig,
}

impl ScalarRootFinder for Newton {
    fn solve(
        &self,
        f: &dyn Fn(f64) -> Result<f64, ThermoError>,
        x0: f64,
    ) -> Result<RootSolution, SolverError> {
        let config = &self.config;
        config
            .validate()
            .map_err(|reason| SolverError::InvalidConfig { reason })?;
        let h = config.step;

        let mut x = x0;
        let mut fx = checked(f, x)?;
        if fx.abs() <= config.f_tol {
            return Ok(RootSolution {
                x,
                fx,
                iterations: 0,
            });
        }
        for iteration in 1..=config.max_iter {
            let derivative = slope(f, x, fx, h)?;
            if derivative == 0.0 {
                return Err(SolverError::DegenerateStep {
                    x,
                    iterations: iteration,
                });
            }
            let x_next = x - fx / derivative;
            if !x_next.is_finite() {
                return Err(SolverError::NonFinite { x: x_next, fx });
            }
            let f_next = checked(f, x_next)?;
            debug!(
                "newton iteration {}: x = {}, f(x) = {:e}, f'(x) = {:e}",
                iteration, x_next, f_next, derivative
            );
            let dx = x_next - x;
            x = x_next;
            fx = f_next;
            if converged(dx, x, fx, config) {
                return Ok(RootSolution {
                    x,
                    fx,
                    iterations: iteration,
                });
            }
        }
        Err(SolverError::NoConvergence {
            iterations: config.max_iter,
            x,
            fx,
        })
    }
}

#[enum_dispatch(ScalarRootFinder)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RootSolver {
    Secant(Secant),
    Newton(Newton),
}

impl RootSolver {
    pub fn secant(config: SolverConfig) -> Self {
        RootSolver::Secant(Secant { config })
    }

    pub fn newton(config: SolverConfig) -> Self {
        RootSolver::Newton(Newton { config })
    }

    pub fn from_kind(kind: SolverKind, config: SolverConfig) -> Self {
        match kind {
            SolverKind::Secant => Self::secant(config),
            SolverKind::Newton => Self::newton(config),
        }
    }

    pub fn kind(&self) -> SolverKind {
        match self {
            RootSolver::Secant(_) => SolverKind::Secant,
            RootSolver::Newton(_) => SolverKind::Newton,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Thermodynamics::Species::Species;
    use approx::assert_relative_eq;

    fn solvers() -> Vec<RootSolver> {
        vec![
            RootSolver::secant(SolverConfig::default()),
            RootSolver::newton(SolverConfig::default()),
        ]
    }

    #[test]
    fn test_square_root_of_two() {
        let f = |x: f64| -> Result<f64, ThermoError> { Ok(x * x - 2.0) };
        for solver in solvers() {
            let sol = solver.solve(&f, 1.0).unwrap();
            assert_relative_eq!(sol.x, 2f64.sqrt(), epsilon = 1e-9);
            assert!(sol.iterations > 0);
        }
    }

    #[test]
    fn test_start_at_root() {
        let f = |x: f64| -> Result<f64, ThermoError> { Ok(x - 3.0) };
        for solver in solvers() {
            let sol = solver.solve(&f, 3.0).unwrap();
            assert_eq!(sol.x, 3.0);
            assert_eq!(sol.iterations, 0);
        }
    }

    #[test]
    fn test_constant_function_is_degenerate() {
        let f = |_x: f64| -> Result<f64, ThermoError> { Ok(1.0) };
        for solver in solvers() {
            let err = solver.solve(&f, 0.0).unwrap_err();
            assert!(matches!(err, SolverError::DegenerateStep { .. }), "{:?}", err);
        }
    }

    #[test]
    fn test_function_error_is_propagated() {
        let f = |x: f64| -> Result<f64, ThermoError> {
            if x > 10.0 {
                Err(ThermoError::out_of_range(Species::Fe, x, "alpha"))
            } else {
                Ok(x)
            }
        };
        for solver in solvers() {
            let err = solver.solve(&f, 20.0).unwrap_err();
            assert_eq!(
                err,
                SolverError::Function(ThermoError::OutOfRange {
                    species: Species::Fe,
                    temperature: 20.0,
                    phase: "alpha".to_string()
                })
            );
        }
    }

    #[test]
    fn test_no_convergence() {
        let config = SolverConfig {
            max_iter: 2,
            ..SolverConfig::default()
        };
        let f = |x: f64| -> Result<f64, ThermoError> { Ok(x * x * x - 2.0 * x - 5.0) };
        for solver in [RootSolver::secant(config), RootSolver::newton(config)] {
            let err = solver.solve(&f, 10.0).unwrap_err();
            assert!(
                matches!(err, SolverError::NoConvergence { iterations: 2, .. }),
                "{:?}",
                err
            );
        }
    }

    #[test]
    fn test_newton_one_sided_difference_at_range_edge() {
        // f is only defined from x = 1, the first central difference would need f(0)
        let f = |x: f64| -> Result<f64, ThermoError> {
            if x < 1.0 {
                Err(ThermoError::out_of_range(Species::Fe, x, "alpha"))
            } else {
                Ok(2.0 * x - 6.0)
            }
        };
        let sol = RootSolver::newton(SolverConfig::default()).solve(&f, 1.0).unwrap();
        assert_relative_eq!(sol.x, 3.0, epsilon = 1e-12);

        let upper = |x: f64| -> Result<f64, ThermoError> {
            if x > 5.0 {
                Err(ThermoError::out_of_range(Species::Fe, x, "alpha"))
            } else {
                Ok(2.0 * x - 6.0)
            }
        };
        let sol = RootSolver::newton(SolverConfig::default()).solve(&upper, 5.0).unwrap();
        assert_relative_eq!(sol.x, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_non_finite_residual() {
        let f = |x: f64| -> Result<f64, ThermoError> { Ok(x.ln()) };
        let err = RootSolver::secant(SolverConfig::default())
            .solve(&f, -1.0)
            .unwrap_err();
        assert!(matches!(err, SolverError::NonFinite { .. }));
    }

    #[test]
    fn test_invalid_config() {
        let config = SolverConfig {
            step: 0.0,
            ..SolverConfig::default()
        };
        let f = |x: f64| -> Result<f64, ThermoError> { Ok(x) };
        let err = RootSolver::newton(config).solve(&f, 1.0).unwrap_err();
        assert!(matches!(err, SolverError::InvalidConfig { .. }));
    }

    #[test]
    fn test_kind_round_trip() {
        for kind in [SolverKind::Secant, SolverKind::Newton] {
            assert_eq!(RootSolver::from_kind(kind, SolverConfig::default()).kind(), kind);
        }
        let kind: SolverKind = serde_json::from_str("\"newton\"").unwrap();
        assert_eq!(kind, SolverKind::Newton);
    }
}
