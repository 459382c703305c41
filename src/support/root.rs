//! Bracketed one-dimensional root finding.
//!
//! Several models need to solve a scalar equation `f(x) = 0` where `f` is a
//! property or component evaluation: finding the dry-bulb temperature that
//! reproduces a moist-air enthalpy, or the polytropic exponent that matches an
//! isentropic efficiency. [`find_root`] wraps a plain closure as a
//! [`twine_core::Model`] and hands it to the `twine_solvers` bisection solver.
//!
//! # Example
//!
//! ```
//! use hvac_models::support::root::{RootConfig, find_root};
//!
//! let root = find_root(
//!     |x: f64| Ok::<_, std::convert::Infallible>(x * x - 2.0),
//!     [0.0, 2.0],
//!     &RootConfig::default(),
//! )
//! .unwrap();
//!
//! assert!((root.x - 2.0_f64.sqrt()).abs() < 1e-9);
//! ```

use std::{convert::Infallible, marker::PhantomData};

use thiserror::Error;
use twine_core::{EquationProblem, Model};
use twine_solvers::equation::bisection;

/// Tolerances and iteration limit for [`find_root`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootConfig {
    /// Maximum bisection iterations.
    pub max_iters: usize,

    /// Absolute tolerance on `x`.
    pub x_abs_tol: f64,

    /// Relative tolerance on `x`.
    pub x_rel_tol: f64,

    /// Absolute tolerance on `f(x)`.
    pub residual_tol: f64,
}

impl Default for RootConfig {
    fn default() -> Self {
        Self {
            max_iters: 200,
            x_abs_tol: 1e-12,
            x_rel_tol: 1e-12,
            residual_tol: 1e-12,
        }
    }
}

impl RootConfig {
    fn bisection(&self) -> bisection::Config {
        bisection::Config {
            max_iters: self.max_iters,
            x_abs_tol: self.x_abs_tol,
            x_rel_tol: self.x_rel_tol,
            residual_tol: self.residual_tol,
        }
    }
}

/// A converged root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Root {
    pub x: f64,
    pub residual: f64,
    pub iters: usize,
}

/// Errors that can occur while finding a root.
#[derive(Debug, Error)]
pub enum RootError {
    /// The bracket, configuration, or every evaluation was rejected.
    #[error("bisection solver error")]
    Bisection(#[from] bisection::Error),

    /// The iteration limit was reached first.
    #[error("root not found after {iters} iterations: best x={x}, residual={residual}")]
    MaxIters { x: f64, residual: f64, iters: usize },
}

/// Finds `x` in `bracket` such that `f(x) = 0`.
///
/// Evaluations that fail are treated as having a positive residual, which
/// steers the search away from the failing side of the bracket.
///
/// # Errors
///
/// Returns [`RootError`] if the bracket does not contain a sign change or the
/// solver does not converge within `config.max_iters`.
pub fn find_root<F, E>(f: F, bracket: [f64; 2], config: &RootConfig) -> Result<Root, RootError>
where
    F: Fn(f64) -> Result<f64, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    let model = Residual {
        f,
        _error: PhantomData,
    };

    let solution = bisection::solve(
        &model,
        &FindZero,
        bracket,
        &config.bisection(),
        |event: &bisection::Event<'_, _, _>| {
            if event.result().is_err() {
                return Some(bisection::Action::assume_positive());
            }
            None
        },
    )?;

    tracing::debug!(
        x = solution.x,
        residual = solution.residual,
        iters = solution.iters,
        "bisection finished"
    );

    if solution.status != bisection::Status::Converged {
        return Err(RootError::MaxIters {
            x: solution.x,
            residual: solution.residual,
            iters: solution.iters,
        });
    }

    Ok(Root {
        x: solution.x,
        residual: solution.residual,
        iters: solution.iters,
    })
}

/// Presents a scalar closure as a model from `x` to `f(x)`.
struct Residual<F, E> {
    f: F,
    _error: PhantomData<fn() -> E>,
}

impl<F, E> Model for Residual<F, E>
where
    F: Fn(f64) -> Result<f64, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    type Input = f64;
    type Output = f64;
    type Error = E;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        (self.f)(*input)
    }
}

/// Drives the closure output to zero.
struct FindZero;

impl EquationProblem<1> for FindZero {
    type Input = f64;
    type Output = f64;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(x[0])
    }

    fn residuals(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        Ok([*output])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::support::thermo::PropertyError;

    #[test]
    fn finds_cube_root() {
        let root = find_root(
            |x: f64| Ok::<_, Infallible>(x.powi(3) - 27.0),
            [0.0, 10.0],
            &RootConfig::default(),
        )
        .expect("root should be bracketed");

        assert_relative_eq!(root.x, 3.0, epsilon = 1e-9);
    }

    #[test]
    fn steers_around_failed_evaluations() {
        // The first midpoint fails; the root at 2 is still found.
        let root = find_root(
            |x: f64| {
                if (4.5..5.5).contains(&x) {
                    Err(PropertyError::OutOfDomain {
                        context: format!("x={x}"),
                    })
                } else {
                    Ok(x - 2.0)
                }
            },
            [0.0, 10.0],
            &RootConfig::default(),
        )
        .expect("root should be found");

        assert_relative_eq!(root.x, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn missing_sign_change_is_an_error() {
        let result = find_root(
            |x: f64| Ok::<_, Infallible>(x * x + 1.0),
            [-1.0, 1.0],
            &RootConfig::default(),
        );
        assert!(matches!(result, Err(RootError::Bisection(_))));
    }
}
