//! Successive-substitution fixed-point iteration.
//!
//! Coil region solvers repeatedly evaluate "given this guess for the unknown,
//! what value do the energy balance and rate equation imply?" until the guess
//! stops moving. [`fixed_point`] owns that loop, the convergence test, and the
//! iteration ceiling, so every solver reports non-convergence the same way.

use thiserror::Error;

/// Convergence criteria for [`fixed_point`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPointConfig {
    /// Maximum number of substitutions.
    pub max_iters: usize,

    /// Absolute tolerance on the change between successive iterates.
    pub abs_tol: f64,
}

/// The converged iterate together with the output computed at it.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedPoint<T> {
    /// Converged value (the last iterate produced by the step function).
    pub value: f64,

    /// Output returned alongside `value` by the last step.
    pub output: T,

    /// Number of steps taken.
    pub iters: usize,
}

/// The iteration ceiling was reached without meeting the tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("{quantity} did not converge after {iters} iterations (last change {last_change:e})")]
pub struct NotConverged {
    /// Name of the unconverged quantity.
    pub quantity: &'static str,

    /// Steps taken before giving up.
    pub iters: usize,

    /// Last iterate, in SI units.
    pub last_value: f64,

    /// Magnitude of the last change, in SI units.
    pub last_change: f64,
}

/// Iterates `x ← step(x)` from `initial` until `|step(x) − x| ≤ abs_tol`.
///
/// The step returns the next iterate and an output computed along the way,
/// typically the resolved region at the current guess.
/// On success the value and output of the final step are returned.
///
/// # Errors
///
/// Step errors are propagated unchanged. A non-finite iterate or an exhausted
/// iteration budget is reported as [`NotConverged`], converted into `E`.
pub fn fixed_point<T, E>(
    quantity: &'static str,
    initial: f64,
    config: &FixedPointConfig,
    mut step: impl FnMut(f64) -> Result<(f64, T), E>,
) -> Result<FixedPoint<T>, E>
where
    E: From<NotConverged>,
{
    let mut current = initial;
    let mut last_change = f64::INFINITY;

    for iter in 1..=config.max_iters {
        let (next, output) = step(current)?;
        let change = (next - current).abs();

        tracing::debug!(quantity, iter, value = next, change, "fixed-point step");

        if !next.is_finite() {
            return Err(NotConverged {
                quantity,
                iters: iter,
                last_value: next,
                last_change: change,
            }
            .into());
        }

        if change <= config.abs_tol {
            return Ok(FixedPoint {
                value: next,
                output,
                iters: iter,
            });
        }

        current = next;
        last_change = change;
    }

    Err(NotConverged {
        quantity,
        iters: config.max_iters,
        last_value: current,
        last_change,
    }
    .into())
}
