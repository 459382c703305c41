use std::ops::Deref;

use uom::si::{f64::Ratio, ratio::ratio};

use crate::support::constraint::{Constrained, ConstraintResult, UnitInterval};

/// Vapor mass fraction of a saturated liquid-vapor mixture.
///
/// Zero is saturated liquid and one is saturated vapor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VaporQuality(Constrained<Ratio, UnitInterval>);

impl VaporQuality {
    /// Creates a quality from a fraction in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the value lies outside the unit interval.
    pub fn new(value: f64) -> ConstraintResult<Self> {
        Ok(Self(UnitInterval::new(Ratio::new::<ratio>(value))?))
    }

    /// Saturated liquid, `x = 0`.
    #[must_use]
    pub fn saturated_liquid() -> Self {
        Self(UnitInterval::zero())
    }

    /// Saturated vapor, `x = 1`.
    #[must_use]
    pub fn saturated_vapor() -> Self {
        Self(UnitInterval::one())
    }
}

impl Deref for VaporQuality {
    type Target = Ratio;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}
