use std::ops::Deref;

use uom::si::{f64::Ratio, ratio::ratio};

use crate::support::constraint::{Constrained, ConstraintResult, NonNegative, UnitInterval};

/// Humid air: a mixture of dry air and water vapor.
///
/// The humidity ratio is state-defining, so it travels with the fluid.
/// Sensible-only processes (dry coil regions) keep it unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoistAir {
    pub humidity_ratio: HumidityRatio,
}

impl MoistAir {
    /// Creates moist air with the given humidity ratio.
    #[must_use]
    pub fn new(humidity_ratio: HumidityRatio) -> Self {
        Self { humidity_ratio }
    }

    /// Dry air.
    #[must_use]
    pub fn dry() -> Self {
        Self {
            humidity_ratio: HumidityRatio::dry(),
        }
    }
}

/// Mass of water vapor per unit mass of dry air.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct HumidityRatio(Constrained<Ratio, NonNegative>);

impl HumidityRatio {
    /// Creates a humidity ratio in kg/kg.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the value is negative or `NaN`.
    pub fn new(value: f64) -> ConstraintResult<Self> {
        Self::from_quantity(Ratio::new::<ratio>(value))
    }

    /// Creates a humidity ratio from a ratio quantity.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the quantity is negative or `NaN`.
    pub fn from_quantity(quantity: Ratio) -> ConstraintResult<Self> {
        Ok(Self(NonNegative::new(quantity)?))
    }

    /// Zero humidity ratio.
    #[must_use]
    pub fn dry() -> Self {
        Self(NonNegative::zero())
    }
}

impl Deref for HumidityRatio {
    type Target = Ratio;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

/// Partial pressure of water vapor relative to its saturation value.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct RelativeHumidity(Constrained<Ratio, UnitInterval>);

impl RelativeHumidity {
    /// Creates a relative humidity from a fraction in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the value lies outside the unit interval.
    pub fn new(value: f64) -> ConstraintResult<Self> {
        Self::from_quantity(Ratio::new::<ratio>(value))
    }

    /// Creates a relative humidity from a ratio quantity.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the quantity lies outside the unit interval.
    pub fn from_quantity(quantity: Ratio) -> ConstraintResult<Self> {
        Ok(Self(UnitInterval::new(quantity)?))
    }

    /// Saturated air.
    #[must_use]
    pub fn saturated() -> Self {
        Self(UnitInterval::one())
    }
}

impl Deref for RelativeHumidity {
    type Target = Ratio;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}
