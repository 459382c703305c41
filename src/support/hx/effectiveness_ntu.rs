use std::ops::Deref;

use uom::si::{
    f64::{Power, Ratio, TemperatureInterval, ThermalConductance},
    ratio::ratio,
};

use crate::support::constraint::{Constrained, ConstraintResult, NonNegative, UnitInterval};

use super::CapacitanceRate;

/// Effectiveness as a function of NTU for a flow arrangement.
pub trait EffectivenessRelation {
    fn effectiveness(&self, ntu: Ntu, capacitance_rates: [CapacitanceRate; 2]) -> Effectiveness;
}

/// Ratio of the actual heat rate to the largest one the inlets allow.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Effectiveness(Constrained<Ratio, UnitInterval>);

impl Effectiveness {
    /// Creates an effectiveness from a fraction.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the value lies outside `[0, 1]`.
    pub fn new(value: f64) -> ConstraintResult<Self> {
        Ok(Self(UnitInterval::new(Ratio::new::<ratio>(value))?))
    }

    /// Clamps a computed value into `[0, 1]`; `NaN` maps to one.
    pub(crate) fn saturating(value: f64) -> Self {
        match UnitInterval::new(Ratio::new::<ratio>(value.clamp(0.0, 1.0))) {
            Ok(bounded) => Self(bounded),
            Err(_) => Self(UnitInterval::one()),
        }
    }

    /// Heat rate `ε·C_min·ΔT_in` for the given streams and inlet temperature difference.
    #[must_use]
    pub fn heat_rate(
        &self,
        capacitance_rates: [CapacitanceRate; 2],
        inlet_difference: TemperatureInterval,
    ) -> Power {
        let [a, b] = capacitance_rates;
        **self * a.min(*b) * inlet_difference
    }
}

impl Deref for Effectiveness {
    type Target = Ratio;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

/// Number of transfer units `UA / C_min`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Ntu(Constrained<Ratio, NonNegative>);

impl Ntu {
    /// Creates an NTU from a scalar.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the value is negative.
    pub fn new(value: f64) -> ConstraintResult<Self> {
        Ok(Self(NonNegative::new(Ratio::new::<ratio>(value))?))
    }

    /// NTU of an exchanger with conductance `ua` between the two streams.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `ua` is negative.
    pub fn from_conductance_and_capacitance_rates(
        ua: ThermalConductance,
        capacitance_rates: [CapacitanceRate; 2],
    ) -> ConstraintResult<Self> {
        let [a, b] = capacitance_rates;
        Ok(Self(NonNegative::new(ua / a.min(*b))?))
    }
}

impl Deref for Ntu {
    type Target = Ratio;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}
