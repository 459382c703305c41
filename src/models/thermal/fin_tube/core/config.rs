//! Iteration limits and tolerances for the coil solvers.

use uom::si::{
    f64::{Length, MassRate, TemperatureInterval},
    length::{meter, millimeter},
    mass_rate::kilogram_per_second,
    temperature_interval::kelvin as delta_kelvin,
};

use crate::support::iterate::FixedPointConfig;

/// Seconds per hour, for tolerances quoted per hour.
const SECONDS_PER_HOUR: f64 = 3600.0;

/// Iteration limits and tolerances for the coil solvers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveConfig {
    /// Iteration limit when sizing a region's flow length.
    pub flow_length_iters: usize,

    /// Tolerance on successive flow lengths.
    pub flow_length_tol: Length,

    /// Iteration limit when rating a boiling region's refrigerant flow.
    pub mass_rate_iters: usize,

    /// Tolerance on successive refrigerant mass flow rates.
    pub mass_rate_tol: MassRate,

    /// Iteration limit when rating a subcooling region's outlet.
    pub outlet_temperature_iters: usize,

    /// Tolerance on successive refrigerant outlet temperatures.
    pub outlet_temperature_tol: TemperatureInterval,

    /// Iteration limit for the outer loop of a condenser or evaporator.
    pub composer_iters: usize,
}

impl Default for SolveConfig {
    fn default() -> Self {
        Self {
            flow_length_iters: 10,
            flow_length_tol: Length::new::<millimeter>(1.0),
            mass_rate_iters: 100,
            mass_rate_tol: MassRate::new::<kilogram_per_second>(0.1 / SECONDS_PER_HOUR),
            outlet_temperature_iters: 20,
            outlet_temperature_tol: TemperatureInterval::new::<delta_kelvin>(0.01),
            composer_iters: 20,
        }
    }
}

impl SolveConfig {
    pub(super) fn flow_length(&self) -> FixedPointConfig {
        FixedPointConfig {
            max_iters: self.flow_length_iters,
            abs_tol: self.flow_length_tol.get::<meter>(),
        }
    }

    pub(super) fn mass_rate(&self) -> FixedPointConfig {
        FixedPointConfig {
            max_iters: self.mass_rate_iters,
            abs_tol: self.mass_rate_tol.get::<kilogram_per_second>(),
        }
    }

    pub(super) fn outlet_temperature(&self) -> FixedPointConfig {
        FixedPointConfig {
            max_iters: self.outlet_temperature_iters,
            abs_tol: self.outlet_temperature_tol.get::<delta_kelvin>(),
        }
    }

    pub(super) fn composer_flow_length(&self) -> FixedPointConfig {
        FixedPointConfig {
            max_iters: self.composer_iters,
            ..self.flow_length()
        }
    }

    pub(super) fn composer_mass_rate(&self) -> FixedPointConfig {
        FixedPointConfig {
            max_iters: self.composer_iters,
            ..self.mass_rate()
        }
    }
}
