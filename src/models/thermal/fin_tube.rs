//! Fin-tube refrigerant-to-air coils.
//!
//! This module provides [`twine_core::Model`] implementations for coils used
//! as condensers and evaporators. The computation lives in the internal
//! [`core`] module, whose public items are re-exported here.
//!
//! Both models hold a [`Coil`] (geometry, property models, and correlations)
//! and take the operating point as their input, so one model instance rates
//! any number of operating points.

pub(crate) mod core;

use std::marker::PhantomData;

use twine_core::Model;

use crate::support::thermo::fluid::MoistAir;

pub use self::core::{
    BALANCED_CAPACITY_RATIO, Coil, CondenserSolution, ConstantCoefficient, Correlation,
    EvaporatorInput, EvaporatorSolution, FinTubeDimensions, FinTubeGeometry, FlowConditions,
    GeometryError, HotStream, HumidAirModel, Inlets, MeanMethod, MeanTemperatures,
    RefrigerantModel, RegionError, RegionKind, RegionSolution, SolveConfig, StreamEnds,
    SurfaceCondition, TERMINAL_DIFFERENCE_FLOOR, WetAirMean, WetRegionEnds, log_mean,
    mean_temperatures, wet_air_mean,
};

/// A coil rated as a condenser.
///
/// Input is the refrigerant and air inlet states with both mass flow rates.
pub struct Condenser<Fluid, RM, AM, RC, AC> {
    coil: Coil<RM, AM, RC, AC>,
    _fluid: PhantomData<fn() -> Fluid>,
}

impl<Fluid, RM, AM, RC, AC> Condenser<Fluid, RM, AM, RC, AC> {
    pub fn new(coil: Coil<RM, AM, RC, AC>) -> Self {
        Self {
            coil,
            _fluid: PhantomData,
        }
    }

    pub fn coil(&self) -> &Coil<RM, AM, RC, AC> {
        &self.coil
    }
}

impl<Fluid, RM, AM, RC, AC> Model for Condenser<Fluid, RM, AM, RC, AC>
where
    Fluid: Clone,
    RM: RefrigerantModel<Fluid>,
    AM: HumidAirModel,
    RC: Correlation<Fluid>,
    AC: Correlation<MoistAir>,
{
    type Input = Inlets<Fluid>;
    type Output = CondenserSolution<Fluid>;
    type Error = RegionError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.coil.condenser(input)
    }
}

/// A coil rated as an evaporator.
///
/// The refrigerant mass flow rate in the input is only an initial guess; the
/// model returns the flow the coil evaporates to the requested superheat.
pub struct Evaporator<Fluid, RM, AM, RC, AC> {
    coil: Coil<RM, AM, RC, AC>,
    _fluid: PhantomData<fn() -> Fluid>,
}

impl<Fluid, RM, AM, RC, AC> Evaporator<Fluid, RM, AM, RC, AC> {
    pub fn new(coil: Coil<RM, AM, RC, AC>) -> Self {
        Self {
            coil,
            _fluid: PhantomData,
        }
    }

    pub fn coil(&self) -> &Coil<RM, AM, RC, AC> {
        &self.coil
    }
}

impl<Fluid, RM, AM, RC, AC> Model for Evaporator<Fluid, RM, AM, RC, AC>
where
    Fluid: Clone,
    RM: RefrigerantModel<Fluid>,
    AM: HumidAirModel,
    RC: Correlation<Fluid>,
    AC: Correlation<MoistAir>,
{
    type Input = EvaporatorInput<Fluid>;
    type Output = EvaporatorSolution<Fluid>;
    type Error = RegionError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.coil.evaporator(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{f64::TemperatureInterval, temperature_interval::kelvin as delta_kelvin};

    use super::core::test_support::{
        air, condenser_coil, evaporator_coil, inlets, refrigerant, two_phase,
    };

    #[test]
    fn condenser_model_delegates_to_the_coil() {
        let model = Condenser::new(condenser_coil());
        let input = inlets(refrigerant(81.7, 13.179), 168.745 / 3600.0, air(35.0, 0.3), 1.1);

        let from_model = model.call(&input).unwrap();
        let from_coil = model.coil().condenser(&input).unwrap();
        assert_eq!(from_model, from_coil);
    }

    #[test]
    fn evaporator_model_delegates_to_the_coil() {
        let model = Evaporator::new(evaporator_coil());
        let input = EvaporatorInput {
            inlets: inlets(two_phase(5.0, 0.111), 0.03, air(24.0, 0.3), 1500.0 / 3600.0),
            superheat: TemperatureInterval::new::<delta_kelvin>(10.0),
        };

        let from_model = model.call(&input).unwrap();
        let from_coil = model.coil().evaporator(&input).unwrap();
        assert_eq!(from_model, from_coil);
    }
}
