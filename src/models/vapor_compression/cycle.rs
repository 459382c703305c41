//! Single-stage vapor-compression cycle.
//!
//! Four states close the cycle: compressor suction (1) and discharge (2),
//! condenser outlet (3), and evaporator inlet (4). The expansion `3 → 4` is
//! isenthalpic at the evaporating pressure. The compressor fixes the mass
//! flow, and the duties follow from enthalpy differences.

use std::error::Error;

use thiserror::Error;
use tracing::debug;
use twine_core::Model;
use uom::si::{
    f64::{Frequency, Power, Pressure, Ratio, TemperatureInterval},
    temperature_interval::kelvin as delta_kelvin,
};

use crate::support::{
    thermo::{State, VaporQuality, capability::StateFrom},
    units::SpecificEnthalpy,
};

use super::compressor::{
    CompressorError, CompressorOutput, CompressorThermoModel, OperatingPoint,
    ReciprocatingCompressor, SaturationConditions,
};

/// A single-stage cycle built around a reciprocating compressor.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleStageCycle<Fluid, Thermo> {
    compressor: ReciprocatingCompressor<Fluid, Thermo>,
    fluid: Fluid,
}

/// Operating conditions of a [`SingleStageCycle`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleInput {
    pub speed: Frequency,
    pub saturation: SaturationConditions,

    /// Subcooling of the liquid leaving the condenser.
    pub subcooling: TemperatureInterval,
}

/// A solved cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleOutput<Fluid> {
    pub compressor: CompressorOutput<Fluid>,
    pub condenser_outlet: State<Fluid>,
    pub evaporator_inlet: State<Fluid>,

    /// Enthalpy gained by the refrigerant in the evaporator.
    pub refrigerating_effect: SpecificEnthalpy,

    /// Evaporator duty.
    pub cooling: Power,

    /// Condenser duty.
    pub heating: Power,

    pub cooling_cop: Ratio,
    pub heating_cop: Ratio,
}

#[derive(Debug, Error)]
pub enum CycleError {
    #[error(transparent)]
    Compressor(#[from] CompressorError),

    #[error("{quantity} is out of range: {context}")]
    OutOfRange {
        quantity: &'static str,
        context: String,
    },

    #[error("property evaluation failed: {context}")]
    PropertyEvaluation {
        context: String,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
}

fn property_failed(context: &str, err: impl Error + Send + Sync + 'static) -> CycleError {
    CycleError::PropertyEvaluation {
        context: context.to_owned(),
        source: Box::new(err),
    }
}

impl<Fluid, Thermo> SingleStageCycle<Fluid, Thermo>
where
    Fluid: Clone,
    Thermo: CompressorThermoModel<Fluid> + StateFrom<(Fluid, Pressure, SpecificEnthalpy)>,
{
    pub fn new(compressor: ReciprocatingCompressor<Fluid, Thermo>, fluid: Fluid) -> Self {
        Self { compressor, fluid }
    }

    pub fn compressor(&self) -> &ReciprocatingCompressor<Fluid, Thermo> {
        &self.compressor
    }

    /// Solves the cycle.
    ///
    /// # Errors
    ///
    /// - [`CycleError::OutOfRange`] for a negative subcooling.
    /// - [`CycleError::Compressor`] if the compressor cannot be rated.
    /// - [`CycleError::PropertyEvaluation`] if a state cannot be built.
    pub fn solve(&self, input: &CycleInput) -> Result<CycleOutput<Fluid>, CycleError> {
        let subcooling = input.subcooling.get::<delta_kelvin>();
        if !(subcooling >= 0.0) {
            return Err(CycleError::OutOfRange {
                quantity: "subcooling",
                context: format!("must be non-negative, got {subcooling} K"),
            });
        }

        let thermo = self.compressor.thermo();
        let point = OperatingPoint::from_saturation(
            thermo,
            self.fluid.clone(),
            input.speed,
            &input.saturation,
        )?;
        let compressor = self.compressor.rate(&point)?;
        let suction_pressure = thermo
            .pressure(&compressor.suction)
            .map_err(|err| property_failed("suction pressure", err))?;
        let discharge_pressure = thermo
            .pressure(&compressor.discharge)
            .map_err(|err| property_failed("discharge pressure", err))?;

        let condensing = input.saturation.condensing;
        let condenser_outlet = if subcooling > 0.0 {
            thermo
                .state_from((
                    self.fluid.clone(),
                    condensing - input.subcooling,
                    discharge_pressure,
                ))
                .map_err(|err| property_failed("condenser outlet", err))?
        } else {
            thermo
                .state_from((
                    self.fluid.clone(),
                    condensing,
                    VaporQuality::saturated_liquid(),
                ))
                .map_err(|err| property_failed("condenser outlet", err))?
        };

        let enthalpy = |state: &State<Fluid>, context: &str| {
            thermo
                .enthalpy(state)
                .map_err(|err| property_failed(context, err))
        };
        let h_suction = enthalpy(&compressor.suction, "suction enthalpy")?;
        let h_discharge = enthalpy(&compressor.discharge, "discharge enthalpy")?;
        let h_liquid = enthalpy(&condenser_outlet, "condenser outlet enthalpy")?;

        let evaporator_inlet = thermo
            .state_from((self.fluid.clone(), suction_pressure, h_liquid))
            .map_err(|err| property_failed("evaporator inlet", err))?;

        let refrigerating_effect = h_suction - h_liquid;
        let cooling = compressor.mass_rate * refrigerating_effect;
        let heating = compressor.mass_rate * (h_discharge - h_liquid);
        let cooling_cop = compressor.cooling_cop(cooling);
        let heating_cop = heating / compressor.electrical_power;

        debug!(
            cooling_w = cooling.value,
            heating_w = heating.value,
            cop = cooling_cop.value,
            "single-stage cycle solved"
        );

        Ok(CycleOutput {
            compressor,
            condenser_outlet,
            evaporator_inlet,
            refrigerating_effect,
            cooling,
            heating,
            cooling_cop,
            heating_cop,
        })
    }
}

impl<Fluid, Thermo> Model for SingleStageCycle<Fluid, Thermo>
where
    Fluid: Clone,
    Thermo: CompressorThermoModel<Fluid> + StateFrom<(Fluid, Pressure, SpecificEnthalpy)>,
{
    type Input = CycleInput;
    type Output = CycleOutput<Fluid>;
    type Error = CycleError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.solve(input)
    }
}
