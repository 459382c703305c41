//! CoolProp-backed property models.
//!
//! [`CoolProp`] evaluates a pure refrigerant through a CoolProp
//! `AbstractState`. [`CoolPropMoistAir`] evaluates humid air through
//! CoolProp's psychrometric routines. Both satisfy the property bounds of the
//! coil and compressor models, so they can stand in for the idealized models.

mod error;
mod humid_air;

use std::{
    marker::PhantomData,
    sync::{Mutex, MutexGuard},
};

use rfluids::{
    io::{FluidInputPair, FluidParam, FluidTrivialParam},
    native::AbstractState,
};
use uom::si::{
    available_energy::joule_per_kilogram,
    f64::{MassDensity, MolarMass, Pressure, SpecificHeatCapacity, ThermodynamicTemperature},
    mass_density::kilogram_per_cubic_meter,
    molar_mass::kilogram_per_mole,
    pressure::pascal,
    ratio::ratio,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::support::{
    thermo::{
        PropertyError, State, VaporQuality,
        capability::{
            HasCp, HasEnthalpy, HasEntropy, HasPressure, HasQuality, StateFrom, ThermoModel,
        },
    },
    units::{SpecificEnthalpy, SpecificEntropy},
};

pub use error::CoolPropError;
pub use humid_air::CoolPropMoistAir;

/// Marks a fluid as usable with the [`CoolProp`] model.
///
/// Implementors name the CoolProp backend and fluid used to build the
/// `AbstractState`.
#[cfg_attr(docsrs, doc(cfg(feature = "coolprop")))]
pub trait CoolPropFluid: Default + Send + Sync + 'static {
    const BACKEND: &'static str;
    const NAME: &'static str;
}

/// A refrigerant property model backed by CoolProp.
#[cfg_attr(docsrs, doc(cfg(feature = "coolprop")))]
pub struct CoolProp<F: CoolPropFluid> {
    state: Mutex<AbstractState>,
    _f: PhantomData<F>,
}

impl<F: CoolPropFluid> ThermoModel for CoolProp<F> {
    type Fluid = F;
}

impl<F: CoolPropFluid> CoolProp<F> {
    /// Creates a model for the fluid `F`.
    ///
    /// # Errors
    ///
    /// Returns [`CoolPropError`] if CoolProp does not know `F::BACKEND` or
    /// `F::NAME`.
    pub fn new() -> Result<Self, CoolPropError> {
        let state = AbstractState::new(F::BACKEND, F::NAME)?;
        Ok(Self {
            state: Mutex::new(state),
            _f: PhantomData,
        })
    }

    /// Returns the molar mass of the fluid.
    ///
    /// # Errors
    ///
    /// Returns [`CoolPropError`] if the call fails.
    pub fn molar_mass(&self) -> Result<MolarMass, CoolPropError> {
        let abstract_state = self.state.lock()?;
        let molar_mass = abstract_state.keyed_output(FluidTrivialParam::MolarMass)?;
        Ok(MolarMass::new::<kilogram_per_mole>(molar_mass))
    }

    /// Locks the `AbstractState` and updates it to `state`.
    fn lock_with_state(
        &self,
        state: &State<F>,
    ) -> Result<MutexGuard<'_, AbstractState>, CoolPropError> {
        let mut abstract_state = self.state.lock()?;
        abstract_state.update(
            FluidInputPair::DMassT,
            state.density.get::<kilogram_per_cubic_meter>(),
            state.temperature.get::<kelvin>(),
        )?;
        Ok(abstract_state)
    }

    /// Updates the `AbstractState` from an input pair and reads back `(T, ρ)`.
    fn resolve(
        &self,
        fluid: F,
        pair: FluidInputPair,
        first: f64,
        second: f64,
    ) -> Result<State<F>, CoolPropError> {
        let mut abstract_state = self.state.lock()?;
        abstract_state.update(pair, first, second)?;

        let temperature = abstract_state.keyed_output(FluidParam::T)?;
        let density = abstract_state.keyed_output(FluidParam::DMass)?;

        Ok(State {
            temperature: ThermodynamicTemperature::new::<kelvin>(temperature),
            density: MassDensity::new::<kilogram_per_cubic_meter>(density),
            fluid,
        })
    }

    fn output(&self, state: &State<F>, param: FluidParam) -> Result<f64, PropertyError> {
        let abstract_state = self.lock_with_state(state)?;
        let value = abstract_state
            .keyed_output(param)
            .map_err(CoolPropError::Rfluids)?;
        Ok(value)
    }
}

impl<F: CoolPropFluid> HasPressure for CoolProp<F> {
    fn pressure(&self, state: &State<Self::Fluid>) -> Result<Pressure, PropertyError> {
        Ok(Pressure::new::<pascal>(self.output(state, FluidParam::P)?))
    }
}

impl<F: CoolPropFluid> HasEnthalpy for CoolProp<F> {
    fn enthalpy(&self, state: &State<Self::Fluid>) -> Result<SpecificEnthalpy, PropertyError> {
        Ok(SpecificEnthalpy::new::<joule_per_kilogram>(
            self.output(state, FluidParam::HMass)?,
        ))
    }
}

impl<F: CoolPropFluid> HasEntropy for CoolProp<F> {
    fn entropy(&self, state: &State<Self::Fluid>) -> Result<SpecificEntropy, PropertyError> {
        Ok(SpecificEntropy::new::<joule_per_kilogram_kelvin>(
            self.output(state, FluidParam::SMass)?,
        ))
    }
}

impl<F: CoolPropFluid> HasCp for CoolProp<F> {
    fn cp(&self, state: &State<Self::Fluid>) -> Result<SpecificHeatCapacity, PropertyError> {
        Ok(SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(
            self.output(state, FluidParam::CpMass)?,
        ))
    }
}

impl<F: CoolPropFluid> HasQuality for CoolProp<F> {
    /// Single-phase states have no quality.
    fn quality(&self, state: &State<Self::Fluid>) -> Result<VaporQuality, PropertyError> {
        let q = self.output(state, FluidParam::Q)?;
        VaporQuality::new(q).map_err(|_| PropertyError::Undefined {
            context: format!(
                "quality of a single-phase state at {} K",
                state.temperature.get::<kelvin>()
            ),
        })
    }
}

impl<F: CoolPropFluid> StateFrom<(F, ThermodynamicTemperature, Pressure)> for CoolProp<F> {
    type Error = CoolPropError;

    fn state_from(
        &self,
        (fluid, temperature, pressure): (F, ThermodynamicTemperature, Pressure),
    ) -> Result<State<F>, Self::Error> {
        self.resolve(
            fluid,
            FluidInputPair::PT,
            pressure.get::<pascal>(),
            temperature.get::<kelvin>(),
        )
    }
}

impl<F: CoolPropFluid> StateFrom<(F, ThermodynamicTemperature, MassDensity)> for CoolProp<F> {
    type Error = CoolPropError;

    fn state_from(
        &self,
        (fluid, temperature, density): (F, ThermodynamicTemperature, MassDensity),
    ) -> Result<State<F>, Self::Error> {
        self.resolve(
            fluid,
            FluidInputPair::DMassT,
            density.get::<kilogram_per_cubic_meter>(),
            temperature.get::<kelvin>(),
        )
    }
}

impl<F: CoolPropFluid> StateFrom<(F, Pressure, SpecificEnthalpy)> for CoolProp<F> {
    type Error = CoolPropError;

    fn state_from(
        &self,
        (fluid, pressure, enthalpy): (F, Pressure, SpecificEnthalpy),
    ) -> Result<State<F>, Self::Error> {
        self.resolve(
            fluid,
            FluidInputPair::HMassP,
            enthalpy.get::<joule_per_kilogram>(),
            pressure.get::<pascal>(),
        )
    }
}

impl<F: CoolPropFluid> StateFrom<(F, Pressure, SpecificEntropy)> for CoolProp<F> {
    type Error = CoolPropError;

    fn state_from(
        &self,
        (fluid, pressure, entropy): (F, Pressure, SpecificEntropy),
    ) -> Result<State<F>, Self::Error> {
        self.resolve(
            fluid,
            FluidInputPair::PSMass,
            pressure.get::<pascal>(),
            entropy.get::<joule_per_kilogram_kelvin>(),
        )
    }
}

impl<F: CoolPropFluid> StateFrom<(F, Pressure, MassDensity)> for CoolProp<F> {
    type Error = CoolPropError;

    fn state_from(
        &self,
        (fluid, pressure, density): (F, Pressure, MassDensity),
    ) -> Result<State<F>, Self::Error> {
        self.resolve(
            fluid,
            FluidInputPair::DMassP,
            density.get::<kilogram_per_cubic_meter>(),
            pressure.get::<pascal>(),
        )
    }
}

impl<F: CoolPropFluid> StateFrom<(F, Pressure, VaporQuality)> for CoolProp<F> {
    type Error = CoolPropError;

    fn state_from(
        &self,
        (fluid, pressure, quality): (F, Pressure, VaporQuality),
    ) -> Result<State<F>, Self::Error> {
        self.resolve(
            fluid,
            FluidInputPair::PQ,
            pressure.get::<pascal>(),
            quality.get::<ratio>(),
        )
    }
}

impl<F: CoolPropFluid> StateFrom<(F, ThermodynamicTemperature, VaporQuality)> for CoolProp<F> {
    type Error = CoolPropError;

    fn state_from(
        &self,
        (fluid, temperature, quality): (F, ThermodynamicTemperature, VaporQuality),
    ) -> Result<State<F>, Self::Error> {
        self.resolve(
            fluid,
            FluidInputPair::QT,
            quality.get::<ratio>(),
            temperature.get::<kelvin>(),
        )
    }
}

// CoolProp<F> must be Send + Sync for any CoolPropFluid. rfluids serializes
// the FFI calls; the local mutex keeps each update/query pair atomic.
#[allow(dead_code)]
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn check<F: CoolPropFluid>() {
        assert_send_sync::<CoolProp<F>>();
    }
};

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        available_energy::kilojoule_per_kilogram, molar_mass::gram_per_mole, pressure::kilopascal,
        specific_heat_capacity::kilojoule_per_kilogram_kelvin,
        thermodynamic_temperature::degree_celsius,
    };

    use crate::{
        models::{
            thermal::fin_tube::RefrigerantModel,
            vapor_compression::compressor::CompressorThermoModel,
        },
        support::thermo::fluid::R134a,
    };

    fn model() -> CoolProp<R134a> {
        CoolProp::<R134a>::new().unwrap()
    }

    fn celsius(value: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<degree_celsius>(value)
    }

    fn assert_bounds<M: RefrigerantModel<R134a> + CompressorThermoModel<R134a>>(_: &M) {}

    #[test]
    fn satisfies_coil_and_compressor_bounds() {
        assert_bounds(&model());
    }

    #[test]
    fn r134a_molar_mass() {
        let molar_mass = model().molar_mass().unwrap();
        assert_relative_eq!(molar_mass.get::<gram_per_mole>(), 102.032, epsilon = 1e-3);
    }

    #[test]
    fn saturated_liquid_at_zero_celsius_sits_on_the_reference() {
        let model = model();
        let liquid = model
            .state_from((celsius(0.0), VaporQuality::saturated_liquid()))
            .unwrap();

        // The IIR reference fixes h = 200 kJ/kg and s = 1 kJ/(kg·K) here.
        assert_relative_eq!(
            model.enthalpy(&liquid).unwrap().get::<kilojoule_per_kilogram>(),
            200.0,
            epsilon = 1e-3
        );
        assert_relative_eq!(
            model
                .entropy(&liquid)
                .unwrap()
                .get::<kilojoule_per_kilogram_kelvin>(),
            1.0,
            epsilon = 1e-5
        );
        assert_relative_eq!(
            model.pressure(&liquid).unwrap().get::<kilopascal>(),
            292.8,
            epsilon = 0.5
        );
    }

    #[test]
    fn pressure_quality_state_reports_its_quality() {
        let model = model();
        let p = Pressure::new::<kilopascal>(350.0);
        let state = model
            .state_from((p, VaporQuality::new(0.4).unwrap()))
            .unwrap();

        assert_relative_eq!(
            model.quality(&state).unwrap().get::<ratio>(),
            0.4,
            epsilon = 1e-5
        );
    }

    #[test]
    fn superheated_vapor_has_no_quality() {
        let model = model();
        let state = model
            .state_from((celsius(40.0), Pressure::new::<kilopascal>(350.0)))
            .unwrap();

        assert!(matches!(
            model.quality(&state),
            Err(PropertyError::Undefined { .. })
        ));
    }

    #[test]
    fn pressure_enthalpy_roundtrips_from_temperature_pressure() {
        let model = model();
        let p = Pressure::new::<kilopascal>(1320.0);
        let vapor = model.state_from((celsius(70.0), p)).unwrap();
        let h = model.enthalpy(&vapor).unwrap();
        let roundtrip = model.state_from((p, h)).unwrap();

        assert_relative_eq!(
            roundtrip.temperature.get::<kelvin>(),
            vapor.temperature.get::<kelvin>(),
            max_relative = 1e-9
        );
        assert_relative_eq!(
            roundtrip.density.get::<kilogram_per_cubic_meter>(),
            vapor.density.get::<kilogram_per_cubic_meter>(),
            max_relative = 1e-9
        );
    }

    #[test]
    fn pressure_entropy_roundtrips_from_temperature_pressure() {
        let model = model();
        let p = Pressure::new::<kilopascal>(350.0);
        let vapor = model.state_from((celsius(10.0), p)).unwrap();
        let s = model.entropy(&vapor).unwrap();
        let roundtrip = model.state_from((p, s)).unwrap();

        assert_relative_eq!(
            roundtrip.temperature.get::<kelvin>(),
            vapor.temperature.get::<kelvin>(),
            max_relative = 1e-9
        );
    }

    #[test]
    fn superheated_vapor_has_a_positive_cp() {
        let model = model();
        let vapor = model
            .state_from((celsius(10.0), Pressure::new::<kilopascal>(350.0)))
            .unwrap();
        let cp = model.cp(&vapor).unwrap();
        assert!(cp.get::<joule_per_kilogram_kelvin>() > 500.0);
    }
}
