use uom::si::f64::{Pressure, SpecificHeatCapacity};

use crate::support::thermo::{
    PropertyError, State, VaporQuality,
    fluid::{HumidityRatio, RelativeHumidity},
};
use crate::support::units::{SpecificEnthalpy, SpecificEntropy};

use super::ThermoModel;

pub trait HasPressure: ThermoModel {
    /// Returns the pressure for the given state.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the pressure cannot be calculated.
    fn pressure(&self, state: &State<Self::Fluid>) -> Result<Pressure, PropertyError>;
}

pub trait HasEnthalpy: ThermoModel {
    /// Returns the specific enthalpy for the given state.
    ///
    /// Moist-air models report enthalpy per unit mass of dry air.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the enthalpy cannot be calculated.
    fn enthalpy(&self, state: &State<Self::Fluid>) -> Result<SpecificEnthalpy, PropertyError>;
}

pub trait HasEntropy: ThermoModel {
    /// Returns the specific entropy for the given state.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the entropy cannot be calculated.
    fn entropy(&self, state: &State<Self::Fluid>) -> Result<SpecificEntropy, PropertyError>;
}

pub trait HasCp: ThermoModel {
    /// Returns the specific heat capacity at constant pressure.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if `cp` is undefined (e.g., inside the vapor dome).
    fn cp(&self, state: &State<Self::Fluid>) -> Result<SpecificHeatCapacity, PropertyError>;
}

pub trait HasQuality: ThermoModel {
    /// Returns the vapor quality of a saturated state.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::Undefined`] for subcooled or superheated states.
    fn quality(&self, state: &State<Self::Fluid>) -> Result<VaporQuality, PropertyError>;
}

pub trait HasHumidity: ThermoModel {
    /// Returns the humidity ratio (kg water vapor per kg dry air).
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the humidity ratio cannot be determined.
    fn humidity_ratio(&self, state: &State<Self::Fluid>) -> Result<HumidityRatio, PropertyError>;

    /// Returns the relative humidity.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::OutOfDomain`] for supersaturated states.
    fn relative_humidity(
        &self,
        state: &State<Self::Fluid>,
    ) -> Result<RelativeHumidity, PropertyError>;
}
