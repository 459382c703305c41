//! Property model bounds required by the compressor.

use uom::si::f64::{MassDensity, Pressure, ThermodynamicTemperature};

use crate::support::{
    thermo::{
        VaporQuality,
        capability::{HasEnthalpy, HasEntropy, HasPressure, StateFrom, ThermoModel},
    },
    units::SpecificEntropy,
};

/// Refrigerant property model usable by the compressor.
pub trait CompressorThermoModel<Fluid>:
    ThermoModel<Fluid = Fluid>
    + HasPressure
    + HasEnthalpy
    + HasEntropy
    + StateFrom<(Fluid, ThermodynamicTemperature, Pressure)>
    + StateFrom<(Fluid, Pressure, SpecificEntropy)>
    + StateFrom<(Fluid, Pressure, MassDensity)>
    + StateFrom<(Fluid, ThermodynamicTemperature, VaporQuality)>
{
}

impl<Fluid, T> CompressorThermoModel<Fluid> for T where
    T: ThermoModel<Fluid = Fluid>
        + HasPressure
        + HasEnthalpy
        + HasEntropy
        + StateFrom<(Fluid, ThermodynamicTemperature, Pressure)>
        + StateFrom<(Fluid, Pressure, SpecificEntropy)>
        + StateFrom<(Fluid, Pressure, MassDensity)>
        + StateFrom<(Fluid, ThermodynamicTemperature, VaporQuality)>
{
}
