//! Property model bounds required by the coil solvers.

use uom::si::f64::{Pressure, ThermodynamicTemperature};

use crate::support::{
    thermo::{
        VaporQuality,
        capability::{
            HasCp, HasEnthalpy, HasHumidity, HasPressure, HasQuality, StateFrom, ThermoModel,
        },
        fluid::{HumidityRatio, MoistAir, RelativeHumidity},
    },
    units::SpecificEnthalpy,
};

/// Refrigerant property model usable by the coil solvers.
pub trait RefrigerantModel<Fluid>:
    ThermoModel<Fluid = Fluid>
    + HasPressure
    + HasEnthalpy
    + HasCp
    + HasQuality
    + StateFrom<(Fluid, ThermodynamicTemperature, Pressure)>
    + StateFrom<(Fluid, Pressure, SpecificEnthalpy)>
    + StateFrom<(Fluid, Pressure, VaporQuality)>
{
}

impl<Fluid, T> RefrigerantModel<Fluid> for T where
    T: ThermoModel<Fluid = Fluid>
        + HasPressure
        + HasEnthalpy
        + HasCp
        + HasQuality
        + StateFrom<(Fluid, ThermodynamicTemperature, Pressure)>
        + StateFrom<(Fluid, Pressure, SpecificEnthalpy)>
        + StateFrom<(Fluid, Pressure, VaporQuality)>
{
}

/// Humid air property model usable by the coil solvers.
pub trait HumidAirModel:
    ThermoModel<Fluid = MoistAir>
    + HasPressure
    + HasEnthalpy
    + HasCp
    + HasHumidity
    + StateFrom<(MoistAir, ThermodynamicTemperature, Pressure)>
    + StateFrom<(Pressure, SpecificEnthalpy, HumidityRatio)>
    + StateFrom<(Pressure, ThermodynamicTemperature, SpecificEnthalpy)>
    + StateFrom<(Pressure, ThermodynamicTemperature, RelativeHumidity)>
    + StateFrom<(Pressure, SpecificEnthalpy, RelativeHumidity)>
{
}

impl<T> HumidAirModel for T where
    T: ThermoModel<Fluid = MoistAir>
        + HasPressure
        + HasEnthalpy
        + HasCp
        + HasHumidity
        + StateFrom<(MoistAir, ThermodynamicTemperature, Pressure)>
        + StateFrom<(Pressure, SpecificEnthalpy, HumidityRatio)>
        + StateFrom<(Pressure, ThermodynamicTemperature, SpecificEnthalpy)>
        + StateFrom<(Pressure, ThermodynamicTemperature, RelativeHumidity)>
        + StateFrom<(Pressure, SpecificEnthalpy, RelativeHumidity)>
{
}
