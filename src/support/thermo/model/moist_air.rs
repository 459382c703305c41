//! Ideal-gas psychrometrics.
//!
//! Dry air and water vapor are treated as ideal gases with constant specific
//! heats. Enthalpy is reported per kilogram of dry air with the usual zero
//! points (dry air at 0 °C, liquid water at 0 °C):
//!
//! `h = c_p,da·t + W·(h_fg,0 + c_p,v·t)` with `t` in °C.
//!
//! Saturation pressure over water and ice follows the Tetens correlation.

use uom::si::{
    available_energy::joule_per_kilogram,
    f64::{MassDensity, Pressure, Ratio, SpecificHeatCapacity, ThermodynamicTemperature},
    mass_density::kilogram_per_cubic_meter,
    pressure::pascal,
    ratio::ratio,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermodynamic_temperature::{degree_celsius, kelvin},
};

use crate::support::{
    root::{RootConfig, find_root},
    thermo::{
        PropertyError, State,
        capability::{HasCp, HasEnthalpy, HasHumidity, HasPressure, StateFrom, ThermoModel},
        fluid::{HumidityRatio, MoistAir, RelativeHumidity},
    },
    units::SpecificEnthalpy,
};

/// Gas constant of dry air, J/(kg·K).
const R_DRY_AIR: f64 = 287.055;

/// Ratio of the molar masses of water and dry air.
const MOLAR_MASS_RATIO: f64 = 0.621_945;

const CP_DRY_AIR: f64 = 1006.0;
const CP_VAPOR: f64 = 1860.0;

/// Latent heat of vaporization at 0 °C, J/kg.
const H_FG_0: f64 = 2.501e6;

/// Tolerance on relative humidity above one before a state counts as supersaturated.
const SATURATION_SLACK: f64 = 1e-6;

/// Temperature search range, in °C, for states given by enthalpy and relative humidity.
const TEMPERATURE_BRACKET: [f64; 2] = [-40.0, 90.0];

/// Ideal-gas moist air property model.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IdealMoistAir;

impl ThermoModel for IdealMoistAir {
    type Fluid = MoistAir;
}

impl IdealMoistAir {
    /// Saturation pressure of water vapor at the given temperature.
    ///
    /// Below 0 °C the saturation pressure over ice is returned.
    #[must_use]
    pub fn saturation_pressure(&self, temperature: ThermodynamicTemperature) -> Pressure {
        Pressure::new::<pascal>(saturation_pressure(temperature.get::<degree_celsius>()))
    }

    /// Humidity ratio of saturated air at the given temperature and pressure.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::OutOfDomain`] if the saturation pressure
    /// reaches the total pressure.
    pub fn saturation_humidity_ratio(
        &self,
        temperature: ThermodynamicTemperature,
        pressure: Pressure,
    ) -> Result<HumidityRatio, PropertyError> {
        let w = humidity_ratio_at(
            temperature.get::<degree_celsius>(),
            pressure.get::<pascal>(),
            1.0,
        )?;
        to_humidity_ratio(w)
    }

    fn state(&self, t_c: f64, p: f64, w: f64) -> Result<State<MoistAir>, PropertyError> {
        let t = ThermodynamicTemperature::new::<degree_celsius>(t_c);
        let t_k = t.get::<kelvin>();
        if !(t_k > 0.0 && t_k.is_finite()) {
            return Err(PropertyError::OutOfDomain {
                context: format!("temperature {t_c} °C"),
            });
        }
        if !(p > 0.0 && p.is_finite()) {
            return Err(PropertyError::OutOfDomain {
                context: format!("pressure {p} Pa"),
            });
        }

        let rho = p * (1.0 + w) / (R_DRY_AIR * t_k * (1.0 + w / MOLAR_MASS_RATIO));
        Ok(State::new(
            t,
            MassDensity::new::<kilogram_per_cubic_meter>(rho),
            MoistAir::new(to_humidity_ratio(w)?),
        ))
    }
}

fn saturation_pressure(t_c: f64) -> f64 {
    if t_c >= 0.0 {
        610.78 * (17.27 * t_c / (t_c + 237.3)).exp()
    } else {
        610.78 * (21.875 * t_c / (t_c + 265.5)).exp()
    }
}

fn humidity_ratio_at(t_c: f64, p: f64, rh: f64) -> Result<f64, PropertyError> {
    let p_w = rh * saturation_pressure(t_c);
    if p_w >= p {
        return Err(PropertyError::OutOfDomain {
            context: format!("vapor pressure {p_w} Pa reaches total pressure {p} Pa"),
        });
    }
    Ok(MOLAR_MASS_RATIO * p_w / (p - p_w))
}

fn moist_enthalpy(t_c: f64, w: f64) -> f64 {
    CP_DRY_AIR * t_c + w * (H_FG_0 + CP_VAPOR * t_c)
}

fn to_humidity_ratio(w: f64) -> Result<HumidityRatio, PropertyError> {
    HumidityRatio::new(w).map_err(|err| PropertyError::OutOfDomain {
        context: format!("humidity ratio {w}: {err}"),
    })
}

fn humidity(state: &State<MoistAir>) -> f64 {
    state.fluid.humidity_ratio.get::<ratio>()
}

impl HasPressure for IdealMoistAir {
    fn pressure(&self, state: &State<MoistAir>) -> Result<Pressure, PropertyError> {
        let w = humidity(state);
        let p = state.density.get::<kilogram_per_cubic_meter>()
            * R_DRY_AIR
            * state.temperature.get::<kelvin>()
            * (1.0 + w / MOLAR_MASS_RATIO)
            / (1.0 + w);
        Ok(Pressure::new::<pascal>(p))
    }
}

impl HasEnthalpy for IdealMoistAir {
    fn enthalpy(&self, state: &State<MoistAir>) -> Result<SpecificEnthalpy, PropertyError> {
        let h = moist_enthalpy(state.temperature.get::<degree_celsius>(), humidity(state));
        Ok(SpecificEnthalpy::new::<joule_per_kilogram>(h))
    }
}

impl HasCp for IdealMoistAir {
    /// Humid specific heat, per kilogram of dry air.
    fn cp(&self, state: &State<MoistAir>) -> Result<SpecificHeatCapacity, PropertyError> {
        Ok(SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(
            CP_DRY_AIR + CP_VAPOR * humidity(state),
        ))
    }
}

impl HasHumidity for IdealMoistAir {
    fn humidity_ratio(&self, state: &State<MoistAir>) -> Result<HumidityRatio, PropertyError> {
        Ok(state.fluid.humidity_ratio)
    }

    fn relative_humidity(
        &self,
        state: &State<MoistAir>,
    ) -> Result<RelativeHumidity, PropertyError> {
        let w = humidity(state);
        let p = self.pressure(state)?.get::<pascal>();
        let p_w = p * w / (MOLAR_MASS_RATIO + w);
        let rh = p_w / saturation_pressure(state.temperature.get::<degree_celsius>());

        if rh > 1.0 + SATURATION_SLACK {
            return Err(PropertyError::OutOfDomain {
                context: format!("supersaturated air (relative humidity {rh})"),
            });
        }
        RelativeHumidity::from_quantity(Ratio::new::<ratio>(rh.min(1.0))).map_err(|err| {
            PropertyError::Calculation {
                context: format!("relative humidity {rh}: {err}"),
            }
        })
    }
}

impl StateFrom<(MoistAir, ThermodynamicTemperature, Pressure)> for IdealMoistAir {
    type Error = PropertyError;

    fn state_from(
        &self,
        (air, temperature, pressure): (MoistAir, ThermodynamicTemperature, Pressure),
    ) -> Result<State<MoistAir>, Self::Error> {
        self.state(
            temperature.get::<degree_celsius>(),
            pressure.get::<pascal>(),
            air.humidity_ratio.get::<ratio>(),
        )
    }
}

impl StateFrom<(Pressure, ThermodynamicTemperature, RelativeHumidity)> for IdealMoistAir {
    type Error = PropertyError;

    fn state_from(
        &self,
        (pressure, temperature, rh): (Pressure, ThermodynamicTemperature, RelativeHumidity),
    ) -> Result<State<MoistAir>, Self::Error> {
        let t_c = temperature.get::<degree_celsius>();
        let p = pressure.get::<pascal>();
        let w = humidity_ratio_at(t_c, p, rh.get::<ratio>())?;
        self.state(t_c, p, w)
    }
}

impl StateFrom<(Pressure, SpecificEnthalpy, HumidityRatio)> for IdealMoistAir {
    type Error = PropertyError;

    fn state_from(
        &self,
        (pressure, enthalpy, w): (Pressure, SpecificEnthalpy, HumidityRatio),
    ) -> Result<State<MoistAir>, Self::Error> {
        let w = w.get::<ratio>();
        let t_c = (enthalpy.get::<joule_per_kilogram>() - H_FG_0 * w) / (CP_DRY_AIR + CP_VAPOR * w);
        self.state(t_c, pressure.get::<pascal>(), w)
    }
}

impl StateFrom<(Pressure, ThermodynamicTemperature, SpecificEnthalpy)> for IdealMoistAir {
    type Error = PropertyError;

    /// The humidity ratio implied by the enthalpy is floored at zero.
    /// Supersaturated results are allowed.
    fn state_from(
        &self,
        (pressure, temperature, enthalpy): (Pressure, ThermodynamicTemperature, SpecificEnthalpy),
    ) -> Result<State<MoistAir>, Self::Error> {
        let t_c = temperature.get::<degree_celsius>();
        let w =
            (enthalpy.get::<joule_per_kilogram>() - CP_DRY_AIR * t_c) / (H_FG_0 + CP_VAPOR * t_c);
        self.state(t_c, pressure.get::<pascal>(), w.max(0.0))
    }
}

impl StateFrom<(Pressure, SpecificEnthalpy, RelativeHumidity)> for IdealMoistAir {
    type Error = PropertyError;

    /// Solves for the dry-bulb temperature between −40 °C and 90 °C.
    fn state_from(
        &self,
        (pressure, enthalpy, rh): (Pressure, SpecificEnthalpy, RelativeHumidity),
    ) -> Result<State<MoistAir>, Self::Error> {
        let p = pressure.get::<pascal>();
        let h = enthalpy.get::<joule_per_kilogram>();
        let rh = rh.get::<ratio>();

        let root = find_root(
            |t_c| Ok::<_, PropertyError>(moist_enthalpy(t_c, humidity_ratio_at(t_c, p, rh)?) - h),
            TEMPERATURE_BRACKET,
            &RootConfig {
                residual_tol: 1e-6,
                ..RootConfig::default()
            },
        )
        .map_err(|err| PropertyError::Calculation {
            context: format!("temperature from h={h} J/kg, rh={rh}: {err}"),
        })?;

        let w = humidity_ratio_at(root.x, p, rh)?;
        self.state(root.x, p, w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::pressure::kilopascal;

    fn atm() -> Pressure {
        Pressure::new::<kilopascal>(101.325)
    }

    fn celsius(value: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<degree_celsius>(value)
    }

    #[test]
    fn saturation_pressure_at_room_temperature() {
        let p_ws = IdealMoistAir.saturation_pressure(celsius(20.0));
        assert_relative_eq!(p_ws.get::<pascal>(), 2339.0, max_relative = 1e-2);
    }

    #[test]
    fn summer_indoor_air() -> Result<(), PropertyError> {
        let rh = RelativeHumidity::new(0.5).unwrap();
        let air = IdealMoistAir.state_from((atm(), celsius(25.0), rh))?;

        assert_relative_eq!(
            IdealMoistAir.humidity_ratio(&air)?.get::<ratio>(),
            0.0099,
            max_relative = 2e-2
        );
        assert_relative_eq!(
            IdealMoistAir.relative_humidity(&air)?.get::<ratio>(),
            0.5,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            IdealMoistAir.pressure(&air)?.get::<kilopascal>(),
            101.325,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            air.density.get::<kilogram_per_cubic_meter>(),
            1.18,
            max_relative = 1e-2
        );
        Ok(())
    }

    #[test]
    fn enthalpy_and_relative_humidity_fix_the_temperature() -> Result<(), PropertyError> {
        let rh = RelativeHumidity::new(0.9).unwrap();
        let air = IdealMoistAir.state_from((atm(), celsius(12.0), rh))?;
        let h = IdealMoistAir.enthalpy(&air)?;

        let back = IdealMoistAir.state_from((atm(), h, rh))?;
        assert_relative_eq!(
            back.temperature.get::<degree_celsius>(),
            12.0,
            epsilon = 1e-6
        );
        Ok(())
    }

    #[test]
    fn enthalpy_and_humidity_ratio_fix_the_temperature() -> Result<(), PropertyError> {
        let w = HumidityRatio::new(0.008).unwrap();
        let air = IdealMoistAir.state_from((MoistAir::new(w), celsius(30.0), atm()))?;
        let h = IdealMoistAir.enthalpy(&air)?;

        let back = IdealMoistAir.state_from((atm(), h, w))?;
        assert_relative_eq!(
            back.temperature.get::<degree_celsius>(),
            30.0,
            epsilon = 1e-9
        );
        Ok(())
    }

    #[test]
    fn supersaturated_air_has_no_relative_humidity() -> Result<(), PropertyError> {
        let w_sat = IdealMoistAir.saturation_humidity_ratio(celsius(10.0), atm())?;
        let h = SpecificEnthalpy::new::<joule_per_kilogram>(moist_enthalpy(
            10.0,
            1.5 * w_sat.get::<ratio>(),
        ));

        let fog = IdealMoistAir.state_from((atm(), celsius(10.0), h))?;
        assert!(matches!(
            IdealMoistAir.relative_humidity(&fog),
            Err(PropertyError::OutOfDomain { .. })
        ));
        Ok(())
    }

    #[test]
    fn humid_specific_heat_grows_with_moisture() -> Result<(), PropertyError> {
        let dry = IdealMoistAir.state_from((MoistAir::dry(), celsius(20.0), atm()))?;
        let humid = IdealMoistAir.state_from((
            MoistAir::new(HumidityRatio::new(0.01).unwrap()),
            celsius(20.0),
            atm(),
        ))?;

        assert_relative_eq!(
            IdealMoistAir.cp(&humid)?.value - IdealMoistAir.cp(&dry)?.value,
            18.6,
            epsilon = 1e-9
        );
        Ok(())
    }
}
