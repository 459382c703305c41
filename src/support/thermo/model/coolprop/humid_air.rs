use rfluids::native::CoolProp as Native;
use uom::si::{
    available_energy::joule_per_kilogram,
    f64::{MassDensity, Pressure, SpecificHeatCapacity, ThermodynamicTemperature},
    mass_density::kilogram_per_cubic_meter,
    pressure::pascal,
    ratio::ratio,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::support::{
    iterate::{FixedPointConfig, fixed_point},
    thermo::{
        PropertyError, State,
        capability::{HasCp, HasEnthalpy, HasHumidity, HasPressure, StateFrom, ThermoModel},
        fluid::{HumidityRatio, MoistAir, RelativeHumidity},
    },
    units::SpecificEnthalpy,
};

use super::CoolPropError;

/// Gas constant of dry air, J/(kg·K), for the initial pressure guess.
const R_DRY_AIR: f64 = 287.055;
const MOLAR_MASS_RATIO: f64 = 0.621_945;

const PRESSURE_ITERATION: FixedPointConfig = FixedPointConfig {
    max_iters: 20,
    abs_tol: 1e-3,
};

/// Slack on relative humidity before a state is called supersaturated.
const SATURATION_SLACK: f64 = 1e-6;

/// Humid air evaluated with CoolProp's psychrometric routines.
///
/// Enthalpy and specific heat are per kilogram of dry air, matching
/// [`IdealMoistAir`](crate::support::thermo::model::IdealMoistAir).
/// CoolProp's humid-air functions are stateless, so the model holds no data.
#[cfg_attr(docsrs, doc(cfg(feature = "coolprop")))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoolPropMoistAir;

impl ThermoModel for CoolPropMoistAir {
    type Fluid = MoistAir;
}

/// Evaluates one psychrometric output from three `(key, value)` inputs.
fn ha(
    output: &str,
    (k1, v1): (&str, f64),
    (k2, v2): (&str, f64),
    (k3, v3): (&str, f64),
) -> Result<f64, CoolPropError> {
    Ok(Native::ha_props_si(output, k1, v1, k2, v2, k3, v3)?)
}

fn humidity(state: &State<MoistAir>) -> f64 {
    state.fluid.humidity_ratio.get::<ratio>()
}

fn to_humidity_ratio(w: f64) -> Result<HumidityRatio, CoolPropError> {
    HumidityRatio::new(w).map_err(|err| {
        CoolPropError::Property(PropertyError::OutOfDomain {
            context: format!("humidity ratio {w}: {err}"),
        })
    })
}

impl CoolPropMoistAir {
    /// Builds the state at `(T, P, W)`, with density per unit mixture volume.
    fn state(&self, t: f64, p: f64, w: f64) -> Result<State<MoistAir>, CoolPropError> {
        let air = MoistAir::new(to_humidity_ratio(w)?);
        let rho = (1.0 + w) / ha("Vda", ("T", t), ("P", p), ("W", w))?;
        Ok(State::new(
            ThermodynamicTemperature::new::<kelvin>(t),
            MassDensity::new::<kilogram_per_cubic_meter>(rho),
            air,
        ))
    }

    /// Total pressure, found by scaling the pressure until the density matches.
    fn pressure_pa(&self, state: &State<MoistAir>) -> Result<f64, CoolPropError> {
        let t = state.temperature.get::<kelvin>();
        let rho = state.density.get::<kilogram_per_cubic_meter>();
        let w = humidity(state);
        let ideal = rho * R_DRY_AIR * t * (1.0 + w / MOLAR_MASS_RATIO) / (1.0 + w);

        let solution = fixed_point("humid air pressure", ideal, &PRESSURE_ITERATION, |p| {
            let rho_at_p = (1.0 + w) / ha("Vda", ("T", t), ("P", p), ("W", w))?;
            Ok::<_, CoolPropError>((p * rho / rho_at_p, ()))
        })?;
        Ok(solution.value)
    }

    /// Evaluates `output` at the state's temperature, pressure, and humidity.
    fn at_state(&self, output: &str, state: &State<MoistAir>) -> Result<f64, CoolPropError> {
        let p = self.pressure_pa(state)?;
        ha(
            output,
            ("T", state.temperature.get::<kelvin>()),
            ("P", p),
            ("W", humidity(state)),
        )
    }
}

impl HasPressure for CoolPropMoistAir {
    fn pressure(&self, state: &State<MoistAir>) -> Result<Pressure, PropertyError> {
        Ok(Pressure::new::<pascal>(self.pressure_pa(state)?))
    }
}

impl HasEnthalpy for CoolPropMoistAir {
    fn enthalpy(&self, state: &State<MoistAir>) -> Result<SpecificEnthalpy, PropertyError> {
        Ok(SpecificEnthalpy::new::<joule_per_kilogram>(
            self.at_state("Hda", state)?,
        ))
    }
}

impl HasCp for CoolPropMoistAir {
    /// Humid specific heat, per kilogram of dry air.
    fn cp(&self, state: &State<MoistAir>) -> Result<SpecificHeatCapacity, PropertyError> {
        Ok(SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(
            self.at_state("cp", state)?,
        ))
    }
}

impl HasHumidity for CoolPropMoistAir {
    fn humidity_ratio(&self, state: &State<MoistAir>) -> Result<HumidityRatio, PropertyError> {
        Ok(state.fluid.humidity_ratio)
    }

    fn relative_humidity(
        &self,
        state: &State<MoistAir>,
    ) -> Result<RelativeHumidity, PropertyError> {
        let rh = self.at_state("R", state)?;
        if rh > 1.0 + SATURATION_SLACK {
            return Err(PropertyError::OutOfDomain {
                context: format!("supersaturated air (relative humidity {rh})"),
            });
        }
        RelativeHumidity::new(rh.min(1.0)).map_err(|err| PropertyError::Calculation {
            context: format!("relative humidity {rh}: {err}"),
        })
    }
}

impl StateFrom<(MoistAir, ThermodynamicTemperature, Pressure)> for CoolPropMoistAir {
    type Error = CoolPropError;

    fn state_from(
        &self,
        (air, temperature, pressure): (MoistAir, ThermodynamicTemperature, Pressure),
    ) -> Result<State<MoistAir>, Self::Error> {
        self.state(
            temperature.get::<kelvin>(),
            pressure.get::<pascal>(),
            air.humidity_ratio.get::<ratio>(),
        )
    }
}

impl StateFrom<(Pressure, ThermodynamicTemperature, RelativeHumidity)> for CoolPropMoistAir {
    type Error = CoolPropError;

    fn state_from(
        &self,
        (pressure, temperature, rh): (Pressure, ThermodynamicTemperature, RelativeHumidity),
    ) -> Result<State<MoistAir>, Self::Error> {
        let t = temperature.get::<kelvin>();
        let p = pressure.get::<pascal>();
        let w = ha("W", ("T", t), ("P", p), ("R", rh.get::<ratio>()))?;
        self.state(t, p, w)
    }
}

impl StateFrom<(Pressure, SpecificEnthalpy, HumidityRatio)> for CoolPropMoistAir {
    type Error = CoolPropError;

    fn state_from(
        &self,
        (pressure, enthalpy, w): (Pressure, SpecificEnthalpy, HumidityRatio),
    ) -> Result<State<MoistAir>, Self::Error> {
        let p = pressure.get::<pascal>();
        let w = w.get::<ratio>();
        let t = ha(
            "T",
            ("P", p),
            ("Hda", enthalpy.get::<joule_per_kilogram>()),
            ("W", w),
        )?;
        self.state(t, p, w)
    }
}

impl StateFrom<(Pressure, ThermodynamicTemperature, SpecificEnthalpy)> for CoolPropMoistAir {
    type Error = CoolPropError;

    /// The humidity ratio implied by the enthalpy is floored at zero.
    fn state_from(
        &self,
        (pressure, temperature, enthalpy): (Pressure, ThermodynamicTemperature, SpecificEnthalpy),
    ) -> Result<State<MoistAir>, Self::Error> {
        let t = temperature.get::<kelvin>();
        let p = pressure.get::<pascal>();
        let w = ha(
            "W",
            ("T", t),
            ("P", p),
            ("Hda", enthalpy.get::<joule_per_kilogram>()),
        )?;
        self.state(t, p, w.max(0.0))
    }
}

impl StateFrom<(Pressure, SpecificEnthalpy, RelativeHumidity)> for CoolPropMoistAir {
    type Error = CoolPropError;

    fn state_from(
        &self,
        (pressure, enthalpy, rh): (Pressure, SpecificEnthalpy, RelativeHumidity),
    ) -> Result<State<MoistAir>, Self::Error> {
        let p = pressure.get::<pascal>();
        let h = enthalpy.get::<joule_per_kilogram>();
        let rh = rh.get::<ratio>();
        let t = ha("T", ("P", p), ("Hda", h), ("R", rh))?;
        let w = ha("W", ("P", p), ("Hda", h), ("R", rh))?;
        self.state(t, p, w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{pressure::kilopascal, thermodynamic_temperature::degree_celsius};

    use crate::{models::thermal::fin_tube::HumidAirModel, support::thermo::model::IdealMoistAir};

    fn atm() -> Pressure {
        Pressure::new::<kilopascal>(101.325)
    }

    fn celsius(value: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<degree_celsius>(value)
    }

    fn assert_bounds<M: HumidAirModel>(_: &M) {}

    #[test]
    fn satisfies_coil_bounds() {
        assert_bounds(&CoolPropMoistAir);
    }

    #[test]
    fn room_air_is_close_to_ideal_psychrometrics() -> Result<(), PropertyError> {
        let rh = RelativeHumidity::new(0.5).unwrap();
        let real = CoolPropMoistAir.state_from((atm(), celsius(20.0), rh))?;
        let ideal = IdealMoistAir.state_from((atm(), celsius(20.0), rh))?;

        assert_relative_eq!(
            real.fluid.humidity_ratio.get::<ratio>(),
            ideal.fluid.humidity_ratio.get::<ratio>(),
            max_relative = 0.01
        );
        assert_relative_eq!(
            real.density.get::<kilogram_per_cubic_meter>(),
            ideal.density.get::<kilogram_per_cubic_meter>(),
            max_relative = 0.005
        );
        assert_relative_eq!(
            CoolPropMoistAir.enthalpy(&real)?.get::<joule_per_kilogram>(),
            IdealMoistAir.enthalpy(&ideal)?.get::<joule_per_kilogram>(),
            max_relative = 0.01
        );
        Ok(())
    }

    #[test]
    fn pressure_is_recovered_from_density() -> Result<(), PropertyError> {
        let air = MoistAir::new(HumidityRatio::new(0.0106).unwrap());
        let state = CoolPropMoistAir.state_from((air, celsius(35.0), atm()))?;

        assert_relative_eq!(
            CoolPropMoistAir.pressure(&state)?.get::<kilopascal>(),
            101.325,
            max_relative = 1e-6
        );
        Ok(())
    }

    #[test]
    fn enthalpy_and_relative_humidity_fix_the_temperature() -> Result<(), PropertyError> {
        let rh = RelativeHumidity::new(0.6).unwrap();
        let state = CoolPropMoistAir.state_from((atm(), celsius(27.0), rh))?;
        let h = CoolPropMoistAir.enthalpy(&state)?;
        let back = CoolPropMoistAir.state_from((atm(), h, rh))?;

        assert_relative_eq!(
            back.temperature.get::<degree_celsius>(),
            27.0,
            epsilon = 1e-3
        );
        assert_relative_eq!(
            CoolPropMoistAir.relative_humidity(&back)?.get::<ratio>(),
            0.6,
            epsilon = 1e-3
        );
        Ok(())
    }
}
