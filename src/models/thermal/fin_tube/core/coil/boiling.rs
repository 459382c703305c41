//! Boiling regions rated for the refrigerant flow they evaporate.
//!
//! The flow length is known and the refrigerant leaves as saturated vapor,
//! so the unknown is the refrigerant mass flow rate. Each pass rates the
//! region twice, once with a dry surface (temperature potential) and once
//! with a wet surface (enthalpy potential against saturated air at the
//! refrigerant temperature), and keeps the larger duty.

use tracing::warn;
use uom::si::{
    available_energy::joule_per_kilogram,
    f64::{
        Length, MassRate, Power, Pressure, TemperatureInterval, ThermalConductance,
        ThermodynamicTemperature,
    },
    mass_rate::kilogram_per_second,
    power::watt,
    ratio::ratio,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    temperature_interval::kelvin as delta_kelvin,
    thermal_conductance::watt_per_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::support::{
    hx::Effectiveness,
    iterate::fixed_point,
    thermo::{
        State, VaporQuality,
        fluid::{HumidityRatio, MoistAir, RelativeHumidity},
    },
    units::SpecificEnthalpy,
};

use crate::models::thermal::fin_tube::core::{
    Correlation, HumidAirModel, Inlets, RefrigerantModel, RegionError, RegionKind,
    RegionSolution, SurfaceCondition, WetRegionEnds, wet_air_mean,
};

use super::{Coil, Resolved, Streams, positive_rate};

/// Half-width of the central difference for the saturated-air enthalpy slope, K.
const SLOPE_STEP: f64 = 0.5;

/// Air-side conditions fixed for the whole rating.
struct AirSide {
    pressure: Pressure,
    t_in: f64,
    h_in: f64,
    cp: f64,
    mass_rate: f64,
}

impl<RM, AM, RC, AC> Coil<RM, AM, RC, AC> {
    /// Rates a boiling region of the given flow length.
    ///
    /// `inlets.refrigerant_mass_rate` seeds the iteration. The solution
    /// reports the converged mass flow rate and which surface condition
    /// governed.
    ///
    /// # Errors
    ///
    /// - [`RegionError::OutOfRange`] for a non-positive flow length or mass
    ///   flow rate, or a refrigerant inlet outside the vapor dome.
    /// - [`RegionError::SecondLawViolation`] if the air is not warmer than
    ///   the refrigerant.
    /// - [`RegionError::Convergence`] if the mass flow rate does not settle.
    pub fn boiling<Fluid: Clone>(
        &self,
        inlets: &Inlets<Fluid>,
        flow_length: Length,
    ) -> Result<RegionSolution<Fluid>, RegionError>
    where
        RM: RefrigerantModel<Fluid>,
        AM: HumidAirModel,
        RC: Correlation<Fluid>,
        AC: Correlation<MoistAir>,
    {
        if !(flow_length.value > 0.0 && flow_length.value.is_finite()) {
            return Err(RegionError::out_of_range(
                "boiling flow length",
                format!("must be positive, got {flow_length:?}"),
            ));
        }
        let m_guess = positive_rate("refrigerant mass flow rate", inlets.refrigerant_mass_rate)?;
        let m_air = positive_rate("air mass flow rate", inlets.air_mass_rate)?;
        let rfg_in = &inlets.refrigerant;
        let air_in = &inlets.air;

        if self.refrigerant.quality(rfg_in).is_err() {
            return Err(RegionError::out_of_range(
                "refrigerant inlet",
                "boiling needs a two-phase inlet",
            ));
        }

        let pressure = self.refrigerant_pressure(rfg_in)?;
        let rfg_out = self.saturated(rfg_in, pressure, VaporQuality::saturated_vapor())?;
        let h_rfg_in = self.refrigerant_enthalpy(rfg_in)?;
        let dh = self.refrigerant_enthalpy(&rfg_out)? - h_rfg_in;
        if !(dh > 0.0) {
            return Err(RegionError::out_of_range(
                "refrigerant inlet",
                "boiling needs liquid left to evaporate",
            ));
        }
        let refrigerant_mean = self.refrigerant_at_enthalpy(rfg_in, pressure, h_rfg_in + 0.5 * dh)?;

        let air = AirSide {
            pressure: self.air_pressure(air_in)?,
            t_in: air_in.temperature.get::<kelvin>(),
            h_in: self.air_enthalpy(air_in)?,
            cp: self
                .air
                .cp(air_in)
                .map_err(|err| RegionError::property_failed("air specific heat", err))?
                .get::<joule_per_kilogram_kelvin>(),
            mass_rate: m_air.get::<kilogram_per_second>(),
        };
        let w_in = self.air_humidity_ratio(air_in)?;

        let t_rfg_in = rfg_in.temperature.get::<kelvin>();
        let t_rfg_out = rfg_out.temperature.get::<kelvin>();
        let t_rfg = 0.5 * (t_rfg_in + t_rfg_out);
        if !(air.t_in > t_rfg) {
            return Err(RegionError::SecondLawViolation {
                region: RegionKind::Boiling,
                mean_difference: TemperatureInterval::new::<delta_kelvin>(air.t_in - t_rfg),
            });
        }

        let h_sat_in = self.saturated_air_enthalpy(air.pressure, t_rfg_in)?;
        let h_sat_out = self.saturated_air_enthalpy(air.pressure, t_rfg_out)?;
        let h_sat = 0.5 * (h_sat_in + h_sat_out);
        let slope = (self.saturated_air_enthalpy(air.pressure, t_rfg + SLOPE_STEP)?
            - self.saturated_air_enthalpy(air.pressure, t_rfg - SLOPE_STEP)?)
            / (2.0 * SLOPE_STEP);

        let mut air_out = self.air_state(
            air.pressure,
            0.5 * (air.t_in + t_rfg_out),
            0.5 * (air.h_in + h_sat_out),
        )?;
        let mut surface = None;

        let rated = fixed_point(
            "refrigerant mass flow rate",
            m_guess.get::<kilogram_per_second>(),
            &self.config.mass_rate(),
            |m| {
                let mean = wet_air_mean(&WetRegionEnds {
                    air_inlet: (
                        air_in.temperature,
                        SpecificEnthalpy::new::<joule_per_kilogram>(air.h_in),
                    ),
                    air_outlet: (
                        air_out.temperature,
                        SpecificEnthalpy::new::<joule_per_kilogram>(self.air_enthalpy(&air_out)?),
                    ),
                    refrigerant_inlet: rfg_in.temperature,
                    refrigerant_outlet: rfg_out.temperature,
                    saturated_at_refrigerant_inlet: SpecificEnthalpy::new::<joule_per_kilogram>(
                        h_sat_in,
                    ),
                    saturated_at_refrigerant_outlet: SpecificEnthalpy::new::<joule_per_kilogram>(
                        h_sat_out,
                    ),
                });
                let air_mean = match surface {
                    Some(SurfaceCondition::Wet) => self.air_state(
                        air.pressure,
                        mean.temperature.get::<kelvin>(),
                        mean.enthalpy.get::<joule_per_kilogram>(),
                    )?,
                    _ => self
                        .air
                        .state_from((MoistAir::new(w_in), mean.temperature, air.pressure))
                        .map_err(|err| RegionError::property_failed("mean air", err))?,
                };

                let mut streams = Streams {
                    refrigerant_in: rfg_in.clone(),
                    refrigerant_out: rfg_out.clone(),
                    refrigerant_mean: refrigerant_mean.clone(),
                    refrigerant_mass_rate: MassRate::new::<kilogram_per_second>(m),
                    air_in: *air_in,
                    air_out,
                    air_mean,
                    air_mass_rate: m_air,
                    heat_rate: Power::new::<watt>(m * dh),
                };

                let transfer = self.transfer(flow_length, &streams)?;
                let (inner, outer) = self.film_conductances(flow_length, &transfer);
                let ua = 1.0 / (1.0 / inner + 1.0 / outer);

                let c_air = air.mass_rate * air.cp;
                let dry_effectiveness = 1.0 - (-ua / c_air).exp();
                let q_dry = dry_effectiveness * c_air * (air.t_in - t_rfg);

                let ua_enthalpy = 1.0 / (slope / inner + air.cp / outer);
                let wet_effectiveness = 1.0 - (-ua_enthalpy / air.mass_rate).exp();
                let q_wet = wet_effectiveness * air.mass_rate * (air.h_in - h_sat);

                let (q, regime, effectiveness) = if q_wet > q_dry {
                    (q_wet, SurfaceCondition::Wet, wet_effectiveness)
                } else {
                    (q_dry, SurfaceCondition::Dry, dry_effectiveness)
                };
                if let Some(previous) = surface.filter(|previous| *previous != regime) {
                    warn!(
                        ?previous,
                        current = ?regime,
                        m,
                        "boiling region surface condition changed"
                    );
                }
                surface = Some(regime);

                air_out = match regime {
                    SurfaceCondition::Dry => self.air_after(air_in, m_air, -q)?,
                    SurfaceCondition::Wet => {
                        let ntu_outer = outer / c_air;
                        self.wet_outlet(&air, w_in, q, ntu_outer)?
                    }
                };

                streams.air_out = air_out;
                streams.heat_rate = Power::new::<watt>(q);
                let m_next = q / dh;
                streams.refrigerant_mass_rate = MassRate::new::<kilogram_per_second>(m_next);

                Ok::<_, RegionError>((
                    m_next,
                    Resolved {
                        streams,
                        conductance: ThermalConductance::new::<watt_per_kelvin>(ua),
                        effectiveness: Effectiveness::saturating(effectiveness),
                        mean_difference: mean.temperature.get::<kelvin>() - t_rfg,
                        surface: regime,
                    },
                ))
            },
        )?;

        self.finish(RegionKind::Boiling, flow_length, rated.output, rated.iters)
    }

    /// Enthalpy of saturated air at `t` kelvin.
    fn saturated_air_enthalpy(
        &self,
        pressure: Pressure,
        t: f64,
    ) -> Result<f64, RegionError>
    where
        AM: HumidAirModel,
    {
        let state = self
            .air
            .state_from((
                pressure,
                ThermodynamicTemperature::new::<kelvin>(t),
                RelativeHumidity::saturated(),
            ))
            .map_err(|err| RegionError::property_failed("saturated air", err))?;
        self.air_enthalpy(&state)
    }

    fn air_state(
        &self,
        pressure: Pressure,
        t: f64,
        h: f64,
    ) -> Result<State<MoistAir>, RegionError>
    where
        AM: HumidAirModel,
    {
        self.air
            .state_from((
                pressure,
                ThermodynamicTemperature::new::<kelvin>(t),
                SpecificEnthalpy::new::<joule_per_kilogram>(h),
            ))
            .map_err(|err| RegionError::property_failed("air from temperature and enthalpy", err))
    }

    /// Air leaving a wet surface after giving up `q`.
    ///
    /// The air approaches an effective surface state on the saturation line
    /// exponentially in the outer NTU; its temperature follows the same
    /// approach. The result is kept unsaturated and no more humid than the
    /// entering air.
    fn wet_outlet(
        &self,
        air: &AirSide,
        w_in: HumidityRatio,
        q: f64,
        ntu_outer: f64,
    ) -> Result<State<MoistAir>, RegionError>
    where
        AM: HumidAirModel,
    {
        let h_out = air.h_in - q / air.mass_rate;
        let decay = (-ntu_outer).exp();
        let h_surface = air.h_in - (air.h_in - h_out) / (1.0 - decay);

        let surface = self
            .air
            .state_from((
                air.pressure,
                SpecificEnthalpy::new::<joule_per_kilogram>(h_surface),
                RelativeHumidity::saturated(),
            ))
            .map_err(|err| RegionError::property_failed("effective surface air", err))?;
        let t_surface = surface.temperature.get::<kelvin>();
        let t_out = t_surface + (air.t_in - t_surface) * decay;

        let candidate = self.air_state(air.pressure, t_out, h_out)?;
        let too_humid = self.air_humidity_ratio(&candidate)?.get::<ratio>() > w_in.get::<ratio>();
        let h_out = SpecificEnthalpy::new::<joule_per_kilogram>(h_out);

        if too_humid {
            return self
                .air
                .state_from((air.pressure, h_out, w_in))
                .map_err(|err| RegionError::property_failed("air outlet", err));
        }
        if self.air.relative_humidity(&candidate).is_err() {
            return self
                .air
                .state_from((air.pressure, h_out, RelativeHumidity::saturated()))
                .map_err(|err| RegionError::property_failed("saturated air outlet", err));
        }
        Ok(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use proptest::prelude::*;
    use uom::ConstZero;

    use crate::{
        models::thermal::fin_tube::core::test_support::{
            air, evaporator_coil, inlets, refrigerant, refrigerant_model, two_phase,
        },
        support::thermo::{
            capability::HasEnthalpy, fluid::test_refrigerant::TestRefrigerant,
            model::IdealMoistAir,
        },
    };

    const AIR_MASS_RATE: f64 = 1500.0 / 3600.0;
    const INLET_QUALITY: f64 = 0.111;

    fn evaporating(rh: f64) -> Inlets<TestRefrigerant> {
        inlets(two_phase(5.0, INLET_QUALITY), 0.03, air(24.0, rh), AIR_MASS_RATE)
    }

    fn full_depth() -> Length {
        evaporator_coil().geometry().depth()
    }

    #[test]
    fn dry_air_sets_a_sensible_only_duty() {
        let coil = evaporator_coil();
        let region = coil.boiling(&evaporating(0.2), full_depth()).unwrap();

        assert_eq!(region.surface, SurfaceCondition::Dry);
        assert!(region.iters <= 100);

        let m = region.refrigerant_mass_rate.get::<kilogram_per_second>();
        assert_relative_eq!(m, 0.0377, max_relative = 0.01);

        let dh = (1.0 - INLET_QUALITY) * 216_400.0;
        assert_relative_eq!(region.heat_rate.get::<watt>(), m * dh, max_relative = 1e-6);

        let w_in = region.air_in.fluid.humidity_ratio.get::<ratio>();
        let w_out = region.air_out.fluid.humidity_ratio.get::<ratio>();
        assert_relative_eq!(w_out, w_in, epsilon = 1e-12);
        assert!(region.air_out.temperature < region.air_in.temperature);
    }

    #[test]
    fn humid_air_wets_the_surface() {
        let coil = evaporator_coil();
        let dry = coil.boiling(&evaporating(0.2), full_depth()).unwrap();
        let wet = coil.boiling(&evaporating(0.8), full_depth()).unwrap();

        assert_eq!(wet.surface, SurfaceCondition::Wet);
        assert!(wet.refrigerant_mass_rate > dry.refrigerant_mass_rate);
        assert_relative_eq!(
            wet.refrigerant_mass_rate.get::<kilogram_per_second>(),
            0.0814,
            max_relative = 0.02
        );

        let w_in = wet.air_in.fluid.humidity_ratio.get::<ratio>();
        let w_out = wet.air_out.fluid.humidity_ratio.get::<ratio>();
        assert!(w_out < w_in, "moisture removed: {w_in} -> {w_out}");
        assert!(wet.air_out.temperature < wet.air_in.temperature);
    }

    #[test]
    fn converged_flow_does_not_depend_on_the_guess() {
        let coil = evaporator_coil();
        let mut low = evaporating(0.5);
        low.refrigerant_mass_rate = MassRate::new::<kilogram_per_second>(0.001);
        let mut high = evaporating(0.5);
        high.refrigerant_mass_rate = MassRate::new::<kilogram_per_second>(1.0);

        let low = coil.boiling(&low, full_depth()).unwrap();
        let high = coil.boiling(&high, full_depth()).unwrap();
        assert_relative_eq!(
            low.refrigerant_mass_rate.get::<kilogram_per_second>(),
            high.refrigerant_mass_rate.get::<kilogram_per_second>(),
            epsilon = 0.1 / 3600.0
        );
    }

    #[test]
    fn rejects_inlets_outside_the_dome() {
        let coil = evaporator_coil();
        let superheated = inlets(refrigerant(15.0, 3.49), 0.03, air(24.0, 0.5), AIR_MASS_RATE);
        assert!(matches!(
            coil.boiling(&superheated, full_depth()),
            Err(RegionError::OutOfRange {
                quantity: "refrigerant inlet",
                ..
            })
        ));

        assert!(matches!(
            coil.boiling(&evaporating(0.5), Length::ZERO),
            Err(RegionError::OutOfRange { .. })
        ));
    }

    #[test]
    fn cold_air_cannot_boil_refrigerant() {
        let coil = evaporator_coil();
        let mut inlets = evaporating(0.5);
        inlets.air = air(2.0, 0.5);

        assert!(matches!(
            coil.boiling(&inlets, full_depth()),
            Err(RegionError::SecondLawViolation {
                region: RegionKind::Boiling,
                ..
            })
        ));
    }

    fn relative_gap(value: f64, reference: f64) -> f64 {
        (value - reference).abs() / reference.abs()
    }

    proptest! {
        #[test]
        fn rated_regions_close_both_balances(
            t_air in 10.0_f64..35.0,
            rh in 0.05_f64..0.95,
            air_kg_s in 0.25_f64..1.0,
        ) {
            let coil = evaporator_coil();
            let inlets = inlets(two_phase(5.0, INLET_QUALITY), 0.03, air(t_air, rh), air_kg_s);

            match coil.boiling(&inlets, full_depth()) {
                Ok(region) => {
                    let rfg = refrigerant_model();
                    let h_rfg = |state: &State<TestRefrigerant>| {
                        rfg.enthalpy(state).unwrap().get::<joule_per_kilogram>()
                    };
                    let h_air = |state: &State<MoistAir>| {
                        IdealMoistAir.enthalpy(state).unwrap().get::<joule_per_kilogram>()
                    };

                    let q = region.heat_rate.get::<watt>();
                    prop_assert!(q > 0.0);

                    let refrigerant_side = region.refrigerant_mass_rate.get::<kilogram_per_second>()
                        * (h_rfg(&region.refrigerant_out) - h_rfg(&region.refrigerant_in));
                    let air_side = air_kg_s * (h_air(&region.air_in) - h_air(&region.air_out));
                    prop_assert!(relative_gap(refrigerant_side, q) < 1e-9);
                    prop_assert!(relative_gap(air_side, q) < 1e-6);

                    // A wet surface is driven by enthalpy, not temperature.
                    if region.surface == SurfaceCondition::Dry {
                        let rate_equation = region.conductance.get::<watt_per_kelvin>()
                            * region.mean_temperature_difference.get::<delta_kelvin>();
                        prop_assert!(
                            relative_gap(rate_equation, q) < 1e-6,
                            "UA·ΔT {rate_equation} W vs {q} W"
                        );
                    }
                }
                Err(RegionError::Convergence(_)) => {}
                Err(other) => prop_assert!(false, "unexpected error: {other}"),
            }
        }
    }
}
