//! Subcooling regions rated for a known flow length.

use uom::si::{
    f64::{Length, Power, TemperatureInterval, ThermalConductance, ThermodynamicTemperature},
    power::watt,
    temperature_interval::kelvin as delta_kelvin,
    thermal_conductance::watt_per_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::support::{
    hx::{CapacitanceRate, CounterFlow, Effectiveness, EffectivenessRelation, Ntu},
    iterate::fixed_point,
    thermo::fluid::MoistAir,
    units::TemperatureDifference,
};

use crate::models::thermal::fin_tube::core::{
    Correlation, HotStream, HumidAirModel, Inlets, RefrigerantModel, RegionError, RegionKind,
    RegionSolution, StreamEnds, SurfaceCondition, mean_temperatures,
};

use super::{Coil, Resolved, Streams, non_negative_length, positive_rate};

/// Smallest outlet approach to the inlet temperature used when estimating
/// the refrigerant capacitance rate, in kelvin.
const MIN_TEMPERATURE_DROP: f64 = 1e-6;

impl<RM, AM, RC, AC> Coil<RM, AM, RC, AC> {
    /// Rates a subcooling region of the given flow length.
    ///
    /// The outlet temperature is iterated: each pass estimates both
    /// capacitance rates and mean states from the current outlet, evaluates
    /// `UA`, and applies the counterflow ε-NTU relation. An empty region
    /// passes the refrigerant through unchanged.
    ///
    /// # Errors
    ///
    /// - [`RegionError::OutOfRange`] for a negative flow length or
    ///   non-positive mass flow rates.
    /// - [`RegionError::SecondLawViolation`] if the air is not colder than
    ///   the refrigerant.
    /// - [`RegionError::Convergence`] if the outlet temperature does not settle.
    pub fn subcooling<Fluid: Clone>(
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
        let flow_length = non_negative_length("subcooling flow length", flow_length)?;
        let m_rfg = positive_rate("refrigerant mass flow rate", inlets.refrigerant_mass_rate)?;
        let m_air = positive_rate("air mass flow rate", inlets.air_mass_rate)?;
        let rfg_in = &inlets.refrigerant;
        let air_in = &inlets.air;

        let t_in = rfg_in.temperature.get::<kelvin>();
        let t_air_in = air_in.temperature.get::<kelvin>();
        let inlet_difference = t_in - t_air_in;
        if !(inlet_difference > 0.0) {
            return Err(RegionError::SecondLawViolation {
                region: RegionKind::Subcooling,
                mean_difference: TemperatureInterval::new::<delta_kelvin>(inlet_difference),
            });
        }

        let pressure = self.refrigerant_pressure(rfg_in)?;
        let h_in = self.refrigerant_enthalpy(rfg_in)?;

        if flow_length.value <= 0.0 {
            let streams = Streams {
                refrigerant_in: rfg_in.clone(),
                refrigerant_out: rfg_in.clone(),
                refrigerant_mean: rfg_in.clone(),
                refrigerant_mass_rate: m_rfg,
                air_in: *air_in,
                air_out: *air_in,
                air_mean: *air_in,
                air_mass_rate: m_air,
                heat_rate: Power::new::<watt>(0.0),
            };
            return self.finish(
                RegionKind::Subcooling,
                flow_length,
                Resolved {
                    streams,
                    conductance: ThermalConductance::new::<watt_per_kelvin>(0.0),
                    effectiveness: Effectiveness::saturating(0.0),
                    mean_difference: inlet_difference,
                    surface: SurfaceCondition::Dry,
                },
                0,
            );
        }

        let rated = fixed_point(
            "subcooled outlet temperature",
            t_in - 0.5 * inlet_difference,
            &self.config.outlet_temperature(),
            |guess| {
                let t_guess = guess.clamp(t_air_in, t_in - MIN_TEMPERATURE_DROP);
                let estimate = self.refrigerant_at_temperature(
                    rfg_in,
                    pressure,
                    ThermodynamicTemperature::new::<kelvin>(t_guess),
                )?;
                let c_rfg = m_rfg.value * (h_in - self.refrigerant_enthalpy(&estimate)?)
                    / (t_in - t_guess);

                let air_estimate = self.air_after(air_in, m_air, c_rfg * (t_in - t_guess))?;
                let c_air = self.air_capacitance(m_air, air_in, &air_estimate)?;

                let means = mean_temperatures(
                    &StreamEnds {
                        inlet: rfg_in.temperature,
                        outlet: estimate.temperature,
                        capacitance_rate: ThermalConductance::new::<watt_per_kelvin>(c_rfg),
                    },
                    &StreamEnds {
                        inlet: air_in.temperature,
                        outlet: air_estimate.temperature,
                        capacitance_rate: c_air,
                    },
                    HotStream::Refrigerant,
                );

                let mut streams = Streams {
                    refrigerant_mean: self.refrigerant_mean(
                        rfg_in,
                        &estimate,
                        pressure,
                        means.refrigerant,
                    )?,
                    air_mean: self.air_at_temperature(air_in, means.air)?,
                    refrigerant_in: rfg_in.clone(),
                    refrigerant_out: estimate,
                    refrigerant_mass_rate: m_rfg,
                    air_in: *air_in,
                    air_out: air_estimate,
                    air_mass_rate: m_air,
                    heat_rate: Power::new::<watt>(c_rfg * (t_in - t_guess)),
                };

                let transfer = self.transfer(flow_length, &streams)?;
                let conductance = self.conductance(flow_length, &transfer);

                let rates = [
                    capacitance("refrigerant capacitance rate", c_rfg)?,
                    capacitance("air capacitance rate", c_air.get::<watt_per_kelvin>())?,
                ];
                let ntu = Ntu::from_conductance_and_capacitance_rates(conductance, rates)
                    .map_err(|err| RegionError::out_of_range("NTU", err.to_string()))?;
                let effectiveness = CounterFlow.effectiveness(ntu, rates);
                let q = effectiveness
                    .heat_rate(rates, rfg_in.temperature.minus(air_in.temperature))
                    .get::<watt>();

                let outlet =
                    self.refrigerant_at_enthalpy(rfg_in, pressure, h_in - q / m_rfg.value)?;
                let t_next = outlet.temperature.get::<kelvin>();

                streams.refrigerant_out = outlet;
                streams.air_out = self.air_after(air_in, m_air, q)?;
                streams.heat_rate = Power::new::<watt>(q);

                let mean_difference = means.refrigerant.minus(means.air).get::<delta_kelvin>();
                Ok::<_, RegionError>((
                    t_next,
                    Resolved {
                        streams,
                        conductance,
                        effectiveness,
                        mean_difference,
                        surface: SurfaceCondition::Dry,
                    },
                ))
            },
        )?;

        self.finish(RegionKind::Subcooling, flow_length, rated.output, rated.iters)
    }
}

fn capacitance(quantity: &'static str, rate: f64) -> Result<CapacitanceRate, RegionError> {
    CapacitanceRate::new::<watt_per_kelvin>(rate)
        .map_err(|err| RegionError::out_of_range(quantity, format!("{rate} W/K: {err}")))
}
