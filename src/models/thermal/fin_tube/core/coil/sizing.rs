//! Regions sized for the flow length that carries a known duty.
//!
//! Both end states of the refrigerant are fixed by the region's definition,
//! so the duty follows from the energy balance alone. The flow length is then
//! iterated until the area it provides matches the area the rate equation
//! requires at the mean temperature difference.

use uom::si::{
    area::square_meter,
    f64::{Area, Length, Power, TemperatureInterval},
    length::meter,
    power::watt,
    temperature_interval::kelvin as delta_kelvin,
    thermal_conductance::watt_per_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::support::{
    hx::Effectiveness,
    iterate::fixed_point,
    thermo::{State, VaporQuality, fluid::MoistAir},
    units::TemperatureDifference,
};

use crate::models::thermal::fin_tube::core::{
    Correlation, HotStream, HumidAirModel, Inlets, RefrigerantModel, RegionError, RegionKind,
    RegionSolution, StreamEnds, SurfaceCondition, mean_temperatures,
};

use super::{Coil, Resolved, Streams, positive_rate, refrigerant_capacitance};

impl<RM, AM, RC, AC> Coil<RM, AM, RC, AC> {
    /// Sizes the region that cools superheated vapor to saturated vapor.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::OutOfRange`] if the refrigerant is not
    /// superheated, or any error from [`size`](Self::size).
    pub fn desuperheating<Fluid: Clone>(
        &self,
        inlets: &Inlets<Fluid>,
    ) -> Result<RegionSolution<Fluid>, RegionError>
    where
        RM: RefrigerantModel<Fluid>,
        AM: HumidAirModel,
        RC: Correlation<Fluid>,
        AC: Correlation<MoistAir>,
    {
        let pressure = self.refrigerant_pressure(&inlets.refrigerant)?;
        let outlet =
            self.saturated(&inlets.refrigerant, pressure, VaporQuality::saturated_vapor())?;

        if self.refrigerant_enthalpy(&inlets.refrigerant)? <= self.refrigerant_enthalpy(&outlet)? {
            return Err(RegionError::out_of_range(
                "refrigerant inlet",
                "desuperheating needs superheated vapor",
            ));
        }

        self.size(
            RegionKind::Desuperheating,
            inlets,
            &outlet,
            self.default_flow_length(),
        )
    }

    /// Sizes the region that condenses refrigerant to saturated liquid.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::OutOfRange`] if the refrigerant is already
    /// liquid, or any error from [`size`](Self::size).
    pub fn condensing<Fluid: Clone>(
        &self,
        inlets: &Inlets<Fluid>,
    ) -> Result<RegionSolution<Fluid>, RegionError>
    where
        RM: RefrigerantModel<Fluid>,
        AM: HumidAirModel,
        RC: Correlation<Fluid>,
        AC: Correlation<MoistAir>,
    {
        let pressure = self.refrigerant_pressure(&inlets.refrigerant)?;
        let outlet =
            self.saturated(&inlets.refrigerant, pressure, VaporQuality::saturated_liquid())?;

        if self.refrigerant_enthalpy(&inlets.refrigerant)? <= self.refrigerant_enthalpy(&outlet)? {
            return Err(RegionError::out_of_range(
                "refrigerant inlet",
                "condensing needs vapor or a two-phase mixture",
            ));
        }

        self.size(
            RegionKind::Condensing,
            inlets,
            &outlet,
            self.default_flow_length(),
        )
    }

    /// Sizes the region that heats saturated vapor by `superheat`.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::OutOfRange`] if `superheat` is not positive,
    /// or any error from [`size`](Self::size).
    pub fn superheating<Fluid: Clone>(
        &self,
        inlets: &Inlets<Fluid>,
        superheat: TemperatureInterval,
    ) -> Result<RegionSolution<Fluid>, RegionError>
    where
        RM: RefrigerantModel<Fluid>,
        AM: HumidAirModel,
        RC: Correlation<Fluid>,
        AC: Correlation<MoistAir>,
    {
        let superheat = superheat.get::<delta_kelvin>();
        if !(superheat > 0.0 && superheat.is_finite()) {
            return Err(RegionError::out_of_range(
                "superheat",
                format!("must be positive, got {superheat} K"),
            ));
        }

        let pressure = self.refrigerant_pressure(&inlets.refrigerant)?;
        let saturated =
            self.saturated(&inlets.refrigerant, pressure, VaporQuality::saturated_vapor())?;
        let outlet = self.refrigerant_at_temperature(
            &inlets.refrigerant,
            pressure,
            saturated.temperature + TemperatureInterval::new::<delta_kelvin>(superheat),
        )?;

        self.size(
            RegionKind::Superheating,
            inlets,
            &outlet,
            self.default_flow_length(),
        )
    }

    /// Sizes a region whose refrigerant leaves at `refrigerant_out`.
    ///
    /// The refrigerant pressure is taken as constant across the region, and
    /// the air keeps its humidity ratio. `initial_flow_length` seeds the
    /// iteration.
    ///
    /// # Errors
    ///
    /// - [`RegionError::OutOfRange`] for non-positive mass flow rates.
    /// - [`RegionError::SecondLawViolation`] if the mean or either terminal
    ///   temperature difference would drive heat from the cold stream to the
    ///   hot one.
    /// - [`RegionError::Convergence`] if the flow length does not settle.
    /// - Property and correlation failures, wrapped with context.
    pub fn size<Fluid: Clone>(
        &self,
        kind: RegionKind,
        inlets: &Inlets<Fluid>,
        refrigerant_out: &State<Fluid>,
        initial_flow_length: Length,
    ) -> Result<RegionSolution<Fluid>, RegionError>
    where
        RM: RefrigerantModel<Fluid>,
        AM: HumidAirModel,
        RC: Correlation<Fluid>,
        AC: Correlation<MoistAir>,
    {
        let m_rfg = positive_rate("refrigerant mass flow rate", inlets.refrigerant_mass_rate)?;
        let m_air = positive_rate("air mass flow rate", inlets.air_mass_rate)?;
        let rfg_in = &inlets.refrigerant;
        let air_in = &inlets.air;

        let pressure = self.refrigerant_pressure(rfg_in)?;
        let dh = self.refrigerant_enthalpy(rfg_in)? - self.refrigerant_enthalpy(refrigerant_out)?;
        let q = m_rfg.value * dh;
        let hot = if q >= 0.0 {
            HotStream::Refrigerant
        } else {
            HotStream::Air
        };

        let air_out = self.air_after(air_in, m_air, q)?;
        let c_rfg = refrigerant_capacitance(
            m_rfg,
            dh,
            rfg_in.temperature.minus(refrigerant_out.temperature).get::<delta_kelvin>(),
        );
        let c_air = self.air_capacitance(m_air, air_in, &air_out)?;

        let means = mean_temperatures(
            &StreamEnds {
                inlet: rfg_in.temperature,
                outlet: refrigerant_out.temperature,
                capacitance_rate: c_rfg,
            },
            &StreamEnds {
                inlet: air_in.temperature,
                outlet: air_out.temperature,
                capacitance_rate: c_air,
            },
            hot,
        );

        let sign = hot.sign();
        let mean_difference = sign * means.refrigerant.minus(means.air).get::<delta_kelvin>();
        let closest_approach = [
            sign * rfg_in.temperature.minus(air_out.temperature).get::<delta_kelvin>(),
            sign * refrigerant_out.temperature.minus(air_in.temperature).get::<delta_kelvin>(),
        ]
        .into_iter()
        .fold(mean_difference, f64::min);
        if !(closest_approach > 0.0) {
            return Err(RegionError::SecondLawViolation {
                region: kind,
                mean_difference: TemperatureInterval::new::<delta_kelvin>(closest_approach),
            });
        }

        let streams = Streams {
            refrigerant_mean: self.refrigerant_mean(
                rfg_in,
                refrigerant_out,
                pressure,
                means.refrigerant,
            )?,
            air_mean: self.air_at_temperature(air_in, means.air)?,
            refrigerant_in: rfg_in.clone(),
            refrigerant_out: refrigerant_out.clone(),
            refrigerant_mass_rate: m_rfg,
            air_in: *air_in,
            air_out,
            air_mass_rate: m_air,
            heat_rate: Power::new::<watt>(q.abs()),
        };

        let duty = q.abs();
        let sized = fixed_point(
            "flow length",
            initial_flow_length.get::<meter>().max(0.0),
            &self.config.flow_length(),
            |guess| {
                let flow_length = Length::new::<meter>(guess.max(0.0));
                let transfer = self.transfer(flow_length, &streams)?;

                let h_i = transfer.inner.value;
                let h_o = transfer.surface_efficiency.value * transfer.outer.value;
                let alpha = self.area_ratio(flow_length);
                let inner_area = duty / mean_difference * (1.0 / h_i + 1.0 / (h_o * alpha));

                let next = self
                    .geometry
                    .flow_length_for_inner_area(Area::new::<square_meter>(inner_area));
                Ok::<_, RegionError>((next.get::<meter>(), ()))
            },
        )?;

        let flow_length = Length::new::<meter>(sized.value);
        let transfer = self.transfer(flow_length, &streams)?;
        let conductance = self.conductance(flow_length, &transfer);

        let c_min = c_rfg.min(c_air).get::<watt_per_kelvin>();
        let inlet_difference =
            (rfg_in.temperature.get::<kelvin>() - air_in.temperature.get::<kelvin>()).abs();
        let effectiveness = Effectiveness::saturating(duty / (c_min * inlet_difference));

        self.finish(
            kind,
            flow_length,
            Resolved {
                streams,
                conductance,
                effectiveness,
                mean_difference,
                surface: SurfaceCondition::Dry,
            },
            sized.iters,
        )
    }
}
