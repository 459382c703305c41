//! Evaporator composition: boiling then superheating.

use uom::{
    ConstZero,
    si::{
        f64::{Length, MassRate, Power, Pressure, TemperatureInterval},
        mass_rate::kilogram_per_second,
        temperature_interval::kelvin as delta_kelvin,
    },
};

use crate::support::{
    iterate::fixed_point,
    thermo::{State, VaporQuality, fluid::MoistAir},
};

use crate::models::thermal::fin_tube::core::{
    Correlation, HumidAirModel, Inlets, RefrigerantModel, RegionError, RegionSolution,
    SurfaceCondition,
};

use super::Coil;

/// Operating point of an evaporator.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaporatorInput<Fluid> {
    /// `inlets.refrigerant_mass_rate` is an initial guess.
    pub inlets: Inlets<Fluid>,

    /// Superheat above saturation at the refrigerant outlet.
    ///
    /// Zero leaves the refrigerant as saturated vapor with no superheating
    /// region.
    pub superheat: TemperatureInterval,
}

/// An evaporator rated at one operating point.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaporatorSolution<Fluid> {
    pub boiling: RegionSolution<Fluid>,
    pub superheating: Option<RegionSolution<Fluid>>,

    /// Refrigerant flow the coil evaporates at this operating point.
    pub refrigerant_mass_rate: MassRate,

    /// Total heat absorbed from the air.
    pub heat_rate: Power,

    pub refrigerant_out: State<Fluid>,
    pub air_out: State<MoistAir>,
    pub air_pressure_drop: Pressure,
    pub refrigerant_pressure_drop: Pressure,

    /// Surface condition of the boiling region.
    pub surface: SurfaceCondition,

    /// Outer iterations on the refrigerant mass flow rate.
    pub iters: usize,
}

impl<Fluid> EvaporatorSolution<Fluid> {
    pub fn flow_length(&self) -> Length {
        self.regions()
            .fold(Length::ZERO, |total, region| total + region.flow_length)
    }

    /// Regions in refrigerant flow order.
    pub fn regions(&self) -> impl Iterator<Item = &RegionSolution<Fluid>> {
        std::iter::once(&self.boiling).chain(self.superheating.iter())
    }
}

impl<RM, AM, RC, AC> Coil<RM, AM, RC, AC> {
    /// Rates the coil as an evaporator.
    ///
    /// The refrigerant mass flow rate is iterated. Each pass sizes the
    /// superheating region against the entering air at the current flow,
    /// then rates boiling over the remaining depth with the air leaving the
    /// superheating region. Boiling returns the flow it can evaporate, which
    /// seeds the next pass.
    ///
    /// # Errors
    ///
    /// - [`RegionError::OutOfRange`] if the refrigerant does not enter
    ///   two-phase or the superheat is negative.
    /// - [`RegionError::InsufficientLength`] if superheating alone needs the
    ///   whole core depth.
    /// - [`RegionError::Convergence`] if the mass flow rate does not settle.
    /// - Any error from the region solvers.
    pub fn evaporator<Fluid: Clone>(
        &self,
        input: &EvaporatorInput<Fluid>,
    ) -> Result<EvaporatorSolution<Fluid>, RegionError>
    where
        RM: RefrigerantModel<Fluid>,
        AM: HumidAirModel,
        RC: Correlation<Fluid>,
        AC: Correlation<MoistAir>,
    {
        let inlets = &input.inlets;
        let superheat = input.superheat.get::<delta_kelvin>();
        if !(superheat >= 0.0 && superheat.is_finite()) {
            return Err(RegionError::out_of_range(
                "superheat",
                format!("must be non-negative, got {superheat} K"),
            ));
        }

        let rfg_in = &inlets.refrigerant;
        if self.refrigerant.quality(rfg_in).is_err() {
            return Err(RegionError::out_of_range(
                "refrigerant inlet",
                "evaporator needs a two-phase inlet",
            ));
        }
        let pressure = self.refrigerant_pressure(rfg_in)?;
        let saturated_vapor = self.saturated(rfg_in, pressure, VaporQuality::saturated_vapor())?;

        let depth = self.geometry.depth();
        let composed = fixed_point(
            "evaporator refrigerant mass flow rate",
            inlets.refrigerant_mass_rate.get::<kilogram_per_second>(),
            &self.config.composer_mass_rate(),
            |m| {
                let refrigerant_mass_rate = MassRate::new::<kilogram_per_second>(m);

                let superheating = if superheat > 0.0 {
                    Some(self.superheating(
                        &Inlets {
                            refrigerant: saturated_vapor.clone(),
                            refrigerant_mass_rate,
                            air: inlets.air,
                            air_mass_rate: inlets.air_mass_rate,
                        },
                        input.superheat,
                    )?)
                } else {
                    None
                };

                let superheat_length = superheating
                    .as_ref()
                    .map_or(Length::ZERO, |region| region.flow_length);
                if superheat_length >= depth {
                    return Err(RegionError::InsufficientLength {
                        required: superheat_length,
                        available: depth,
                    });
                }

                let boiling_air = superheating
                    .as_ref()
                    .map_or(inlets.air, |region| region.air_out);
                let boiling = self.boiling(
                    &Inlets {
                        refrigerant: rfg_in.clone(),
                        refrigerant_mass_rate,
                        air: boiling_air,
                        air_mass_rate: inlets.air_mass_rate,
                    },
                    depth - superheat_length,
                )?;

                let m_next = boiling.refrigerant_mass_rate.get::<kilogram_per_second>();
                Ok((m_next, (boiling, superheating)))
            },
        )?;

        let (boiling, superheating) = composed.output;
        let refrigerant_out = superheating
            .as_ref()
            .map_or(&boiling.refrigerant_out, |region| &region.refrigerant_out)
            .clone();
        let air_out = boiling.air_out;

        let mut solution = EvaporatorSolution {
            refrigerant_mass_rate: boiling.refrigerant_mass_rate,
            heat_rate: Power::ZERO,
            refrigerant_out,
            air_out,
            air_pressure_drop: Pressure::ZERO,
            refrigerant_pressure_drop: Pressure::ZERO,
            surface: boiling.surface,
            iters: composed.iters,
            boiling,
            superheating,
        };
        let (heat_rate, air_dp, refrigerant_dp) = solution.regions().fold(
            (Power::ZERO, Pressure::ZERO, Pressure::ZERO),
            |(q, air, rfg), region| {
                (
                    q + region.heat_rate,
                    air + region.air_pressure_drop,
                    rfg + region.refrigerant_pressure_drop,
                )
            },
        );
        solution.heat_rate = heat_rate;
        solution.air_pressure_drop = air_dp;
        solution.refrigerant_pressure_drop = refrigerant_dp;

        Ok(solution)
    }
}
