//! Condenser composition: desuperheating, condensing, and subcooling regions.

use tracing::warn;
use uom::{
    ConstZero,
    si::{
        f64::{Length, Power, Pressure},
        length::meter,
    },
};

use crate::support::{
    iterate::fixed_point,
    thermo::{State, VaporQuality, fluid::MoistAir},
};

use crate::models::thermal::fin_tube::core::{
    Correlation, HumidAirModel, Inlets, RefrigerantModel, RegionError, RegionKind, RegionSolution,
};

use super::Coil;

/// A condenser rated at one operating point.
///
/// Refrigerant passes the regions in the order desuperheating, condensing,
/// subcooling. Air crosses them in the opposite order.
#[derive(Debug, Clone, PartialEq)]
pub struct CondenserSolution<Fluid> {
    /// Absent when the refrigerant enters saturated or two-phase.
    pub desuperheating: Option<RegionSolution<Fluid>>,
    pub condensing: RegionSolution<Fluid>,
    pub subcooling: RegionSolution<Fluid>,

    /// Total heat rejected to the air.
    pub heat_rate: Power,

    pub refrigerant_out: State<Fluid>,
    pub air_out: State<MoistAir>,
    pub air_pressure_drop: Pressure,
    pub refrigerant_pressure_drop: Pressure,

    /// Flow length of the desuperheating and condensing regions together
    /// beyond the core depth.
    ///
    /// Zero for a feasible design. When positive the subcooling region is
    /// empty and the refrigerant leaves before it has fully condensed in a
    /// real coil of this depth.
    pub length_excess: Length,

    /// Outer iterations on the subcooling length.
    pub iters: usize,
}

impl<Fluid> CondenserSolution<Fluid> {
    /// Sum of the region flow lengths.
    pub fn flow_length(&self) -> Length {
        self.regions()
            .fold(Length::ZERO, |total, region| total + region.flow_length)
    }

    /// Regions in refrigerant flow order.
    pub fn regions(&self) -> impl Iterator<Item = &RegionSolution<Fluid>> {
        self.desuperheating
            .iter()
            .chain([&self.condensing, &self.subcooling])
    }
}

/// Regions from one pass over a subcooling length guess.
struct Pass<Fluid> {
    desuperheating: Option<RegionSolution<Fluid>>,
    condensing: RegionSolution<Fluid>,
    subcooling: RegionSolution<Fluid>,
    excess: f64,
}

impl<RM, AM, RC, AC> Coil<RM, AM, RC, AC> {
    /// Rates the coil as a condenser.
    ///
    /// The subcooling length is iterated. Each pass rates subcooling over the
    /// current length, then sizes condensing and desuperheating with the air
    /// each region receives, and assigns whatever depth is left to subcooling.
    ///
    /// # Errors
    ///
    /// - [`RegionError::OutOfRange`] if the refrigerant enters as liquid.
    /// - [`RegionError::Convergence`] if the subcooling length does not settle.
    /// - Any error from the region solvers.
    pub fn condenser<Fluid: Clone>(
        &self,
        inlets: &Inlets<Fluid>,
    ) -> Result<CondenserSolution<Fluid>, RegionError>
    where
        RM: RefrigerantModel<Fluid>,
        AM: HumidAirModel,
        RC: Correlation<Fluid>,
        AC: Correlation<MoistAir>,
    {
        let rfg_in = &inlets.refrigerant;
        let pressure = self.refrigerant_pressure(rfg_in)?;
        let saturated_vapor = self.saturated(rfg_in, pressure, VaporQuality::saturated_vapor())?;
        let saturated_liquid =
            self.saturated(rfg_in, pressure, VaporQuality::saturated_liquid())?;

        let h_in = self.refrigerant_enthalpy(rfg_in)?;
        if h_in <= self.refrigerant_enthalpy(&saturated_liquid)? {
            return Err(RegionError::out_of_range(
                "refrigerant inlet",
                "condenser inlet is already liquid",
            ));
        }
        let superheated = h_in > self.refrigerant_enthalpy(&saturated_vapor)?;
        let condensing_inlet = if superheated {
            saturated_vapor.clone()
        } else {
            rfg_in.clone()
        };

        let depth = self.geometry.depth().get::<meter>();
        let with = |refrigerant: &State<Fluid>, air: &State<MoistAir>| Inlets {
            refrigerant: refrigerant.clone(),
            refrigerant_mass_rate: inlets.refrigerant_mass_rate,
            air: *air,
            air_mass_rate: inlets.air_mass_rate,
        };

        let composed = fixed_point(
            "subcooling flow length",
            0.1 * depth,
            &self.config.composer_flow_length(),
            |subcooling_length| {
                let subcooling = self.subcooling(
                    &with(&saturated_liquid, &inlets.air),
                    Length::new::<meter>(subcooling_length.max(0.0)),
                )?;

                let condensing = self.size(
                    RegionKind::Condensing,
                    &with(&condensing_inlet, &subcooling.air_out),
                    &saturated_liquid,
                    self.default_flow_length(),
                )?;

                let desuperheating = if superheated {
                    Some(self.size(
                        RegionKind::Desuperheating,
                        &with(rfg_in, &condensing.air_out),
                        &saturated_vapor,
                        self.default_flow_length(),
                    )?)
                } else {
                    None
                };

                let used = condensing.flow_length.get::<meter>()
                    + desuperheating
                        .as_ref()
                        .map_or(0.0, |region| region.flow_length.get::<meter>());
                let remaining = depth - used;

                Ok::<_, RegionError>((
                    remaining.max(0.0),
                    Pass {
                        desuperheating,
                        condensing,
                        subcooling,
                        excess: (-remaining).max(0.0),
                    },
                ))
            },
        )?;

        let Pass {
            desuperheating,
            condensing,
            subcooling,
            excess,
        } = composed.output;

        if excess > 0.0 {
            warn!(
                excess_m = excess,
                depth_m = depth,
                "condenser regions need more flow length than the core provides"
            );
        }

        let last = desuperheating.as_ref().unwrap_or(&condensing);
        let air_out = last.air_out;

        let mut solution = CondenserSolution {
            heat_rate: Power::ZERO,
            refrigerant_out: subcooling.refrigerant_out.clone(),
            air_out,
            air_pressure_drop: Pressure::ZERO,
            refrigerant_pressure_drop: Pressure::ZERO,
            length_excess: Length::new::<meter>(excess),
            iters: composed.iters,
            desuperheating,
            condensing,
            subcooling,
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

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        available_energy::joule_per_kilogram, mass_rate::kilogram_per_second, power::watt,
        thermodynamic_temperature::degree_celsius,
    };

    use crate::{
        models::thermal::fin_tube::core::{
            SolveConfig,
            test_support::{air, condenser_coil, inlets, refrigerant, two_phase},
        },
        support::{
            iterate::NotConverged,
            thermo::{
                capability::HasEnthalpy, fluid::test_refrigerant::TestRefrigerant,
                model::IdealMoistAir,
            },
        },
    };

    fn hot_gas(mass_rate: f64) -> Inlets<TestRefrigerant> {
        inlets(refrigerant(81.7, 13.179), mass_rate, air(35.0, 0.3), 1.1)
    }

    #[test]
    fn regions_fill_the_core() {
        let coil = condenser_coil();
        let inlets = hot_gas(168.745 / 3600.0);
        let solution = coil.condenser(&inlets).unwrap();

        assert!(solution.desuperheating.is_some());
        assert_eq!(solution.regions().count(), 3);
        assert_eq!(solution.length_excess, Length::ZERO);
        assert!(solution.subcooling.flow_length > Length::ZERO);
        assert_relative_eq!(
            solution.flow_length().get::<meter>(),
            coil.geometry().depth().get::<meter>(),
            epsilon = 1.5e-3
        );

        let total: f64 = solution.regions().map(|r| r.heat_rate.get::<watt>()).sum();
        assert_relative_eq!(solution.heat_rate.get::<watt>(), total, max_relative = 1e-12);
        assert!(total > 10_000.0 && total < 12_000.0, "duty {total} W");

        let h = |state: &State<MoistAir>| {
            IdealMoistAir.enthalpy(state).unwrap().get::<joule_per_kilogram>()
        };
        let air_gain = inlets.air_mass_rate.get::<kilogram_per_second>()
            * (h(&solution.air_out) - h(&inlets.air));
        assert_relative_eq!(air_gain, total, max_relative = 1e-6);

        let t_out = solution.refrigerant_out.temperature.get::<degree_celsius>();
        assert!(t_out < 50.0 && t_out > 35.0, "subcooled to {t_out} °C");
    }

    #[test]
    fn oversized_duty_reports_length_excess() {
        let solution = condenser_coil().condenser(&hot_gas(0.055)).unwrap();

        assert!(solution.length_excess > Length::ZERO);
        assert_eq!(solution.subcooling.flow_length, Length::ZERO);
        assert_eq!(solution.subcooling.heat_rate, Power::ZERO);
    }

    #[test]
    fn two_phase_inlet_skips_desuperheating() {
        let mut inlets = hot_gas(0.04);
        inlets.refrigerant = two_phase(50.0, 0.5);
        let solution = condenser_coil().condenser(&inlets).unwrap();

        assert!(solution.desuperheating.is_none());
        assert_eq!(solution.regions().count(), 2);
        assert_eq!(solution.condensing.refrigerant_in, inlets.refrigerant);
    }

    #[test]
    fn single_composer_pass_does_not_converge() {
        let coil = condenser_coil().with_config(SolveConfig {
            composer_iters: 1,
            flow_length_iters: 50,
            flow_length_tol: Length::new::<meter>(1e-9),
            ..SolveConfig::default()
        });

        assert!(matches!(
            coil.condenser(&hot_gas(168.745 / 3600.0)),
            Err(RegionError::Convergence(NotConverged {
                quantity: "subcooling flow length",
                iters: 1,
                ..
            }))
        ));
    }

    #[test]
    fn liquid_inlet_is_out_of_range() {
        let mut inlets = hot_gas(0.04);
        inlets.refrigerant = refrigerant(30.0, 13.179);

        assert!(matches!(
            condenser_coil().condenser(&inlets),
            Err(RegionError::OutOfRange {
                quantity: "refrigerant inlet",
                ..
            })
        ));
    }
}
