//! Heat transfer and friction correlations.
//!
//! Coil regions ask a [`Correlation`] for a convective coefficient and a
//! pressure drop on each side. Real correlations (Wang, Kandlikar, Shah...)
//! plug in through the same trait.

use std::convert::Infallible;

use uom::si::{
    f64::{HeatTransfer, Length, Power, Pressure, Ratio},
    mass_density::kilogram_per_cubic_meter,
    pressure::pascal,
    ratio::ratio,
};

use crate::support::{thermo::State, units::MassFlux};

use super::FinTubeGeometry;

/// Flow conditions on one side of a region, evaluated at its mean state.
#[derive(Debug, Clone, Copy)]
pub struct FlowConditions<'a, Fluid> {
    pub mean: &'a State<Fluid>,
    pub mass_flux: MassFlux,
    pub hydraulic_diameter: Length,
    pub flow_length: Length,
    pub heat_rate: Power,
}

/// Heat transfer correlation for one side of a fin-tube coil.
pub trait Correlation<Fluid> {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Convective heat transfer coefficient.
    ///
    /// # Errors
    ///
    /// Returns `Self::Error` if the conditions are outside the correlation's range.
    fn convective_coefficient(
        &self,
        geometry: &FinTubeGeometry,
        flow: &FlowConditions<'_, Fluid>,
    ) -> Result<HeatTransfer, Self::Error>;

    /// Pressure drop from inlet to outlet.
    ///
    /// # Errors
    ///
    /// Returns `Self::Error` if the conditions are outside the correlation's range.
    fn pressure_drop(
        &self,
        geometry: &FinTubeGeometry,
        flow: &FlowConditions<'_, Fluid>,
        inlet: &State<Fluid>,
        outlet: &State<Fluid>,
    ) -> Result<Pressure, Self::Error>;

    /// Fin efficiency at the given coefficient.
    ///
    /// Defaults to the geometry's equivalent circular fin.
    ///
    /// # Errors
    ///
    /// Returns `Self::Error` if the efficiency cannot be evaluated.
    fn fin_efficiency(
        &self,
        geometry: &FinTubeGeometry,
        coefficient: HeatTransfer,
    ) -> Result<Ratio, Self::Error> {
        Ok(geometry.fin_efficiency(coefficient))
    }
}

/// A fixed convective coefficient and Fanning friction factor.
///
/// Pressure drop is the core friction term plus flow acceleration:
///
/// `Δp = G²/(2·ρ_in) · [4·f·(L/D_h)·(ρ_in/ρ_m) + 2·(ρ_in/ρ_out − 1)]`
///
/// with `1/ρ_m` the mean of the inlet and outlet specific volumes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantCoefficient {
    pub coefficient: HeatTransfer,
    pub friction_factor: Ratio,
}

impl<Fluid> Correlation<Fluid> for ConstantCoefficient {
    type Error = Infallible;

    fn convective_coefficient(
        &self,
        _geometry: &FinTubeGeometry,
        _flow: &FlowConditions<'_, Fluid>,
    ) -> Result<HeatTransfer, Self::Error> {
        Ok(self.coefficient)
    }

    fn pressure_drop(
        &self,
        _geometry: &FinTubeGeometry,
        flow: &FlowConditions<'_, Fluid>,
        inlet: &State<Fluid>,
        outlet: &State<Fluid>,
    ) -> Result<Pressure, Self::Error> {
        let d_h = flow.hydraulic_diameter.value;
        if d_h <= 0.0 || flow.flow_length.value <= 0.0 {
            return Ok(Pressure::new::<pascal>(0.0));
        }

        let rho_in = inlet.density.get::<kilogram_per_cubic_meter>();
        let rho_out = outlet.density.get::<kilogram_per_cubic_meter>();
        let rho_mean = 2.0 / (1.0 / rho_in + 1.0 / rho_out);
        let g = flow.mass_flux.value;
        let f = self.friction_factor.get::<ratio>();

        let friction = 4.0 * f * (flow.flow_length.value / d_h) * (rho_in / rho_mean);
        let acceleration = 2.0 * (rho_in / rho_out - 1.0);

        Ok(Pressure::new::<pascal>(
            g * g / (2.0 * rho_in) * (friction + acceleration),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        area::square_meter,
        f64::{Area, MassDensity, MassRate, ThermodynamicTemperature},
        heat_transfer::watt_per_square_meter_kelvin,
        length::millimeter,
        mass_rate::kilogram_per_second,
        power::watt,
        thermodynamic_temperature::degree_celsius,
    };

    use crate::{
        models::thermal::fin_tube::core::test_support::condenser_dimensions,
        support::thermo::fluid::MoistAir,
    };

    fn air(t_c: f64, rho: f64) -> State<MoistAir> {
        State::new(
            ThermodynamicTemperature::new::<degree_celsius>(t_c),
            MassDensity::new::<kilogram_per_cubic_meter>(rho),
            MoistAir::dry(),
        )
    }

    #[test]
    fn friction_and_acceleration() {
        let geometry = FinTubeGeometry::new(condenser_dimensions()).unwrap();
        let correlation = ConstantCoefficient {
            coefficient: HeatTransfer::new::<watt_per_square_meter_kelvin>(60.0),
            friction_factor: Ratio::new::<ratio>(0.02),
        };

        let inlet = air(35.0, 1.2);
        let outlet = air(45.0, 1.2);
        let mean = air(40.0, 1.2);
        let flow = FlowConditions {
            mean: &mean,
            mass_flux: MassRate::new::<kilogram_per_second>(3.0) / Area::new::<square_meter>(1.0),
            hydraulic_diameter: Length::new::<millimeter>(2.0),
            flow_length: Length::new::<millimeter>(110.0),
            heat_rate: Power::new::<watt>(1000.0),
        };

        let isothermal = correlation
            .pressure_drop(&geometry, &flow, &inlet, &outlet)
            .unwrap();
        // 4·0.02·55·9/(2·1.2)
        assert_relative_eq!(isothermal.get::<pascal>(), 16.5, max_relative = 1e-12);

        let heated = correlation
            .pressure_drop(&geometry, &flow, &inlet, &air(45.0, 1.1))
            .unwrap();
        assert!(heated > isothermal);
    }
}
