//! Building envelope constructions.
//!
//! A [`ConstructionAssembly`] stacks surface films, solid layers drawn from a
//! [`MaterialCatalog`], and layers of known resistance. As a
//! [`twine_core::Model`] it maps the air temperatures on either side to the
//! steady conductive heat flux through the construction.

pub(crate) mod core;

use twine_core::Model;
use uom::si::{
    f64::{HeatFluxDensity, ThermodynamicTemperature},
    heat_flux_density::watt_per_square_meter,
    heat_transfer::watt_per_square_meter_kelvin,
    temperature_interval::kelvin as delta_kelvin,
};

use crate::support::units::TemperatureDifference;

pub use self::core::{
    AssemblyBuilder, ConstructionAssembly, EnvelopeError, HeatFlowDirection, Layer, Material,
    MaterialCatalog, SURFACE_EMISSIVITY, SurfaceFilm,
};

/// Air temperatures on either side of a construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceTemperatures {
    pub inside: ThermodynamicTemperature,
    pub outside: ThermodynamicTemperature,
}

impl Model for ConstructionAssembly {
    type Input = SurfaceTemperatures;

    /// Heat flux from inside to outside; negative when heat flows inwards.
    type Output = HeatFluxDensity;

    type Error = EnvelopeError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let u = self.transmittance().get::<watt_per_square_meter_kelvin>();
        let delta_t = input.inside.minus(input.outside).get::<delta_kelvin>();
        Ok(HeatFluxDensity::new::<watt_per_square_meter>(u * delta_t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{f64::Length, length::centimeter, thermodynamic_temperature::degree_celsius};

    #[test]
    fn heat_flux_follows_the_temperature_difference() {
        let catalog = MaterialCatalog::common();
        let wall = ConstructionAssembly::builder("insulation board", &catalog)
            .solid("mineral-wool", Length::new::<centimeter>(10.0))
            .unwrap()
            .build()
            .unwrap();

        let flux = |inside, outside| {
            wall.call(&SurfaceTemperatures {
                inside: ThermodynamicTemperature::new::<degree_celsius>(inside),
                outside: ThermodynamicTemperature::new::<degree_celsius>(outside),
            })
            .unwrap()
            .get::<watt_per_square_meter>()
        };

        // U = 0.04 / 0.1 = 0.4 W/m²·K.
        assert_relative_eq!(flux(20.0, -5.0), 10.0, max_relative = 1e-9);
        assert_relative_eq!(flux(20.0, 30.0), -4.0, max_relative = 1e-9);
    }
}
