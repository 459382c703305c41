//! Layered constructions of a building envelope.
//!
//! An assembly is a stack of layers in series. Its thermal resistance is the
//! sum of the layer resistances and its transmittance is the reciprocal.

mod error;
mod film;
mod layer;
mod material;

use tracing::debug;
use uom::{
    ConstZero,
    si::{
        f64::{HeatTransfer, Length, Ratio},
        ratio::ratio,
    },
};

use crate::support::units::ThermalInsulance;

pub use error::EnvelopeError;
pub use film::{HeatFlowDirection, SURFACE_EMISSIVITY, SurfaceFilm};
pub use layer::Layer;
pub use material::{Material, MaterialCatalog};

/// A named stack of layers, listed from outside to inside.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructionAssembly {
    name: String,
    layers: Vec<Layer>,
}

impl ConstructionAssembly {
    /// Starts an assembly whose solid layers are resolved from `catalog`.
    pub fn builder<'a>(
        name: impl Into<String>,
        catalog: &'a MaterialCatalog,
    ) -> AssemblyBuilder<'a> {
        AssemblyBuilder {
            name: name.into(),
            catalog,
            layers: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Total thermal resistance, surface films included.
    pub fn thermal_resistance(&self) -> ThermalInsulance {
        self.layers
            .iter()
            .fold(ThermalInsulance::ZERO, |total, layer| {
                total + layer.thermal_resistance()
            })
    }

    /// Thermal transmittance, the U-value.
    pub fn transmittance(&self) -> HeatTransfer {
        Ratio::new::<ratio>(1.0) / self.thermal_resistance()
    }
}

/// Builds a [`ConstructionAssembly`] layer by layer.
#[derive(Debug, Clone)]
pub struct AssemblyBuilder<'a> {
    name: String,
    catalog: &'a MaterialCatalog,
    layers: Vec<Layer>,
}

impl AssemblyBuilder<'_> {
    pub fn film(mut self, film: SurfaceFilm) -> Self {
        self.layers.push(Layer::Film(film));
        self
    }

    /// Adds a layer of the named catalog material.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::UnknownMaterial`] if the catalog lacks the
    /// material, or [`EnvelopeError::OutOfRange`] for a non-positive thickness.
    pub fn solid(mut self, material_name: &str, thickness: Length) -> Result<Self, EnvelopeError> {
        let material = *self.catalog.get(material_name)?;
        self.layers
            .push(Layer::solid(material_name, material, thickness)?);
        Ok(self)
    }

    /// Adds a layer of known resistance.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::OutOfRange`] for a non-positive resistance.
    pub fn resistance(
        mut self,
        description: impl Into<String>,
        resistance: ThermalInsulance,
    ) -> Result<Self, EnvelopeError> {
        self.layers.push(Layer::resistance(description, resistance)?);
        Ok(self)
    }

    /// Finishes the assembly.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::OutOfRange`] if no layers were added.
    pub fn build(self) -> Result<ConstructionAssembly, EnvelopeError> {
        if self.layers.is_empty() {
            return Err(EnvelopeError::out_of_range(
                "layers",
                format!("assembly `{}` has no layers", self.name),
            ));
        }

        let assembly = ConstructionAssembly {
            name: self.name,
            layers: self.layers,
        };
        debug!(
            name = %assembly.name,
            layers = assembly.layers.len(),
            resistance = assembly.thermal_resistance().value,
            "construction assembly built"
        );
        Ok(assembly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        f64::{ThermalConductivity, ThermodynamicTemperature, Velocity},
        heat_transfer::watt_per_square_meter_kelvin,
        length::centimeter,
        thermal_conductivity::watt_per_meter_kelvin,
        thermodynamic_temperature::degree_celsius,
        velocity::meter_per_second,
    };

    fn celsius(value: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<degree_celsius>(value)
    }

    fn insulated_floor(catalog: &MaterialCatalog) -> Result<ConstructionAssembly, EnvelopeError> {
        let (outside, inside) = (celsius(0.0), celsius(20.0));
        let direction = HeatFlowDirection::vertical(outside, inside);

        ConstructionAssembly::builder("insulated floor", catalog)
            .film(SurfaceFilm::exterior(
                Velocity::new::<meter_per_second>(4.0),
                outside,
            )?)
            .solid("precast-slab-heavy-concrete", Length::new::<centimeter>(12.0))?
            .solid("polystyrene-extruded-sheet", Length::new::<centimeter>(10.0))?
            .solid("concrete-light-1600kg/m3", Length::new::<centimeter>(8.0))?
            .film(SurfaceFilm::interior(direction, inside)?)
            .build()
    }

    #[test]
    fn layers_add_in_series() {
        let floor = insulated_floor(&MaterialCatalog::common()).unwrap();

        assert_eq!(floor.name(), "insulated floor");
        assert_eq!(floor.layers().len(), 5);

        let insulation = &floor.layers()[2];
        assert_relative_eq!(
            insulation.thermal_resistance().value,
            0.1 / 0.035,
            max_relative = 1e-12
        );

        assert_relative_eq!(floor.thermal_resistance().value, 3.2403, epsilon = 1e-4);
        assert_relative_eq!(
            floor.transmittance().get::<watt_per_square_meter_kelvin>(),
            0.30862,
            epsilon = 1e-5
        );
    }

    #[test]
    fn fixed_resistances_count_toward_the_total() {
        let catalog = MaterialCatalog::common();
        let bare = ConstructionAssembly::builder("wall", &catalog)
            .solid("brick-masonry", Length::new::<centimeter>(9.0))
            .unwrap()
            .build()
            .unwrap();
        let with_gap = ConstructionAssembly::builder("wall", &catalog)
            .solid("brick-masonry", Length::new::<centimeter>(9.0))
            .unwrap()
            .resistance(
                "air gap",
                Length::new::<centimeter>(1.8)
                    / ThermalConductivity::new::<watt_per_meter_kelvin>(0.1),
            )
            .unwrap()
            .build()
            .unwrap();

        assert_relative_eq!(bare.thermal_resistance().value, 0.1, epsilon = 1e-12);
        assert_relative_eq!(with_gap.thermal_resistance().value, 0.28, epsilon = 1e-12);
    }

    #[test]
    fn unknown_material_stops_the_build() {
        let catalog = MaterialCatalog::new();
        let result = ConstructionAssembly::builder("wall", &catalog)
            .solid("brick-masonry", Length::new::<centimeter>(9.0));
        assert!(matches!(
            result,
            Err(EnvelopeError::UnknownMaterial { name }) if name == "brick-masonry"
        ));
    }

    #[test]
    fn empty_and_degenerate_layers_are_rejected() {
        let catalog = MaterialCatalog::common();
        assert!(
            ConstructionAssembly::builder("nothing", &catalog)
                .build()
                .is_err()
        );
        assert!(
            ConstructionAssembly::builder("wall", &catalog)
                .solid("brick-masonry", Length::new::<centimeter>(0.0))
                .is_err()
        );
    }
}
