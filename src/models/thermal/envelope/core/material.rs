use std::collections::HashMap;

use uom::si::{
    f64::{MassDensity, SpecificHeatCapacity, ThermalConductivity},
    mass_density::kilogram_per_cubic_meter,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermal_conductivity::watt_per_meter_kelvin,
};

use super::{EnvelopeError, error::positive};

/// Thermal properties of a homogeneous building material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub conductivity: ThermalConductivity,
    pub density: MassDensity,
    pub specific_heat: SpecificHeatCapacity,
}

impl Material {
    /// Creates a material from SI values.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::OutOfRange`] unless every property is positive.
    pub fn new(
        conductivity: ThermalConductivity,
        density: MassDensity,
        specific_heat: SpecificHeatCapacity,
    ) -> Result<Self, EnvelopeError> {
        positive(
            "conductivity",
            conductivity.get::<watt_per_meter_kelvin>(),
        )?;
        positive("density", density.get::<kilogram_per_cubic_meter>())?;
        positive(
            "specific heat",
            specific_heat.get::<joule_per_kilogram_kelvin>(),
        )?;
        Ok(Self {
            conductivity,
            density,
            specific_heat,
        })
    }
}

/// Design values for common materials: `(name, λ W/m·K, ρ kg/m³, c J/kg·K)`.
const COMMON_MATERIALS: [(&str, f64, f64, f64); 8] = [
    ("concrete-reinforced-2%-steel", 2.5, 2400.0, 1000.0),
    ("precast-slab-heavy-concrete", 1.7, 2300.0, 1000.0),
    ("concrete-light-1600kg/m3", 0.8, 1600.0, 1000.0),
    ("polystyrene-extruded-sheet", 0.035, 30.0, 1450.0),
    ("mineral-wool", 0.04, 50.0, 1030.0),
    ("brick-masonry", 0.9, 1800.0, 840.0),
    ("gypsum-plasterboard", 0.25, 900.0, 1000.0),
    ("softwood", 0.13, 500.0, 1600.0),
];

/// Named building materials.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialCatalog {
    materials: HashMap<String, Material>,
}

impl MaterialCatalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalog preloaded with common wall, floor, and roof materials.
    pub fn common() -> Self {
        let materials = COMMON_MATERIALS
            .iter()
            .map(|&(name, k, rho, c)| {
                (
                    name.to_owned(),
                    Material {
                        conductivity: ThermalConductivity::new::<watt_per_meter_kelvin>(k),
                        density: MassDensity::new::<kilogram_per_cubic_meter>(rho),
                        specific_heat: SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(c),
                    },
                )
            })
            .collect();
        Self { materials }
    }

    /// Adds or replaces a material, returning the one it replaced.
    pub fn insert(&mut self, name: impl Into<String>, material: Material) -> Option<Material> {
        self.materials.insert(name.into(), material)
    }

    /// Looks up a material by name.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::UnknownMaterial`] if the name is not present.
    pub fn get(&self, name: &str) -> Result<&Material, EnvelopeError> {
        self.materials
            .get(name)
            .ok_or_else(|| EnvelopeError::UnknownMaterial {
                name: name.to_owned(),
            })
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}
