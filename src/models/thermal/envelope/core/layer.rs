use uom::si::{f64::Length, length::meter};

use crate::support::units::ThermalInsulance;

use super::{EnvelopeError, Material, SurfaceFilm, error::positive};

/// One layer of a construction assembly, listed from outside to inside.
#[derive(Debug, Clone, PartialEq)]
pub enum Layer {
    /// A homogeneous layer of a catalog material.
    Solid {
        material_name: String,
        material: Material,
        thickness: Length,
    },

    /// A layer described only by its resistance, such as an air gap.
    Resistance {
        description: String,
        resistance: ThermalInsulance,
    },

    Film(SurfaceFilm),
}

impl Layer {
    pub(super) fn solid(
        material_name: &str,
        material: Material,
        thickness: Length,
    ) -> Result<Self, EnvelopeError> {
        positive("thickness", thickness.get::<meter>())?;
        Ok(Self::Solid {
            material_name: material_name.to_owned(),
            material,
            thickness,
        })
    }

    pub(super) fn resistance(
        description: impl Into<String>,
        resistance: ThermalInsulance,
    ) -> Result<Self, EnvelopeError> {
        positive("layer resistance", resistance.value)?;
        Ok(Self::Resistance {
            description: description.into(),
            resistance,
        })
    }

    /// Area-specific thermal resistance of the layer.
    pub fn thermal_resistance(&self) -> ThermalInsulance {
        match self {
            Self::Solid {
                material,
                thickness,
                ..
            } => *thickness / material.conductivity,
            Self::Resistance { resistance, .. } => *resistance,
            Self::Film(film) => film.resistance(),
        }
    }
}
