use uom::si::{
    f64::{HeatTransfer, Ratio, ThermodynamicTemperature, Velocity},
    heat_transfer::watt_per_square_meter_kelvin,
    ratio::ratio,
    thermodynamic_temperature::kelvin,
    velocity::meter_per_second,
};

use crate::support::units::ThermalInsulance;

use super::{EnvelopeError, error::positive};

/// Stefan-Boltzmann constant, W/m²·K⁴.
const STEFAN_BOLTZMANN: f64 = 5.670_374_419e-8;

/// Hemispherical emissivity of ordinary building surfaces.
pub const SURFACE_EMISSIVITY: f64 = 0.9;

/// Direction of heat flow through a construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeatFlowDirection {
    Upwards,
    Horizontal,
    Downwards,
}

impl HeatFlowDirection {
    /// Direction through a floor or roof separating two spaces.
    ///
    /// Heat flows downwards when the space below is colder than the space
    /// above, and upwards otherwise.
    pub fn vertical(below: ThermodynamicTemperature, above: ThermodynamicTemperature) -> Self {
        if below < above {
            Self::Downwards
        } else {
            Self::Upwards
        }
    }

    /// Convective coefficient of still air at an interior surface, W/m²·K.
    fn interior_convection(self) -> f64 {
        match self {
            Self::Upwards => 5.0,
            Self::Horizontal => 2.5,
            Self::Downwards => 0.7,
        }
    }
}

/// The air film at the surface of a construction.
///
/// Film resistance is `1 / (h_c + ε·4σT_mn³)`. Interior films take their
/// convective coefficient from the heat flow direction; exterior films use
/// `h_c = 4 + 4·v` with `v` the wind speed in m/s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceFilm {
    exposure: Exposure,
    mean_temperature: ThermodynamicTemperature,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Exposure {
    Interior(HeatFlowDirection),
    Exterior(Velocity),
}

impl SurfaceFilm {
    /// A film on a surface facing an indoor space.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::OutOfRange`] for a non-positive absolute
    /// mean temperature.
    pub fn interior(
        direction: HeatFlowDirection,
        mean_temperature: ThermodynamicTemperature,
    ) -> Result<Self, EnvelopeError> {
        positive("mean temperature", mean_temperature.get::<kelvin>())?;
        Ok(Self {
            exposure: Exposure::Interior(direction),
            mean_temperature,
        })
    }

    /// A film on a surface exposed to outdoor air.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::OutOfRange`] for a negative wind speed or a
    /// non-positive absolute mean temperature.
    pub fn exterior(
        wind_speed: Velocity,
        mean_temperature: ThermodynamicTemperature,
    ) -> Result<Self, EnvelopeError> {
        let v = wind_speed.get::<meter_per_second>();
        if !(v >= 0.0 && v.is_finite()) {
            return Err(EnvelopeError::out_of_range(
                "wind speed",
                format!("must be non-negative, got {v} m/s"),
            ));
        }
        positive("mean temperature", mean_temperature.get::<kelvin>())?;
        Ok(Self {
            exposure: Exposure::Exterior(wind_speed),
            mean_temperature,
        })
    }

    /// Combined convective and radiative coefficient.
    pub fn coefficient(&self) -> HeatTransfer {
        let convective = match self.exposure {
            Exposure::Interior(direction) => direction.interior_convection(),
            Exposure::Exterior(wind) => 4.0 + 4.0 * wind.get::<meter_per_second>(),
        };
        let t = self.mean_temperature.get::<kelvin>();
        let radiative = SURFACE_EMISSIVITY * 4.0 * STEFAN_BOLTZMANN * t.powi(3);
        HeatTransfer::new::<watt_per_square_meter_kelvin>(convective + radiative)
    }

    pub fn resistance(&self) -> ThermalInsulance {
        Ratio::new::<ratio>(1.0) / self.coefficient()
    }
}
