use uom::si::{
    f64::{
        Frequency, MassDensity, Pressure, SpecificVolume, TemperatureInterval,
        ThermodynamicTemperature,
    },
    ratio::ratio,
    temperature_interval::kelvin as delta_kelvin,
};

use crate::support::{thermo::VaporQuality, units::TemperatureDifference};

use super::{CompressorError, CompressorThermoModel};

/// Where a compressor runs.
///
/// Every field must be set before the compressor can be rated. A field left
/// as `None` is reported as [`CompressorError::StateNotSet`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OperatingPoint {
    /// Shaft speed in revolutions per unit time.
    pub speed: Option<Frequency>,

    pub suction_pressure: Option<Pressure>,
    pub discharge_pressure: Option<Pressure>,
    pub suction_specific_volume: Option<SpecificVolume>,
}

/// Saturation conditions of a refrigeration cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SaturationConditions {
    pub evaporating: ThermodynamicTemperature,
    pub condensing: ThermodynamicTemperature,

    /// Superheat of the suction gas above the evaporating temperature.
    pub superheat: TemperatureInterval,
}

/// An operating point with every field present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Resolved {
    pub(super) speed: Frequency,
    pub(super) suction_pressure: Pressure,
    pub(super) discharge_pressure: Pressure,
    pub(super) suction_density: MassDensity,
}

impl OperatingPoint {
    /// Builds an operating point from saturation temperatures.
    ///
    /// Suction and discharge pressures are the saturation pressures at the
    /// evaporating and condensing temperatures. The suction gas is taken at
    /// the evaporating pressure with the given superheat, or as saturated
    /// vapor when the superheat is zero.
    ///
    /// # Errors
    ///
    /// Returns [`CompressorError::OutOfRange`] for a negative superheat or a
    /// condensing temperature not above the evaporating one, and
    /// [`CompressorError::PropertyEvaluation`] if a state cannot be built.
    pub fn from_saturation<Fluid: Clone>(
        thermo: &impl CompressorThermoModel<Fluid>,
        fluid: Fluid,
        speed: Frequency,
        conditions: &SaturationConditions,
    ) -> Result<Self, CompressorError> {
        let superheat = conditions.superheat.get::<delta_kelvin>();
        if !(superheat >= 0.0) {
            return Err(CompressorError::out_of_range(
                "superheat",
                format!("must be non-negative, got {superheat} K"),
            ));
        }

        let lift = conditions
            .condensing
            .minus(conditions.evaporating)
            .get::<delta_kelvin>();
        if !(lift > 0.0) {
            return Err(CompressorError::out_of_range(
                "condensing temperature",
                format!("must exceed the evaporating temperature, lift is {lift} K"),
            ));
        }

        let saturated_vapor = |temperature: ThermodynamicTemperature| {
            thermo
                .state_from((fluid.clone(), temperature, VaporQuality::saturated_vapor()))
                .map_err(|err| CompressorError::property_failed("saturated vapor", err))
        };

        let evaporating = saturated_vapor(conditions.evaporating)?;
        let condensing = saturated_vapor(conditions.condensing)?;
        let suction_pressure = thermo
            .pressure(&evaporating)
            .map_err(|err| CompressorError::property_failed("evaporating pressure", err))?;
        let discharge_pressure = thermo
            .pressure(&condensing)
            .map_err(|err| CompressorError::property_failed("condensing pressure", err))?;

        let suction = if superheat > 0.0 {
            thermo
                .state_from((
                    fluid,
                    conditions.evaporating + conditions.superheat,
                    suction_pressure,
                ))
                .map_err(|err| CompressorError::property_failed("suction gas", err))?
        } else {
            evaporating
        };

        Ok(Self {
            speed: Some(speed),
            suction_pressure: Some(suction_pressure),
            discharge_pressure: Some(discharge_pressure),
            suction_specific_volume: Some(suction.density.recip()),
        })
    }

    /// Checks that every field is set and physically meaningful.
    pub(super) fn resolve(&self) -> Result<Resolved, CompressorError> {
        let speed = self
            .speed
            .ok_or(CompressorError::StateNotSet { field: "speed" })?;
        let suction_pressure = self.suction_pressure.ok_or(CompressorError::StateNotSet {
            field: "suction_pressure",
        })?;
        let discharge_pressure = self.discharge_pressure.ok_or(CompressorError::StateNotSet {
            field: "discharge_pressure",
        })?;
        let suction_specific_volume =
            self.suction_specific_volume
                .ok_or(CompressorError::StateNotSet {
                    field: "suction_specific_volume",
                })?;

        for (quantity, value) in [
            ("speed", speed.value),
            ("suction pressure", suction_pressure.value),
            ("suction specific volume", suction_specific_volume.value),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(CompressorError::out_of_range(
                    quantity,
                    format!("must be positive, got {value} (SI)"),
                ));
            }
        }

        let pressure_ratio = (discharge_pressure / suction_pressure).get::<ratio>();
        if !(pressure_ratio > 1.0 && pressure_ratio.is_finite()) {
            return Err(CompressorError::out_of_range(
                "pressure ratio",
                format!("discharge must exceed suction pressure, ratio is {pressure_ratio}"),
            ));
        }

        Ok(Resolved {
            speed,
            suction_pressure,
            discharge_pressure,
            suction_density: suction_specific_volume.recip(),
        })
    }
}
