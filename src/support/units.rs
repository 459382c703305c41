//! Extensions to [`uom`].
//!
//! This crate uses [`uom`] for all physical units. This module adds the
//! quantities and helpers that coil and envelope modeling need but [`uom`]
//! does not provide.
//!
//! ## Temperature differences
//!
//! Subtracting two absolute temperatures should produce an interval, which
//! [`uom`] does not support directly. [`TemperatureDifference::minus`] fills
//! that gap:
//!
//! ```
//! use uom::si::{f64::ThermodynamicTemperature, thermodynamic_temperature::degree_celsius};
//! use hvac_models::support::units::TemperatureDifference;
//!
//! let condensing = ThermodynamicTemperature::new::<degree_celsius>(50.0);
//! let ambient = ThermodynamicTemperature::new::<degree_celsius>(35.0);
//! let approach = condensing.minus(ambient);
//! ```

mod quantities;
mod temperature_difference;

pub use quantities::{
    MassFlux, SpecificEnthalpy, SpecificEntropy, SpecificGasConstant, ThermalInsulance,
};
pub use temperature_difference::TemperatureDifference;
