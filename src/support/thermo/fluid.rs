//! Fluid identifiers.
//!
//! A fluid type names a substance and carries any data that, together with
//! temperature and density, defines its state.
//!
//! Refrigerants are supplied by the caller as marker types implementing
//! [`TwoPhaseFluid`](crate::support::thermo::model::TwoPhaseFluid) or a
//! similar trait for another property backend. With the `coolprop` feature,
//! `R134a` is provided for the CoolProp backend.

mod moist_air;

#[cfg(feature = "coolprop")]
mod r134a;

#[cfg(test)]
pub(crate) mod test_refrigerant;

pub use moist_air::{HumidityRatio, MoistAir, RelativeHumidity};

#[cfg(feature = "coolprop")]
#[cfg_attr(docsrs, doc(cfg(feature = "coolprop")))]
pub use r134a::R134a;
