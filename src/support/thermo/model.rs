//! Thermodynamic property models.

pub mod moist_air;
pub mod two_phase;

#[cfg(feature = "coolprop")]
#[cfg_attr(docsrs, doc(cfg(feature = "coolprop")))]
pub mod coolprop;

pub use moist_air::IdealMoistAir;
pub use two_phase::{
    TwoPhase, TwoPhaseFluid, TwoPhaseParameters, TwoPhaseParametersError, TwoPhaseReference,
};

#[cfg(feature = "coolprop")]
#[cfg_attr(docsrs, doc(cfg(feature = "coolprop")))]
pub use coolprop::{CoolProp, CoolPropMoistAir};
