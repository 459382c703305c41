//! Capability traits for property models.
//!
//! Solvers name the exact capabilities they need in their bounds, so a
//! property backend only has to implement what the models it feeds use.

mod base;
mod properties;
mod state_from;

pub use base::ThermoModel;
pub use properties::*;
pub use state_from::StateFrom;
