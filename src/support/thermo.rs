//! Thermodynamic property modeling.
//!
//! Property evaluation is injected into the coil, compressor, and cycle
//! models as capability traits rather than called through global fluid
//! objects. A model advertises which properties it can report (for example
//! [`HasEnthalpy`](capability::HasEnthalpy)) and which inputs it can build a
//! [`State`] from ([`StateFrom`](capability::StateFrom)).
//!
//! Two idealized models are provided:
//!
//! - [`TwoPhase`](model::TwoPhase): a pure refrigerant with a vapor dome.
//! - [`IdealMoistAir`](model::IdealMoistAir): ideal-gas psychrometrics.

mod error;
mod quality;
mod state;

pub mod capability;
pub mod fluid;
pub mod model;

pub use error::PropertyError;
pub use quality::VaporQuality;
pub use state::State;
