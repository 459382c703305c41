//! # HVAC Models
//!
//! Equipment models for vapor-compression HVAC machines, built on
//! [Twine](https://github.com/isentropic-dev/twine).
//!
//! The centerpiece is a fin-tube coil rating toolkit: condensers and
//! evaporators are split into refrigerant phase regions, and each region is
//! balanced by fixed-point iteration on its unknown flow length or mass flow.
//! Around it sit closed-form component models (reciprocating compressor, fan),
//! a single-stage cycle, and layered building envelope assemblies.
//!
//! ## Crate layout
//!
//! - [`models`]: Domain-specific [`twine_core::Model`] implementations.
//! - [`support`]: Supporting utilities used by models.
//!
//! ## Utility code lifecycle
//!
//! Modules in [`support`] are part of the public API because they're useful,
//! but their APIs are not stable. Breaking changes may occur as needed.
//!
//! Utility code starts in a model's internal `core` module and only moves to
//! [`support`] once more than one model needs it. Model-specific utility code
//! remains private.
//!
//! ## Logging
//!
//! Diagnostics are emitted through [`tracing`]. Iteration progress is logged
//! at `debug` level and advisory conditions (clamped inputs, infeasible coil
//! lengths) at `warn` level. The crate never installs a subscriber.

pub mod models;
pub mod support;
