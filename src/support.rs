//! Supporting utilities shared by the models in this crate.
//!
//! These APIs are public because they are useful on their own, but they are
//! not stable and may change as models evolve.

pub mod constraint;
pub mod hx;
pub mod iterate;
pub mod root;
pub mod thermo;
pub mod units;
