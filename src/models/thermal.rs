//! Thermal systems models.
//!
//! This module contains refrigerant-to-air fin-tube coils and building
//! envelope construction assemblies.

pub mod envelope;
pub mod fin_tube;
