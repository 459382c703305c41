//! Vapor-compression machine components and cycles.
//!
//! - [`compressor`]: reciprocating compressor with a polytropic exponent
//!   strategy.
//! - [`fan`]: condenser and evaporator fans.
//! - [`cycle`]: a single-stage refrigeration cycle around the compressor.

pub mod compressor;
pub mod cycle;
pub mod fan;
