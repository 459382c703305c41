//! Reciprocating compressor.
//!
//! One compressor type covers the volumetric-polytropic model and the
//! efficiency-corrected variants; the difference is a [`PolytropicExponent`]
//! strategy in the design. The computation lives in the internal [`core`]
//! module.

pub(crate) mod core;

use twine_core::Model;

pub use self::core::{
    CompressorDesign, CompressorError, CompressorOutput, CompressorThermoModel, Efficiencies,
    OperatingPoint, PolytropicExponent, ReciprocatingCompressor, SaturationConditions,
};

impl<Fluid, Thermo> Model for ReciprocatingCompressor<Fluid, Thermo>
where
    Fluid: Clone,
    Thermo: CompressorThermoModel<Fluid>,
{
    type Input = OperatingPoint;
    type Output = CompressorOutput<Fluid>;
    type Error = CompressorError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.rate(input)
    }
}
