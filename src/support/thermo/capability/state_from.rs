use crate::support::thermo::State;

use super::ThermoModel;

/// Capability for constructing a [`State`] from a typed input.
///
/// This is the property-evaluator interface the coil and compressor models
/// consume: "given two independent properties, return the full state".
/// Which pairs a model supports is expressed at compile time by the
/// `StateFrom<Input>` impls it provides, so an unsupported pair is a type
/// error rather than a runtime failure.
///
/// ## Input conventions
///
/// Refrigerant models take the fluid first:
/// - `(Fluid, ThermodynamicTemperature, Pressure)`
/// - `(Fluid, Pressure, SpecificEnthalpy)`
/// - `(Fluid, Pressure, SpecificEntropy)`
/// - `(Fluid, Pressure, VaporQuality)`
///
/// Moist-air models either take the fluid (which carries the humidity ratio)
/// or lead with pressure and name two psychrometric properties:
/// - `(MoistAir, ThermodynamicTemperature, Pressure)`
/// - `(Pressure, ThermodynamicTemperature, RelativeHumidity)`
/// - `(Pressure, SpecificEnthalpy, RelativeHumidity)`
///
/// ## Default fluid convenience
///
/// If a model implements `StateFrom<(Fluid, A, B)>` and `Fluid: Default`, it
/// also implements `StateFrom<(A, B)>`, filling in `Fluid::default()`.
pub trait StateFrom<Input>: ThermoModel {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Create a thermodynamic state from the provided input.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the state cannot be created from `input`.
    fn state_from(&self, input: Input) -> Result<State<Self::Fluid>, Self::Error>;
}

impl<M, A, B> StateFrom<(A, B)> for M
where
    M: ThermoModel + StateFrom<(<M as ThermoModel>::Fluid, A, B)>,
    <M as ThermoModel>::Fluid: Default,
{
    type Error = <M as StateFrom<(<M as ThermoModel>::Fluid, A, B)>>::Error;

    fn state_from(&self, (a, b): (A, B)) -> Result<State<Self::Fluid>, Self::Error> {
        self.state_from((<M as ThermoModel>::Fluid::default(), a, b))
    }
}
